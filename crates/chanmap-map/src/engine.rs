//! Multi-pass match orchestration.

use std::collections::BTreeSet;

use chanmap_model::{Match, MatchSet, MatchType};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, info_span};

use crate::claims::ClaimSet;
use crate::dictionary::{Dictionary, best_longhand};
use crate::rules::{RuleFamily, RuleLibrary};
use crate::score::SimilarityMetric;
use crate::variable::Variable;

/// Dictionary-pass scores above this are typed `Dictionary-Exact`.
const DICTIONARY_EXACT_MIN: f64 = 0.8;
/// Dictionary-pass scores above this are typed `Dictionary-High`.
const DICTIONARY_HIGH_MIN: f64 = 0.7;

/// Tuning for the generic passes. The exact and rule passes have none.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    /// Run the dictionary and semantic passes after the rules.
    pub generic_fallback: bool,
    pub metric: SimilarityMetric,
    /// A dictionary match needs a score strictly above this.
    pub dictionary_threshold: f64,
    /// A semantic match needs a score strictly above this.
    pub semantic_threshold: f64,
    /// Semantic candidates within this distance of the best are all emitted.
    pub semantic_window: f64,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            generic_fallback: true,
            metric: SimilarityMetric::TokenSet,
            dictionary_threshold: 0.5,
            semantic_threshold: 0.5,
            semantic_window: 0.1,
        }
    }
}

/// Matching passes in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pass {
    Exact,
    Rules,
    Dictionary,
    Semantic,
}

impl Pass {
    pub const ORDER: [Pass; 4] = [Self::Exact, Self::Rules, Self::Dictionary, Self::Semantic];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Rules => "rules",
            Self::Dictionary => "dictionary",
            Self::Semantic => "semantic",
        }
    }

    /// Whether the pass reads and writes the claim set.
    #[must_use]
    pub fn uses_claims(self) -> bool {
        matches!(self, Self::Dictionary | Self::Semantic)
    }
}

/// Proposes matches from source channels to target channels.
///
/// The engine never fails: unknown codes, absent targets and empty inputs
/// all come back as fewer matches.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    dictionary: Dictionary,
    rules: RuleLibrary,
    options: MatchOptions,
}

impl MatchEngine {
    pub fn new(dictionary: Dictionary) -> Self {
        Self {
            dictionary,
            rules: RuleLibrary::standard(),
            options: MatchOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn rules(&self) -> &RuleLibrary {
        &self.rules
    }

    pub fn options(&self) -> &MatchOptions {
        &self.options
    }

    /// Runs every pass and returns all proposals in emission order.
    ///
    /// The result is unresolved: a source may appear with several targets
    /// and a target with several sources.
    pub fn run(&self, sources: &[Variable], targets: &[Variable]) -> MatchSet {
        let span = info_span!(
            "match_run",
            sources = sources.len(),
            targets = targets.len(),
            metric = self.options.metric.label()
        );
        let _guard = span.enter();

        let mut matches = MatchSet::new();
        let mut claims = ClaimSet::new();
        for pass in Pass::ORDER {
            let found = match pass {
                Pass::Exact => self.exact_pass(sources, targets),
                Pass::Rules => self.rule_pass(sources, targets),
                _ if pass.uses_claims() && !self.options.generic_fallback => {
                    debug!(pass = pass.label(), "generic fallback disabled");
                    continue;
                }
                Pass::Dictionary => self.dictionary_pass(sources, targets, &mut claims),
                Pass::Semantic => self.semantic_pass(sources, targets, &mut claims),
            };
            info!(pass = pass.label(), matches = found.len(), "pass complete");
            matches.extend(found);
        }
        info!(
            total = matches.len(),
            claimed_sources = claims.claimed_sources(),
            claimed_targets = claims.claimed_targets(),
            "matching complete"
        );
        matches
    }

    /// Pairs whose normalized names are equal and non-empty.
    pub fn exact_pass(&self, sources: &[Variable], targets: &[Variable]) -> Vec<Match> {
        let normalized_targets: Vec<(String, &Variable)> = targets
            .iter()
            .map(|target| (target.normalized(), target))
            .filter(|(normalized, _)| !normalized.is_empty())
            .collect();

        let mut matches = Vec::new();
        for source in sources {
            let normalized = source.normalized();
            if normalized.is_empty() {
                continue;
            }
            for (target_normalized, target) in &normalized_targets {
                if *target_normalized == normalized {
                    matches.push(
                        Match::new(
                            source.raw(),
                            target.raw(),
                            1.0,
                            MatchType::Exact,
                            "Identical names after normalization",
                        )
                        .with_description(self.dictionary.describe(target.raw())),
                    );
                }
            }
        }
        matches
    }

    /// Every rule family in table order.
    pub fn rule_pass(&self, sources: &[Variable], targets: &[Variable]) -> Vec<Match> {
        let header: BTreeSet<&str> = targets.iter().map(Variable::raw).collect();
        let mut matches = Vec::new();
        for family in RuleFamily::ALL {
            let found = self
                .rules
                .apply_family(family, sources, &header, &self.dictionary);
            debug!(family = %family, matches = found.len(), "rule family applied");
            matches.extend(found);
        }
        matches
    }

    /// Best unclaimed target per unclaimed source by dictionary longhand.
    ///
    /// Both sides of each emitted match are claimed, so later sources and
    /// the semantic pass cannot reuse them.
    pub fn dictionary_pass(
        &self,
        sources: &[Variable],
        targets: &[Variable],
        claims: &mut ClaimSet,
    ) -> Vec<Match> {
        let mut matches = Vec::new();
        for source in sources {
            if claims.is_source_claimed(source.raw()) {
                continue;
            }
            let source_text = self.dictionary.describe(source.raw());

            let mut best: Option<(&Variable, &str, f64)> = None;
            for target in targets {
                if claims.is_target_claimed(target.raw()) {
                    continue;
                }
                let target_text = self.dictionary.describe(target.raw());
                let score = self.options.metric.score(source_text, target_text);
                if best.is_none_or(|(_, _, top)| score > top) {
                    best = Some((target, target_text, score));
                }
            }

            let Some((target, target_text, score)) = best else {
                continue;
            };
            if score <= self.options.dictionary_threshold {
                continue;
            }
            let match_type = dictionary_match_type(score);
            debug!(
                source = source.raw(),
                target = target.raw(),
                score,
                match_type = %match_type,
                "dictionary match"
            );
            matches.push(
                Match::new(
                    source.raw(),
                    target.raw(),
                    round3(score),
                    match_type,
                    format!("Dictionary {} similarity", self.options.metric.label()),
                )
                .with_description(target_text),
            );
            claims.claim(source.raw(), target.raw());
        }
        matches
    }

    /// Near-best unclaimed targets per unclaimed source by description.
    ///
    /// A source the dictionary does not know is first expanded to the
    /// closest longhand among the still-unclaimed targets, so a claimed
    /// target's meaning never leaks onto its siblings. Every target scoring
    /// above the semantic threshold and within the window of the source's
    /// best score is emitted; the source and emitted targets are then claimed.
    pub fn semantic_pass(
        &self,
        sources: &[Variable],
        targets: &[Variable],
        claims: &mut ClaimSet,
    ) -> Vec<Match> {
        let threshold = self.options.semantic_threshold;
        let mut matches = Vec::new();
        for source in sources {
            if claims.is_source_claimed(source.raw()) {
                continue;
            }
            let open: Vec<&Variable> = targets
                .iter()
                .filter(|target| !claims.is_target_claimed(target.raw()))
                .collect();
            let source_text = match self.dictionary.lookup(source.raw()) {
                Some(longhand) => longhand,
                None => best_longhand(
                    source.raw(),
                    open.iter()
                        .filter_map(|target| self.dictionary.lookup(target.raw())),
                    threshold,
                ),
            };

            let scored: Vec<(&Variable, &str, f64)> = open
                .into_iter()
                .map(|target| {
                    let target_text = self.dictionary.describe(target.raw());
                    let score = self.options.metric.score(source_text, target_text);
                    (target, target_text, score)
                })
                .collect();
            let best = scored
                .iter()
                .map(|(_, _, score)| *score)
                .fold(f64::NEG_INFINITY, f64::max);
            if best <= threshold {
                continue;
            }

            let floor = best - self.options.semantic_window;
            let mut emitted = Vec::new();
            for (target, target_text, score) in scored {
                if score > threshold && score >= floor {
                    debug!(
                        source = source.raw(),
                        target = target.raw(),
                        score,
                        "semantic match"
                    );
                    matches.push(
                        Match::new(
                            source.raw(),
                            target.raw(),
                            round3(score),
                            MatchType::Semantic,
                            format!("Semantic match via \"{source_text}\""),
                        )
                        .with_description(target_text),
                    );
                    emitted.push(target.raw());
                }
            }
            claims.claim_source(source.raw());
            for target in emitted {
                claims.claim_target(target);
            }
        }
        matches
    }
}

fn dictionary_match_type(score: f64) -> MatchType {
    if score > DICTIONARY_EXACT_MIN {
        MatchType::DictionaryExact
    } else if score > DICTIONARY_HIGH_MIN {
        MatchType::DictionaryHigh
    } else {
        MatchType::DictionaryMedium
    }
}

fn round3(score: f64) -> f32 {
    ((score * 1000.0).round() / 1000.0) as f32
}
