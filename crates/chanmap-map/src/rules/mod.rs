//! Domain pattern rules: one family per physical quantity.
//!
//! Rules are plain data. A rule fires for every source channel whose raw
//! name contains one of its substrings, and emits one match per candidate
//! target present in the target header. Candidates whose target is absent,
//! or that need a wheel corner the source does not name, are skipped.

mod table;

use std::collections::BTreeSet;
use std::fmt;

use chanmap_model::{Match, MatchType};
use tracing::trace;

use crate::dictionary::Dictionary;
use crate::notation::{Axis, Corner};
use crate::variable::Variable;

pub use table::STANDARD_RULES;

/// Physical quantity a rule belongs to, in application order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleFamily {
    Acceleration,
    Gyroscope,
    Wheel,
    Suspension,
    Brake,
    Temperature,
    Powertrain,
    Gps,
    Velocity,
    Fuel,
    Distance,
    Steering,
}

impl RuleFamily {
    pub const ALL: [RuleFamily; 12] = [
        Self::Acceleration,
        Self::Gyroscope,
        Self::Wheel,
        Self::Suspension,
        Self::Brake,
        Self::Temperature,
        Self::Powertrain,
        Self::Gps,
        Self::Velocity,
        Self::Fuel,
        Self::Distance,
        Self::Steering,
    ];

    #[must_use]
    pub fn match_type(self) -> MatchType {
        match self {
            Self::Acceleration => MatchType::Acceleration,
            Self::Gyroscope => MatchType::Gyroscope,
            Self::Wheel => MatchType::Wheel,
            Self::Suspension => MatchType::Suspension,
            Self::Brake => MatchType::Brake,
            Self::Temperature => MatchType::Temperature,
            Self::Powertrain => MatchType::Powertrain,
            Self::Gps => MatchType::Gps,
            Self::Velocity => MatchType::Velocity,
            Self::Fuel => MatchType::Fuel,
            Self::Distance => MatchType::Distance,
            Self::Steering => MatchType::Steering,
        }
    }
}

impl fmt::Display for RuleFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.match_type().label())
    }
}

/// One target a rule may propose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Full target name, or a prefix for positional targets.
    pub target: &'static str,
    pub confidence: f32,
    /// Note text; `{axis}` and `{rotation}` expand from the rule's axis.
    pub note: &'static str,
}

/// How a rule turns a source channel into target names.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Targets {
    /// Literal target names.
    Fixed(&'static [Candidate]),
    /// Prefixes completed with the source channel's corner (`Jnc_` → `Jnc_L1`).
    AtPosition(&'static [Candidate]),
    /// One target per listed corner, for axle-level sources.
    Corners {
        prefix: &'static str,
        corners: &'static [Corner],
        confidence: f32,
        note: &'static str,
    },
}

impl Targets {
    /// Target names with their base confidence, for rule listings.
    ///
    /// Positional prefixes are shown as `Jnc_<corner>`.
    pub fn listing(&self) -> Vec<(String, f32)> {
        match *self {
            Targets::Fixed(candidates) => candidates
                .iter()
                .map(|c| (c.target.to_string(), c.confidence))
                .collect(),
            Targets::AtPosition(candidates) => candidates
                .iter()
                .map(|c| (format!("{}<corner>", c.target), c.confidence))
                .collect(),
            Targets::Corners {
                prefix,
                corners,
                confidence,
                ..
            } => corners
                .iter()
                .map(|corner| (format!("{prefix}{}", corner.sim_code()), confidence))
                .collect(),
        }
    }
}

/// Per-match adjustment applied after a candidate is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refinement {
    None,
    /// Notes whether the target is an Euler-angle rate (underscore in the
    /// name) or a body-fixed rate.
    EulerFrame,
    /// Sources naming the peak sensor (`Max`) get full confidence; the rest
    /// keep the candidate's.
    PeakSensor,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternRule {
    pub family: RuleFamily,
    /// Any-of, case-sensitive substrings of the source name.
    pub sources: &'static [&'static str],
    pub targets: Targets,
    pub refinement: Refinement,
    pub axis: Option<Axis>,
}

impl PatternRule {
    pub fn applies_to(&self, source: &str) -> bool {
        self.sources.iter().any(|pattern| source.contains(pattern))
    }

    /// Every (target, confidence, note) this rule proposes for `source`,
    /// before the target header is consulted.
    pub fn proposals(&self, source: &Variable) -> Vec<(String, f32, String)> {
        let mut out = Vec::new();
        match self.targets {
            Targets::Fixed(candidates) => {
                for candidate in candidates {
                    out.push((
                        candidate.target.to_string(),
                        candidate.confidence,
                        self.expand_note(candidate.note),
                    ));
                }
            }
            Targets::AtPosition(candidates) => {
                let Some(corner) = source.position() else {
                    trace!(source = source.raw(), family = %self.family, "no wheel position");
                    return out;
                };
                for candidate in candidates {
                    out.push((
                        format!("{}{}", candidate.target, corner.sim_code()),
                        candidate.confidence,
                        format!("{} - {}", self.expand_note(candidate.note), corner.pair_label()),
                    ));
                }
            }
            Targets::Corners {
                prefix,
                corners,
                confidence,
                note,
            } => {
                for corner in corners {
                    out.push((
                        format!("{prefix}{}", corner.sim_code()),
                        confidence,
                        format!("{} - {}", self.expand_note(note), corner.pair_label()),
                    ));
                }
            }
        }
        for (target, confidence, note) in &mut out {
            self.refine(source.raw(), target, confidence, note);
        }
        out
    }

    fn expand_note(&self, template: &str) -> String {
        match self.axis {
            Some(axis) => template
                .replace("{axis}", &axis.linear_label())
                .replace("{rotation}", &axis.rotation_label()),
            None => template.to_string(),
        }
    }

    fn refine(&self, source: &str, target: &str, confidence: &mut f32, note: &mut String) {
        match self.refinement {
            Refinement::None => {}
            Refinement::EulerFrame => {
                let frame = if target.contains('_') {
                    "Euler"
                } else {
                    "body-fixed"
                };
                note.push_str(&format!(" ({frame})"));
            }
            Refinement::PeakSensor => {
                if source.contains("Max") {
                    *confidence = 1.0;
                    note.push_str(" - Max of sensors");
                } else {
                    note.push_str(" - Multiple sensors to single output");
                }
            }
        }
    }
}

/// Ordered collection of pattern rules.
#[derive(Debug, Clone)]
pub struct RuleLibrary {
    rules: Vec<PatternRule>,
}

impl Default for RuleLibrary {
    fn default() -> Self {
        Self::standard()
    }
}

impl RuleLibrary {
    /// The built-in rule table.
    pub fn standard() -> Self {
        Self {
            rules: STANDARD_RULES.to_vec(),
        }
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    pub fn family(&self, family: RuleFamily) -> impl Iterator<Item = &PatternRule> {
        self.rules.iter().filter(move |rule| rule.family == family)
    }

    /// Runs the rules of one family over every source channel.
    pub fn apply_family(
        &self,
        family: RuleFamily,
        sources: &[Variable],
        targets: &BTreeSet<&str>,
        dictionary: &Dictionary,
    ) -> Vec<Match> {
        let mut matches = Vec::new();
        for rule in self.family(family) {
            for source in sources.iter().filter(|s| rule.applies_to(s.raw())) {
                for (target, confidence, note) in rule.proposals(source) {
                    if !targets.contains(target.as_str()) {
                        trace!(source = source.raw(), target = %target, "rule target absent");
                        continue;
                    }
                    let description = dictionary.describe(&target).to_string();
                    matches.push(
                        Match::new(source.raw(), target, confidence, family.match_type(), note)
                            .with_description(description),
                    );
                }
            }
        }
        matches
    }

    /// Runs every family in order.
    pub fn apply(
        &self,
        sources: &[Variable],
        targets: &BTreeSet<&str>,
        dictionary: &Dictionary,
    ) -> Vec<Match> {
        RuleFamily::ALL
            .into_iter()
            .flat_map(|family| self.apply_family(family, sources, targets, dictionary))
            .collect()
    }
}
