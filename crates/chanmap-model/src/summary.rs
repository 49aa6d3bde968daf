//! Aggregate statistics over a set of matches.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::matching::{Match, MatchType};

/// Confidence buckets used in match reports.
///
/// - `Perfect`: exactly 1.00
/// - `VeryHigh`: 0.95 to 0.99
/// - `High`: 0.90 to 0.94
/// - `Moderate`: 0.85 to 0.89
/// - `Low`: below 0.85
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ConfidenceBand {
    Low,
    Moderate,
    High,
    VeryHigh,
    Perfect,
}

impl ConfidenceBand {
    /// Bands from highest to lowest, the order reports print them in.
    pub const DESCENDING: [ConfidenceBand; 5] = [
        Self::Perfect,
        Self::VeryHigh,
        Self::High,
        Self::Moderate,
        Self::Low,
    ];

    #[must_use]
    pub fn of(confidence: f32) -> Self {
        if confidence >= 1.0 {
            Self::Perfect
        } else if confidence >= 0.95 {
            Self::VeryHigh
        } else if confidence >= 0.90 {
            Self::High
        } else if confidence >= 0.85 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Perfect => "1.00 (Perfect)",
            Self::VeryHigh => "0.95-0.99",
            Self::High => "0.90-0.94",
            Self::Moderate => "0.85-0.89",
            Self::Low => "< 0.85",
        }
    }
}

/// Totals, coverage and distributions for a match table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub total_matches: usize,
    pub unique_sources: usize,
    pub unique_targets: usize,
    pub source_count: usize,
    pub target_count: usize,
    pub by_band: BTreeMap<ConfidenceBand, usize>,
    pub by_type: BTreeMap<MatchType, usize>,
}

impl MatchSummary {
    /// Summarize `matches` against schemas of the given sizes.
    pub fn from_matches<'a, I>(matches: I, source_count: usize, target_count: usize) -> Self
    where
        I: IntoIterator<Item = &'a Match>,
    {
        let mut total_matches = 0;
        let mut sources = BTreeSet::new();
        let mut targets = BTreeSet::new();
        let mut by_band = BTreeMap::new();
        let mut by_type = BTreeMap::new();
        for m in matches {
            total_matches += 1;
            sources.insert(m.source_name.as_str());
            targets.insert(m.target_name.as_str());
            *by_band.entry(ConfidenceBand::of(m.confidence)).or_insert(0) += 1;
            *by_type.entry(m.match_type).or_insert(0) += 1;
        }
        Self {
            total_matches,
            unique_sources: sources.len(),
            unique_targets: targets.len(),
            source_count,
            target_count,
            by_band,
            by_type,
        }
    }

    /// Share of source channels with at least one match, in percent.
    pub fn source_coverage(&self) -> f64 {
        percent(self.unique_sources, self.source_count)
    }

    /// Share of target channels with at least one match, in percent.
    pub fn target_coverage(&self) -> f64 {
        percent(self.unique_targets, self.target_count)
    }

    pub fn band_count(&self, band: ConfidenceBand) -> usize {
        self.by_band.get(&band).copied().unwrap_or(0)
    }

    /// Match types ordered by descending count, ties by type order.
    pub fn types_by_count(&self) -> Vec<(MatchType, usize)> {
        let mut entries: Vec<(MatchType, usize)> =
            self.by_type.iter().map(|(k, v)| (*k, *v)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        entries
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        100.0 * part as f64 / whole as f64
    }
}
