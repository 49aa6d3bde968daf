//! Output of the resolver: one surviving match per target plus an audit trail.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::matching::{Match, MatchSet};

/// Minimum confidence a match needs to reach the export.
pub const DEFAULT_EXPORT_THRESHOLD: f32 = 0.9;

/// Why a match above the threshold was not kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// A higher-ranked match already claimed the same target.
    #[serde(rename = "duplicate target")]
    DuplicateTarget,
}

impl SkipReason {
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::DuplicateTarget => "duplicate target",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedMatch {
    #[serde(flatten)]
    pub matched: Match,
    pub reason: SkipReason,
}

/// Kept and skipped matches for one confidence threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub threshold: f32,
    /// Survivors, highest confidence first.
    pub kept: Vec<Match>,
    /// Matches that cleared the threshold but lost their target.
    pub skipped: Vec<SkippedMatch>,
}

/// Outcome summary for callers that only need to branch on emptiness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionStatus {
    Resolved { kept: usize, skipped: usize },
    Empty { message: String },
}

impl Resolution {
    /// Keeps at most one match per target.
    ///
    /// Matches below `threshold` are dropped. The rest are ranked by
    /// confidence, highest first, with ties left in emission order; the
    /// first match to reach a target keeps it and every later one is
    /// recorded as skipped.
    pub fn resolve(matches: &[Match], threshold: f32) -> Self {
        let mut ranked: Vec<&Match> = matches
            .iter()
            .filter(|m| m.confidence >= threshold)
            .collect();
        ranked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        let mut seen = BTreeSet::new();
        let mut kept = Vec::new();
        let mut skipped = Vec::new();
        for m in ranked {
            if seen.insert(m.target_name.as_str()) {
                kept.push(m.clone());
            } else {
                skipped.push(SkippedMatch {
                    matched: m.clone(),
                    reason: SkipReason::DuplicateTarget,
                });
            }
        }
        Self {
            threshold,
            kept,
            skipped,
        }
    }

    pub fn status(&self) -> ResolutionStatus {
        if self.kept.is_empty() {
            ResolutionStatus::Empty {
                message: format!(
                    "no matches meet the confidence threshold ({:.2})",
                    self.threshold
                ),
            }
        } else {
            ResolutionStatus::Resolved {
                kept: self.kept.len(),
                skipped: self.skipped.len(),
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }

    /// Total matches that cleared the threshold, kept or skipped.
    pub fn candidate_count(&self) -> usize {
        self.kept.len() + self.skipped.len()
    }

    pub fn kept_targets(&self) -> BTreeSet<&str> {
        self.kept.iter().map(|m| m.target_name.as_str()).collect()
    }
}

impl MatchSet {
    /// See [`Resolution::resolve`]. The set itself is left untouched.
    pub fn resolve(&self, threshold: f32) -> Resolution {
        Resolution::resolve(self.as_slice(), threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MatchType;

    fn candidates() -> MatchSet {
        MatchSet::from(vec![
            Match::new("FL Susp Pos", "CmpT_L1", 0.95, MatchType::Suspension, ""),
            Match::new("FL Susp Pos", "Jnc_L1", 1.0, MatchType::Suspension, ""),
            Match::new("Susp Pos FL", "Jnc_L1", 0.95, MatchType::Suspension, ""),
            Match::new("Gear", "Gear_OL", 0.85, MatchType::Powertrain, ""),
            Match::new("Gear", "GearStat", 1.0, MatchType::Powertrain, ""),
        ])
    }

    #[test]
    fn keeps_highest_confidence_per_target() {
        let resolution = candidates().resolve(0.9);
        let kept: Vec<(&str, &str)> = resolution
            .kept
            .iter()
            .map(|m| (m.source_name.as_str(), m.target_name.as_str()))
            .collect();
        assert_eq!(
            kept,
            vec![
                ("FL Susp Pos", "Jnc_L1"),
                ("Gear", "GearStat"),
                ("FL Susp Pos", "CmpT_L1"),
            ]
        );
        assert_eq!(resolution.skipped.len(), 1);
        let skipped = &resolution.skipped[0];
        assert_eq!(skipped.matched.source_name, "Susp Pos FL");
        assert_eq!(skipped.matched.confidence, 0.95);
        assert_eq!(skipped.reason.to_string(), "duplicate target");
    }

    #[test]
    fn ties_keep_emission_order() {
        let set = MatchSet::from(vec![
            Match::new("Odometer", "Station", 0.9, MatchType::Distance, ""),
            Match::new("Distance", "Station", 0.9, MatchType::Distance, ""),
        ]);
        let resolution = set.resolve(0.9);
        assert_eq!(resolution.kept[0].source_name, "Odometer");
        assert_eq!(resolution.skipped[0].matched.source_name, "Distance");
    }

    #[test]
    fn threshold_drops_low_matches() {
        let resolution = candidates().resolve(DEFAULT_EXPORT_THRESHOLD);
        assert!(resolution.kept.iter().all(|m| m.confidence >= 0.9));
        assert!(resolution.kept.iter().all(|m| m.target_name != "Gear_OL"));
        assert_eq!(resolution.candidate_count(), 4);
    }

    #[test]
    fn resolving_leaves_the_input_intact() {
        let set = candidates();
        let _ = set.resolve(0.99);
        assert_eq!(set.len(), 5);
    }

    #[test]
    fn empty_resolution_reports_threshold() {
        let resolution = Resolution {
            threshold: 0.9,
            kept: Vec::new(),
            skipped: Vec::new(),
        };
        match resolution.status() {
            ResolutionStatus::Empty { message } => assert!(message.contains("0.90")),
            other => panic!("expected empty status, got {other:?}"),
        }
    }

    #[test]
    fn skipped_reason_serializes_as_text() {
        let skipped = SkippedMatch {
            matched: Match::new("FL Susp Pos", "CmpT_L1", 0.95, MatchType::Suspension, ""),
            reason: SkipReason::DuplicateTarget,
        };
        let json = serde_json::to_string(&skipped).unwrap();
        assert!(json.contains("\"reason\":\"duplicate target\""));
        assert!(json.contains("\"target_name\":\"CmpT_L1\""));
    }
}
