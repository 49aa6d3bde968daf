//! Similarity scoring between channel names or their descriptions.
//!
//! Two metrics are available:
//! - token-set Jaccard with a bonus for tokens that name the same physical
//!   quantity in different vocabularies (`gyro` vs `av`, `susp` vs `jounce`)
//! - character-sequence ratio (`2 * LCS / (|a| + |b|)`) over normalized text
//!
//! Both are symmetric and bounded to `[0, 1]`.

use std::collections::BTreeSet;

use rapidfuzz::distance::indel;
use serde::{Deserialize, Serialize};

use crate::normalize::normalize;
use crate::tokenize::tokenize;

/// Bonus per cross-vocabulary token pair.
const SEMANTIC_PAIR_BONUS: f64 = 0.1;
/// Cap on the total semantic bonus.
const SEMANTIC_BONUS_CAP: f64 = 0.3;

/// Tokens in the same class name the same quantity.
const EQUIVALENCE_CLASSES: &[&[&str]] = &[
    &["gforce", "accel", "acceleration", "a"],
    &["gyro", "rate", "av", "angularvelocity"],
    &["speed", "velocity", "v", "spin"],
    &["susp", "suspension", "jounce", "compression", "cmp"],
    &["brake", "bk", "pbk"],
    &["temp", "temperature", "t"],
    &["rotor", "rtr"],
    &["wheel", "whl"],
    &["engine", "eng"],
    &["throttle", "thr"],
    &["steer", "str"],
    &["fuel", "qfuel", "mfuel"],
];

/// Which metric the generic matching passes use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimilarityMetric {
    /// Token-set Jaccard plus semantic bonus.
    #[default]
    TokenSet,
    /// Character-sequence ratio on normalized text.
    Sequence,
}

impl SimilarityMetric {
    pub fn score(self, left: &str, right: &str) -> f64 {
        match self {
            Self::TokenSet => token_similarity(left, right),
            Self::Sequence => sequence_ratio(left, right),
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::TokenSet => "token-set",
            Self::Sequence => "sequence",
        }
    }
}

/// Token-set similarity of two raw strings.
pub fn token_similarity(left: &str, right: &str) -> f64 {
    token_set_similarity(&tokenize(left), &tokenize(right))
}

/// Jaccard overlap of two token sets plus the semantic bonus, capped at 1.
pub fn token_set_similarity(left: &BTreeSet<String>, right: &BTreeSet<String>) -> f64 {
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    let intersection = left.intersection(right).count();
    let union = left.union(right).count();
    let jaccard = intersection as f64 / union as f64;
    (jaccard + semantic_bonus(left, right)).min(1.0)
}

/// 0.1 for every pair of distinct tokens, one from each side, that share an
/// equivalence class; at most 0.3.
pub fn semantic_bonus(left: &BTreeSet<String>, right: &BTreeSet<String>) -> f64 {
    let mut pairs = 0usize;
    for l in left {
        let Some(class) = equivalence_class(l) else {
            continue;
        };
        for r in right {
            if l != r && equivalence_class(r) == Some(class) {
                pairs += 1;
            }
        }
    }
    (pairs as f64 * SEMANTIC_PAIR_BONUS).min(SEMANTIC_BONUS_CAP)
}

/// Index of the equivalence class containing `token`, if any.
pub fn equivalence_class(token: &str) -> Option<usize> {
    EQUIVALENCE_CLASSES
        .iter()
        .position(|class| class.contains(&token))
}

/// Character-sequence ratio over normalized text; 0 when either side is empty.
pub fn sequence_ratio(left: &str, right: &str) -> f64 {
    let left = normalize(left);
    let right = normalize(right);
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    indel::normalized_similarity(left.chars(), right.chars())
}
