//! Match records produced by the matching passes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Which pass or rule family produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MatchType {
    Exact,
    Acceleration,
    Gyroscope,
    Wheel,
    Suspension,
    Brake,
    Temperature,
    #[serde(rename = "Engine/Powertrain")]
    Powertrain,
    #[serde(rename = "GPS")]
    Gps,
    Velocity,
    Fuel,
    Distance,
    Steering,
    #[serde(rename = "Dictionary-Medium")]
    DictionaryMedium,
    #[serde(rename = "Dictionary-High")]
    DictionaryHigh,
    #[serde(rename = "Dictionary-Exact")]
    DictionaryExact,
    Semantic,
}

impl MatchType {
    pub const ALL: [MatchType; 17] = [
        Self::Exact,
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
        Self::DictionaryMedium,
        Self::DictionaryHigh,
        Self::DictionaryExact,
        Self::Semantic,
    ];

    /// Label used in match tables and audit output.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Exact => "Exact",
            Self::Acceleration => "Acceleration",
            Self::Gyroscope => "Gyroscope",
            Self::Wheel => "Wheel",
            Self::Suspension => "Suspension",
            Self::Brake => "Brake",
            Self::Temperature => "Temperature",
            Self::Powertrain => "Engine/Powertrain",
            Self::Gps => "GPS",
            Self::Velocity => "Velocity",
            Self::Fuel => "Fuel",
            Self::Distance => "Distance",
            Self::Steering => "Steering",
            Self::DictionaryMedium => "Dictionary-Medium",
            Self::DictionaryHigh => "Dictionary-High",
            Self::DictionaryExact => "Dictionary-Exact",
            Self::Semantic => "Semantic",
        }
    }

    /// True for matches produced by the dictionary or semantic passes.
    #[must_use]
    pub fn is_generic(self) -> bool {
        matches!(
            self,
            Self::DictionaryMedium | Self::DictionaryHigh | Self::DictionaryExact | Self::Semantic
        )
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MatchType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModelError::UnknownMatchType(trimmed.to_string()))
    }
}

/// A proposed mapping from one source channel to one target channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Source (logger) channel name, verbatim.
    pub source_name: String,
    /// Target (simulator) channel name, verbatim.
    pub target_name: String,
    /// Confidence in [0, 1].
    pub confidence: f32,
    pub match_type: MatchType,
    /// Free-text reason for the match.
    pub note: String,
    /// Dictionary longhand of the target, when known.
    #[serde(default)]
    pub description: String,
}

impl Match {
    pub fn new(
        source_name: impl Into<String>,
        target_name: impl Into<String>,
        confidence: f32,
        match_type: MatchType,
        note: impl Into<String>,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            target_name: target_name.into(),
            confidence: confidence.clamp(0.0, 1.0),
            match_type,
            note: note.into(),
            description: String::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Parses a confidence value as written in a match table.
///
/// Values outside `[0, 1]` and non-numeric text are rejected.
pub fn parse_confidence(text: &str) -> Result<f32, ModelError> {
    let trimmed = text.trim();
    match trimmed.parse::<f32>() {
        Ok(value) if (0.0..=1.0).contains(&value) => Ok(value),
        _ => Err(ModelError::ConfidenceOutOfRange(trimmed.to_string())),
    }
}

/// Matches accumulated across all passes, in emission order.
///
/// Duplicates are expected here: one source may map to several targets and
/// several sources may share a target until the set is resolved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchSet {
    matches: Vec<Match>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, m: Match) {
        self.matches.push(m);
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Match> {
        self.matches.iter()
    }

    pub fn as_slice(&self) -> &[Match] {
        &self.matches
    }

    pub fn into_vec(self) -> Vec<Match> {
        self.matches
    }

    pub fn for_source<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a Match> + 'a {
        self.matches.iter().filter(move |m| m.source_name == source)
    }

    pub fn for_target<'a>(&'a self, target: &'a str) -> impl Iterator<Item = &'a Match> + 'a {
        self.matches.iter().filter(move |m| m.target_name == target)
    }

    /// Count of matches produced by each match type.
    pub fn count_by_type(&self) -> std::collections::BTreeMap<MatchType, usize> {
        let mut counts = std::collections::BTreeMap::new();
        for m in &self.matches {
            *counts.entry(m.match_type).or_insert(0) += 1;
        }
        counts
    }
}

impl Extend<Match> for MatchSet {
    fn extend<I: IntoIterator<Item = Match>>(&mut self, iter: I) {
        self.matches.extend(iter);
    }
}

impl FromIterator<Match> for MatchSet {
    fn from_iter<I: IntoIterator<Item = Match>>(iter: I) -> Self {
        Self {
            matches: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Match>> for MatchSet {
    fn from(matches: Vec<Match>) -> Self {
        Self { matches }
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = &'a Match;
    type IntoIter = std::slice::Iter<'a, Match>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.iter()
    }
}

impl IntoIterator for MatchSet {
    type Item = Match;
    type IntoIter = std::vec::IntoIter<Match>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.into_iter()
    }
}
