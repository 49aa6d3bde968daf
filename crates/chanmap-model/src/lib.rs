pub mod dictionary;
pub mod error;
pub mod matching;
pub mod resolution;
pub mod summary;

pub use dictionary::DictionaryEntry;
pub use error::ModelError;
pub use matching::{Match, MatchSet, MatchType, parse_confidence};
pub use resolution::{
    DEFAULT_EXPORT_THRESHOLD, Resolution, ResolutionStatus, SkipReason, SkippedMatch,
};
pub use summary::{ConfidenceBand, MatchSummary};
