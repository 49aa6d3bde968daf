//! Channel matching between a data logger schema and a simulator schema.
//!
//! The [`MatchEngine`] runs an exact pass, the domain [`rules`], then
//! optional dictionary and semantic passes over the generic [`score`]
//! metrics. Its output is unresolved; call [`MatchSet::resolve`] to keep one
//! match per target.
//!
//! [`MatchSet::resolve`]: chanmap_model::MatchSet::resolve

pub mod claims;
pub mod dictionary;
pub mod engine;
pub mod normalize;
pub mod notation;
pub mod rules;
pub mod score;
pub mod tokenize;
pub mod variable;

pub use claims::ClaimSet;
pub use dictionary::Dictionary;
pub use engine::{MatchEngine, MatchOptions, Pass};
pub use normalize::{normalize, strip_whitespace};
pub use notation::{Axis, Corner, Direction, extract_position, translate_position};
pub use rules::{PatternRule, RuleFamily, RuleLibrary};
pub use score::{SimilarityMetric, sequence_ratio, token_similarity};
pub use tokenize::tokenize;
pub use variable::{Variable, variables_from_headers};
