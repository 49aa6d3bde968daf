//! Word-token extraction for set-based similarity.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::normalize::normalize;

/// Parenthesized suffixes such as `(g)` or `(deg/s)` are unit annotations.
static UNIT_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("unit annotation pattern is valid"));

/// Splits a channel name into its set of meaningful word tokens.
///
/// Unit annotations are removed first, then the name is split into maximal
/// alphanumeric runs, each run is normalized, and stopwords are dropped.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    let without_units = UNIT_ANNOTATION.replace_all(text, " ");
    without_units
        .split(|ch: char| !ch.is_alphanumeric())
        .map(normalize)
        .filter(|token| !token.is_empty() && !is_stopword(token))
        .collect()
}

pub fn is_stopword(token: &str) -> bool {
    matches!(
        token,
        "the" | "of" | "for" | "at" | "in" | "on" | "to" | "a" | "an" | "and" | "is"
    )
}
