use std::collections::BTreeSet;

use crate::normalize::normalize;
use crate::notation::{Corner, extract_position};
use crate::tokenize::tokenize;

/// A channel name exactly as it appears in a schema header.
///
/// Derived forms are computed on demand; the raw name is never altered.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Variable {
    raw: String,
}

impl Variable {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn normalized(&self) -> String {
        normalize(&self.raw)
    }

    pub fn tokens(&self) -> BTreeSet<String> {
        tokenize(&self.raw)
    }

    /// Wheel corner named in the channel, in logger notation.
    pub fn position(&self) -> Option<Corner> {
        extract_position(&self.raw)
    }
}

/// Builds variables from a header row, skipping blank cells.
pub fn variables_from_headers<I, S>(headers: I) -> Vec<Variable>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    headers
        .into_iter()
        .filter(|name| !name.as_ref().trim().is_empty())
        .map(|name| Variable::new(name.as_ref()))
        .collect()
}
