//! Shorthand → longhand lookup built once per run from the reference table.

use std::collections::BTreeMap;

use chanmap_model::DictionaryEntry;
use tracing::debug;

use crate::normalize::strip_whitespace;
use crate::score::token_similarity;

/// Read-only code dictionary.
///
/// Lookups are whitespace-insensitive but case-sensitive: `"AV Eng"` finds
/// the entry for `AV_Eng` only if the underscore is also present. A miss is
/// never an error; callers get their input back.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: Vec<DictionaryEntry>,
    index: BTreeMap<String, usize>,
}

impl Dictionary {
    /// Builds the dictionary, dropping incomplete rows.
    ///
    /// When a shorthand appears more than once the first row wins.
    pub fn load<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = DictionaryEntry>,
    {
        let mut entries = Vec::new();
        let mut index = BTreeMap::new();
        let mut dropped = 0usize;
        for entry in rows {
            if !entry.is_complete() {
                dropped += 1;
                continue;
            }
            let key = strip_whitespace(&entry.shorthand);
            index.entry(key).or_insert(entries.len());
            entries.push(entry);
        }
        debug!(
            entries = entries.len(),
            keys = index.len(),
            dropped,
            "dictionary loaded"
        );
        Self { entries, index }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[DictionaryEntry] {
        &self.entries
    }

    /// Longhand for `code`, if the table has it.
    pub fn lookup(&self, code: &str) -> Option<&str> {
        self.index
            .get(&strip_whitespace(code))
            .map(|&idx| self.entries[idx].longhand.as_str())
    }

    /// Longhand for `code`, or `code` itself when unknown.
    pub fn describe<'a>(&'a self, code: &'a str) -> &'a str {
        self.lookup(code).unwrap_or(code)
    }

    /// The longhand that best matches `code` by token similarity.
    ///
    /// Returns `code` unchanged unless the best score exceeds `threshold`.
    /// Ties keep the earliest entry in table order.
    pub fn best_semantic_match<'a>(&'a self, code: &'a str, threshold: f64) -> &'a str {
        best_longhand(
            code,
            self.entries.iter().map(|entry| entry.longhand.as_str()),
            threshold,
        )
    }
}

/// Like [`Dictionary::best_semantic_match`], over `longhands` only.
pub fn best_longhand<'a, I>(code: &'a str, longhands: I, threshold: f64) -> &'a str
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&str, f64)> = None;
    for longhand in longhands {
        let score = token_similarity(code, longhand);
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((longhand, score));
        }
    }
    match best {
        Some((longhand, score)) if score > threshold => longhand,
        _ => code,
    }
}
