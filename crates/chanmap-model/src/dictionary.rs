use serde::{Deserialize, Serialize};

/// One row of the reference table: a cryptic code and its descriptive text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub shorthand: String,
    pub longhand: String,
}

impl DictionaryEntry {
    pub fn new(shorthand: impl Into<String>, longhand: impl Into<String>) -> Self {
        Self {
            shorthand: shorthand.into(),
            longhand: longhand.into(),
        }
    }

    /// Rows missing either side are not usable for lookup.
    pub fn is_complete(&self) -> bool {
        !self.shorthand.trim().is_empty() && !self.longhand.trim().is_empty()
    }
}
