//! Canonical forms of channel names used for comparison.

/// Lowercases and drops every character outside `[a-z0-9]`.
///
/// `"C185 G Force Lat"` becomes `"c185gforcelat"`. Idempotent.
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit())
        .collect()
}

/// Removes all whitespace, keeping case and punctuation.
///
/// Dictionary keys are compared in this form.
pub fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|ch| !ch.is_whitespace()).collect()
}
