//! Text normalization for fuzzy track matching.
//!
//! Platform metadata is noisy: titles carry "(feat. X)" and "(Remastered)"
//! suffixes, artist names differ in casing and punctuation between services.
//! This module reduces free-form strings to comparable token sets so the
//! matcher can score overlap instead of demanding exact equality.

use std::collections::BTreeSet;

/// Reduces a string to its comparable token set.
///
/// Lowercases the input, strips every character that is neither alphanumeric
/// nor whitespace, splits on whitespace, and collects the resulting words
/// into a set (duplicates collapse, order is irrelevant). Empty or
/// punctuation-only input yields an empty set.
///
/// A [`BTreeSet`] is used so iteration order is deterministic, which keeps
/// downstream behavior reproducible.
///
/// # Examples
///
/// ```
/// use harmonize::normalize::tokenize;
///
/// let tokens = tokenize("Blinding Lights (Remix)");
/// assert!(tokens.contains("blinding"));
/// assert!(tokens.contains("lights"));
/// assert!(tokens.contains("remix"));
/// assert_eq!(tokens.len(), 3);
/// ```
#[must_use]
pub fn tokenize(s: &str) -> BTreeSet<String> {
    s.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Renders a string in canonical normalized form: lowercase tokens joined
/// by single spaces, punctuation removed, duplicates collapsed.
///
/// Used for building platform search queries and cache keys. Normalization
/// is idempotent: `normalized_string(&normalized_string(s)) == normalized_string(s)`.
#[must_use]
pub fn normalized_string(s: &str) -> String {
    tokenize(s).into_iter().collect::<Vec<_>>().join(" ")
}

/// Case-insensitive identity key for names (artists, genres, composite
/// track keys). Trimmed and lowercased, punctuation preserved: two names
/// are the same item iff their keys are equal.
#[must_use]
pub fn name_key(s: &str) -> String {
    s.trim().to_lowercase()
}
