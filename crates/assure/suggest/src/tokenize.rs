//! Risk-text normalization.

use std::collections::BTreeSet;

/// Words carrying no matching signal in risk descriptions.
const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "can", "could", "for", "from", "has", "have",
    "in", "into", "is", "it", "its", "may", "might", "not", "of", "on", "or", "our", "risk",
    "that", "the", "their", "this", "to", "when", "will", "with",
];

/// Normalize free text into a token set: lowercase, split on
/// non-alphanumeric characters, stopwords and empty tokens dropped.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty() && !STOPWORDS.contains(t))
        .map(str::to_string)
        .collect()
}
