//! Token normalization.
//!
//! A raw token is reduced to its canonical form by keeping only ASCII letters
//! and digits, lowercasing the letters, and dropping everything else without
//! leaving a gap. `"STUPID!!"` becomes `"stupid"`, `"can't"` becomes `"cant"`
//! and `"!!!"` becomes the empty string, which callers discard.

/// Split source text into raw tokens on whitespace.
pub fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}

/// Normalize a raw token into its canonical word.
///
/// Never fails. The result may be empty.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Outcome of normalizing a token under an optional length limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// A usable canonical word.
    Word(String),
    /// Nothing survived normalization.
    Empty,
    /// The canonical form was longer than the limit and was rejected whole.
    Oversized {
        /// Length of the rejected canonical form, in bytes.
        len: usize,
    },
}

/// Normalize `raw`, rejecting canonical forms longer than `max_len`.
///
/// Over-long words are rejected whole, never truncated.
pub fn normalize_bounded(raw: &str, max_len: Option<usize>) -> Normalized {
    let word = normalize(raw);
    if word.is_empty() {
        return Normalized::Empty;
    }
    match max_len {
        Some(max) if word.len() > max => Normalized::Oversized { len: word.len() },
        _ => Normalized::Word(word),
    }
}
