//! Toxic-word dictionary.
//!
//! The dictionary is loaded once from a whitespace-separated word list and is
//! read-only afterwards. Source words go through the same [`normalize`] as
//! comment tokens, so `"Idiot!"` in the word list matches `"idiot"` in a
//! comment.

use std::collections::HashSet;

use camino::Utf8Path;

use crate::error::{SourceError, SourceResult};
use crate::normalize::{normalize, tokens};

/// Default dictionary file name, looked up relative to the working directory.
pub const DEFAULT_DICTIONARY_FILE: &str = "toxicwords.txt";

/// An immutable set of canonical toxic words.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: HashSet<String>,
    skipped: usize,
}

impl Dictionary {
    /// Build a dictionary from whitespace-separated source text.
    ///
    /// When `capacity` is set, distinct entries beyond it are not loaded; the
    /// number dropped is available from [`Dictionary::skipped`].
    #[tracing::instrument(skip(text), fields(text_len = text.len()))]
    pub fn from_text(text: &str, capacity: Option<usize>) -> Self {
        Self::from_words(tokens(text), capacity)
    }

    /// Build a dictionary from an iterator of raw words.
    pub fn from_words<I, S>(raw_words: I, capacity: Option<usize>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words = HashSet::new();
        let mut skipped = 0;

        for raw in raw_words {
            let word = normalize(raw.as_ref());
            if word.is_empty() || words.contains(&word) {
                continue;
            }
            if capacity.is_some_and(|max| words.len() >= max) {
                skipped += 1;
                continue;
            }
            words.insert(word);
        }

        if skipped > 0 {
            tracing::warn!(
                loaded = words.len(),
                skipped,
                "dictionary capacity reached, remaining entries ignored"
            );
        }

        Self { words, skipped }
    }

    /// Read and build a dictionary from a file.
    ///
    /// A missing file is reported as [`SourceError::NotFound`] so the caller
    /// can fall back to [`Dictionary::default`]. Bytes that are not valid
    /// UTF-8 are decoded lossily and then dropped by normalization.
    #[tracing::instrument(skip(path), fields(path = %path))]
    pub fn load_file(path: &Utf8Path, capacity: Option<usize>) -> SourceResult<Self> {
        let bytes =
            std::fs::read(path.as_std_path()).map_err(|e| SourceError::from_io(path, e))?;
        let dictionary = Self::from_text(&String::from_utf8_lossy(&bytes), capacity);
        if dictionary.is_empty() {
            tracing::warn!(path = %path, "dictionary file contains no words");
        } else {
            tracing::info!(path = %path, words = dictionary.len(), "dictionary loaded");
        }
        Ok(dictionary)
    }

    /// Exact-match membership test on a canonical word.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of distinct entries loaded.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if no entries were loaded.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Number of distinct entries dropped because of the capacity limit.
    pub const fn skipped(&self) -> usize {
        self.skipped
    }
}
