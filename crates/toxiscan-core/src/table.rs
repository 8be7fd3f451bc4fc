//! The word table: one record per distinct canonical word.
//!
//! Records are kept in first-appearance order, which is the baseline the
//! ranker preserves for equal frequencies. A word's toxic flag is decided the
//! first time the word is seen and never recomputed.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dictionary::Dictionary;

/// Frequency and classification for one canonical word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WordRecord {
    /// The canonical word.
    pub word: String,
    /// Number of occurrences in the current analysis run (at least 1).
    pub frequency: usize,
    /// Whether the word was in the dictionary when first seen.
    pub is_toxic: bool,
}

impl WordRecord {
    /// Create a record as it looks right after its first occurrence.
    pub fn new(word: impl Into<String>, is_toxic: bool) -> Self {
        Self {
            word: word.into(),
            frequency: 1,
            is_toxic,
        }
    }

    /// Status label used in tables and reports.
    pub const fn status(&self) -> &'static str {
        if self.is_toxic { "TOXIC" } else { "CLEAN" }
    }
}

/// What [`WordTable::update`] did with a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    /// The word already had a record; its frequency went up by one.
    Counted,
    /// A new record was created.
    Inserted,
    /// The word was empty and ignored.
    Empty,
    /// The word was new but the table was full; nothing changed.
    Full,
}

/// Mapping from canonical word to [`WordRecord`] for one analysis run.
#[derive(Debug, Clone, Default)]
pub struct WordTable {
    records: Vec<WordRecord>,
    index: HashMap<String, usize>,
    capacity: Option<usize>,
}

impl WordTable {
    /// Create an unbounded, empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table holding at most `capacity` distinct words.
    pub fn with_capacity_limit(capacity: Option<usize>) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Remove every record. The capacity limit is kept.
    pub fn reset(&mut self) {
        self.records.clear();
        self.index.clear();
    }

    /// Count one occurrence of `word`.
    ///
    /// New words are classified with `dictionary` exactly once, here.
    pub fn update(&mut self, word: &str, dictionary: &Dictionary) -> Update {
        if word.is_empty() {
            return Update::Empty;
        }

        if let Some(&slot) = self.index.get(word) {
            self.records[slot].frequency += 1;
            return Update::Counted;
        }

        if self.is_full() {
            return Update::Full;
        }

        let record = WordRecord::new(word, dictionary.contains(word));
        self.index.insert(record.word.clone(), self.records.len());
        self.records.push(record);
        Update::Inserted
    }

    /// All records in first-appearance order.
    pub fn records(&self) -> &[WordRecord] {
        &self.records
    }

    /// Look up the record for a canonical word.
    pub fn get(&self, word: &str) -> Option<&WordRecord> {
        self.index.get(word).map(|&slot| &self.records[slot])
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the table holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn is_full(&self) -> bool {
        self.capacity.is_some_and(|max| self.records.len() >= max)
    }
}
