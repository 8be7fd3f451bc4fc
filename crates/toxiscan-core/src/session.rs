//! Analysis session: one dictionary, one word table, explicit limits.
//!
//! The session is the single owner of the state the engine mutates. Loading
//! a comment text resets the table first, so results never carry over from a
//! previous file.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dictionary::Dictionary;
use crate::normalize::{Normalized, normalize_bounded, tokens};
use crate::rank::ranked;
use crate::report::{Summary, top_toxic_words, top_words};
use crate::table::{Update, WordRecord, WordTable};

/// Optional bounds on a session. `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::Args))]
pub struct Limits {
    /// Maximum number of distinct words tracked per run
    #[cfg_attr(feature = "clap", arg(long, global = true, value_name = "N"))]
    pub max_unique_words: Option<usize>,
    /// Maximum canonical word length; longer words are rejected
    #[cfg_attr(feature = "clap", arg(long, global = true, value_name = "N"))]
    pub max_word_len: Option<usize>,
}

impl Limits {
    /// Fill unset bounds from `fallback`.
    pub const fn or(self, fallback: Self) -> Self {
        Self {
            max_unique_words: match self.max_unique_words {
                Some(n) => Some(n),
                None => fallback.max_unique_words,
            },
            max_word_len: match self.max_word_len {
                Some(n) => Some(n),
                None => fallback.max_word_len,
            },
        }
    }
}

/// Counters describing one pass over a comment source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LoadSummary {
    /// Raw whitespace-separated tokens read.
    pub tokens_read: usize,
    /// Tokens that were counted in the table.
    pub words_counted: usize,
    /// Tokens that normalized to nothing.
    pub empty_discarded: usize,
    /// Tokens rejected for exceeding the word length limit.
    pub oversized_rejected: usize,
    /// New words rejected because the table was full.
    pub capacity_rejected: usize,
    /// Distinct words in the table after the pass.
    pub unique_words: usize,
}

impl LoadSummary {
    /// Returns `true` if some words were dropped because the table was full.
    pub const fn is_truncated(&self) -> bool {
        self.capacity_rejected > 0
    }
}

/// Everything a caller needs to present one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisReport {
    /// Aggregate statistics.
    pub summary: Summary,
    /// Counters from the most recent load, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load: Option<LoadSummary>,
    /// Highest-frequency words, in ranked order.
    pub top_words: Vec<WordRecord>,
    /// Highest-frequency toxic words, in ranked order.
    pub top_toxic_words: Vec<WordRecord>,
}

/// Owns the dictionary and word table for a sequence of analysis runs.
#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    dictionary: Dictionary,
    table: WordTable,
    limits: Limits,
    last_load: Option<LoadSummary>,
}

impl AnalysisSession {
    /// Create a session around a loaded dictionary.
    pub fn new(dictionary: Dictionary, limits: Limits) -> Self {
        Self {
            dictionary,
            table: WordTable::with_capacity_limit(limits.max_unique_words),
            limits,
            last_load: None,
        }
    }

    /// The session's dictionary.
    pub const fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// The session's limits.
    pub const fn limits(&self) -> Limits {
        self.limits
    }

    /// The current word table.
    pub const fn table(&self) -> &WordTable {
        &self.table
    }

    /// Counters from the most recent [`load_text`](Self::load_text).
    pub const fn last_load(&self) -> Option<&LoadSummary> {
        self.last_load.as_ref()
    }

    /// Returns `true` once a comment source has been loaded.
    pub const fn has_data(&self) -> bool {
        self.last_load.is_some()
    }

    /// Clear the word table and forget the last load.
    pub fn reset(&mut self) {
        self.table.reset();
        self.last_load = None;
    }

    /// Replace the table contents with the words of `text`.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn load_text(&mut self, text: &str) -> LoadSummary {
        self.reset();
        let summary = self.ingest(tokens(text));
        if summary.is_truncated() {
            tracing::warn!(
                rejected = summary.capacity_rejected,
                unique_words = summary.unique_words,
                "word limit reached, some words ignored"
            );
        }
        tracing::info!(
            tokens = summary.tokens_read,
            words = summary.words_counted,
            unique_words = summary.unique_words,
            "comment text processed"
        );
        self.last_load = Some(summary.clone());
        summary
    }

    /// Feed raw tokens into the current table without resetting it.
    pub fn ingest<'a, I>(&mut self, raw_tokens: I) -> LoadSummary
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut summary = LoadSummary::default();

        for raw in raw_tokens {
            summary.tokens_read += 1;
            let word = match normalize_bounded(raw, self.limits.max_word_len) {
                Normalized::Word(word) => word,
                Normalized::Empty => {
                    summary.empty_discarded += 1;
                    continue;
                }
                Normalized::Oversized { len } => {
                    tracing::debug!(len, "rejecting over-long word");
                    summary.oversized_rejected += 1;
                    continue;
                }
            };

            match self.table.update(&word, &self.dictionary) {
                Update::Counted | Update::Inserted => summary.words_counted += 1,
                Update::Empty => summary.empty_discarded += 1,
                Update::Full => summary.capacity_rejected += 1,
            }
        }

        summary.unique_words = self.table.len();
        summary
    }

    /// The table's records ranked by descending frequency.
    pub fn ranking(&self) -> Vec<WordRecord> {
        ranked(self.table.records())
    }

    /// Aggregate statistics for the current table.
    pub fn summary(&self) -> Summary {
        Summary::from_records(self.table.records())
    }

    /// Assemble a full report with up to `top_n` entries per list.
    pub fn report(&self, top_n: usize) -> AnalysisReport {
        let ranking = self.ranking();
        AnalysisReport {
            summary: Summary::from_records(&ranking),
            load: self.last_load.clone(),
            top_words: top_words(&ranking, top_n).to_vec(),
            top_toxic_words: top_toxic_words(&ranking, top_n)
                .into_iter()
                .cloned()
                .collect(),
        }
    }
}
