//! Statistics and text rendering over ranked word records.
//!
//! Everything here is read-only and performs no I/O. The `render_*`
//! functions return text; printing it or writing it to a file is up to the
//! caller.

use std::fmt::Write as _;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::table::WordRecord;

/// Number of entries written to a saved report when no limit is configured.
pub const DEFAULT_REPORT_LIMIT: usize = 20;

/// Title line of a saved report.
pub const REPORT_TITLE: &str = "CYBERBULLYING ANALYSIS REPORT";

/// Width of the word column in tables and reports.
const WORD_COLUMN: usize = 20;

/// Aggregate statistics for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Summary {
    /// Number of distinct canonical words.
    pub unique_words: usize,
    /// Sum of all frequencies.
    pub total_words: usize,
    /// Sum of frequencies of toxic words.
    pub toxic_occurrences: usize,
    /// Toxic share of all words, in percent. `None` when no words were counted.
    pub toxicity_rate: Option<f64>,
}

impl Summary {
    /// Compute statistics over a set of records.
    pub fn from_records(records: &[WordRecord]) -> Self {
        Self {
            unique_words: records.len(),
            total_words: total_occurrences(records),
            toxic_occurrences: toxic_occurrences(records),
            toxicity_rate: toxicity_rate(records),
        }
    }
}

/// Sum of all frequencies.
pub fn total_occurrences(records: &[WordRecord]) -> usize {
    records.iter().map(|r| r.frequency).sum()
}

/// Sum of frequencies of records flagged toxic.
pub fn toxic_occurrences(records: &[WordRecord]) -> usize {
    records
        .iter()
        .filter(|r| r.is_toxic)
        .map(|r| r.frequency)
        .sum()
}

/// Toxic share of all occurrences, in percent.
///
/// Returns `None` when there are no occurrences at all, which is distinct
/// from a rate of `0.0`.
pub fn toxicity_rate(records: &[WordRecord]) -> Option<f64> {
    rate(toxic_occurrences(records), total_occurrences(records))
}

/// `toxic / total * 100`, or `None` when `total` is zero.
pub fn rate(toxic: usize, total: usize) -> Option<f64> {
    (total > 0).then(|| toxic as f64 / total as f64 * 100.0)
}

/// The first `n` records of a ranking.
pub fn top_words(records: &[WordRecord], n: usize) -> &[WordRecord] {
    &records[..n.min(records.len())]
}

/// The first `n` toxic records of a ranking, in ranked order.
pub fn top_toxic_words(records: &[WordRecord], n: usize) -> Vec<&WordRecord> {
    records.iter().filter(|r| r.is_toxic).take(n).collect()
}

/// Format a toxicity rate with two decimals, or `undefined`.
pub fn format_rate(rate: Option<f64>) -> String {
    rate.map_or_else(|| "undefined".to_string(), |r| format!("{r:.2}%"))
}

/// Render the general statistics block.
pub fn render_summary(summary: &Summary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- GENERAL STATISTICS ---");
    let _ = writeln!(out, "Total Unique Words: {}", summary.unique_words);
    let _ = writeln!(out, "Total Word Count: {}", summary.total_words);
    let _ = writeln!(out, "Total Toxic Occurrences: {}", summary.toxic_occurrences);
    let _ = writeln!(out, "Toxicity Rate: {}", format_rate(summary.toxicity_rate));
    out
}

/// Render the top `n` records as a word / frequency / status table.
pub fn render_table(records: &[WordRecord], n: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- TOP {n} FREQUENT WORDS ---");
    let _ = writeln!(out, "{:<WORD_COLUMN$} | {:<10} | Status", "Word", "Frequency");
    let _ = writeln!(out, "{}", "-".repeat(48));
    for r in top_words(records, n) {
        let _ = writeln!(
            out,
            "{:<WORD_COLUMN$} | {:<10} | {}",
            r.word,
            r.frequency,
            r.status()
        );
    }
    out
}

/// Render the top `n` toxic records as a word / frequency table.
pub fn render_toxic_table(records: &[WordRecord], n: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "--- TOP {n} TOXIC WORDS ---");
    let _ = writeln!(out, "{:<WORD_COLUMN$} | Frequency", "Word");
    let _ = writeln!(out, "{}", "-".repeat(32));
    let toxic = top_toxic_words(records, n);
    if toxic.is_empty() {
        let _ = writeln!(out, "Good news! No toxic words found.");
    }
    for r in toxic {
        let _ = writeln!(out, "{:<WORD_COLUMN$} | {}", r.word, r.frequency);
    }
    out
}

/// Render one report line: `word : frequency (TOXIC|CLEAN)`.
pub fn render_record_line(record: &WordRecord) -> String {
    format!(
        "{:<WORD_COLUMN$} : {} ({})",
        record.word,
        record.frequency,
        record.status()
    )
}

/// Render the saved report document for a ranking.
///
/// The layout is fixed: title and underline, aggregate statistics, then up
/// to `limit` ranked entries.
pub fn render_report_document(records: &[WordRecord], limit: usize) -> String {
    let summary = Summary::from_records(records);
    let mut out = String::new();
    let _ = writeln!(out, "{REPORT_TITLE}");
    let _ = writeln!(out, "{}", "=".repeat(REPORT_TITLE.len()));
    let _ = writeln!(out);
    let _ = writeln!(out, "Total Unique Words: {}", summary.unique_words);
    let _ = writeln!(out, "Total Word Count: {}", summary.total_words);
    let _ = writeln!(out, "Total Toxic Words: {}", summary.toxic_occurrences);
    let _ = writeln!(out, "Toxicity Level: {}", format_rate(summary.toxicity_rate));
    let _ = writeln!(out);
    let _ = writeln!(out, "--- TOP {limit} WORDS LIST ---");
    for r in top_words(records, limit) {
        let _ = writeln!(out, "{}", render_record_line(r));
    }
    out
}
