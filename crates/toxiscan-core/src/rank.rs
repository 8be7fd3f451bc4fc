//! Frequency ranking.

use std::cmp::Reverse;

use crate::table::WordRecord;

/// Order records by descending frequency.
///
/// The sort is stable: records with equal frequency keep their input order,
/// so ranking a table's records breaks ties by first appearance.
pub fn rank(mut records: Vec<WordRecord>) -> Vec<WordRecord> {
    records.sort_by_key(|r| Reverse(r.frequency));
    records
}

/// Rank a borrowed slice, cloning the records.
pub fn ranked(records: &[WordRecord]) -> Vec<WordRecord> {
    rank(records.to_vec())
}
