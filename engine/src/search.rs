//! Free-text filtering over projected columns.
//!
//! A pure recomputation over `(records, query)` per keystroke. List sizes
//! here are hundreds of rows, not millions; no incremental index.

use crate::{Column, Record};

/// Filter a record set against a free-text query.
///
/// A blank or whitespace query is the identity: same elements, same order,
/// returned as a fresh vector. Otherwise a record survives when any column
/// value, string-coerced and lowercased, contains the lowercased trimmed
/// query as a substring. The input collection is never mutated.
pub fn filter(records: &[Record], columns: &[Column], query: &str) -> Vec<Record> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|record| matches(record, columns, &needle))
        .cloned()
        .collect()
}

fn matches(record: &Record, columns: &[Column], needle: &str) -> bool {
    columns
        .iter()
        .any(|column| record.display_value(&column.key).to_lowercase().contains(needle))
}
