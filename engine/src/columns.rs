//! Column projection: deriving a display column list from a schema, an
//! explicit key order, or a sample record.
//!
//! Explicit key order exists to decouple wire-record key order (owned by
//! the backend, unstable) from display order (owned by the UI, stable).

use crate::{FieldKey, FieldSchema, Record};
use serde::{Deserialize, Serialize};

/// One display column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub key: FieldKey,
    pub label: String,
}

impl Column {
    pub fn new(key: impl Into<FieldKey>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

/// Where the column list comes from. Resolved once per projection,
/// never re-inferred per record.
#[derive(Debug, Clone)]
pub enum ColumnSource<'a> {
    /// Caller-supplied ordered keys, used verbatim.
    Explicit(&'a [FieldKey]),
    /// Schema order of the first section.
    FromSchema(&'a FieldSchema),
    /// Key order of the first non-empty record in the set.
    Inferred,
}

/// Derive the column list for a record set.
///
/// An empty record set with an [`ColumnSource::Inferred`] source yields an
/// empty column list, never an error. Keys absent from individual records
/// are tolerated and render as empty cells downstream.
pub fn project(records: &[Record], source: ColumnSource<'_>) -> Vec<Column> {
    match source {
        ColumnSource::Explicit(keys) => keys
            .iter()
            .map(|key| Column::new(key.clone(), label_from_key(key)))
            .collect(),
        ColumnSource::FromSchema(schema) => schema
            .sections
            .first()
            .map(|section| {
                section
                    .fields
                    .iter()
                    .map(|f| Column::new(f.name.clone(), f.label.clone()))
                    .collect()
            })
            .unwrap_or_default(),
        ColumnSource::Inferred => records
            .iter()
            .find(|r| !r.is_empty())
            .map(|sample| {
                sample
                    .keys()
                    .map(|key| Column::new(key.clone(), label_from_key(key)))
                    .collect()
            })
            .unwrap_or_default(),
    }
}

/// Derive a human-readable label from a machine key: insert a space before
/// each uppercase ASCII letter, then capitalize the first character only.
///
/// `candidateFullName` becomes `Candidate Full Name`.
pub fn label_from_key(key: &str) -> String {
    let mut label = String::with_capacity(key.len() + 4);
    for (i, c) in key.chars().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            label.push(' ');
        }
        if i == 0 {
            label.extend(c.to_uppercase());
        } else {
            label.push(c);
        }
    }
    label
}
