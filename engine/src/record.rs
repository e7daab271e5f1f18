//! Record types for resource data.
//!
//! Records are opaque field-key to value mappings. Their shape is owned by
//! the remote service and discovered at runtime; the engine never assumes a
//! fixed struct per resource type.

use crate::{error::Result, Error, FieldKey};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single resource record: an ordered mapping from field key to value.
///
/// Wraps a JSON object so wire payloads round-trip without a wrapper key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self { fields: Map::new() }
    }

    /// Build a record from a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(Error::InvalidField {
                field: String::new(),
                message: format!("expected object record, got {}", json_type_name(&other)),
            }),
        }
    }

    /// Get a field value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Set a field value.
    pub fn set(&mut self, key: impl Into<FieldKey>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    /// Field keys in encounter order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.fields.keys()
    }

    /// Check whether the record carries no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The record's identifier, from the conventional `id` field.
    ///
    /// Accepts string and integer ids; anything else is treated as absent.
    pub fn id(&self) -> Option<String> {
        match self.fields.get("id") {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }

    /// String-coerce a field value for display and search.
    ///
    /// Strings pass through verbatim, numbers and booleans render via
    /// Display, null and missing coerce to the empty string, arrays join
    /// their element coercions with `", "`, nested objects coerce to empty.
    pub fn display_value(&self, key: &str) -> String {
        self.get(key).map(coerce_value).unwrap_or_default()
    }

    /// Merge a partial payload over this record, replacing matching keys.
    ///
    /// Used by update flows when the server echoes only the patch.
    pub fn merge(&mut self, patch: &Record) {
        for (key, value) in &patch.fields {
            self.fields.insert(key.clone(), value.clone());
        }
    }

    /// View the underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Convert into a JSON value.
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

/// String coercion shared with the format registry.
pub(crate) fn coerce_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(coerce_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => String::new(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
