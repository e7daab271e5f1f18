//! Field schema definition and validation.
//!
//! A schema declares the editable/displayable attributes of one resource
//! type, grouped into sections. The same schema drives both data-entry
//! forms and tabular display; adding a resource means writing a schema,
//! not per-resource rendering code.

use crate::{error::Result, Error, FieldKey, Record};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Field types supported in schemas.
///
/// This is a closed set: each type selects both a rendering widget and a
/// normalizer from the format registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    Phone,
    Date,
    Number,
    Select,
    Textarea,
    File,
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FieldType::Text => "Text",
            FieldType::Email => "Email",
            FieldType::Phone => "Phone",
            FieldType::Date => "Date",
            FieldType::Number => "Number",
            FieldType::Select => "Select",
            FieldType::Textarea => "Textarea",
            FieldType::File => "File",
        };
        write!(f, "{name}")
    }
}

/// One choice in a select field's option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Optional input constraints for a field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraints {
    /// Minimum numeric value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Maximum numeric value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Maximum input length in characters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    /// Accepted file types (for file fields)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept: Option<String>,
}

/// Declarative description of one editable/displayable field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Machine key, stable across the resource type
    pub name: FieldKey,
    /// Human-readable label
    pub label: String,
    /// Field type, selects widget and normalizer
    pub field_type: FieldType,
    /// Whether the field must be present and non-blank
    pub required: bool,
    /// Ordered options for select fields
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    /// Input constraints
    #[serde(default, skip_serializing_if = "is_default_constraints")]
    pub constraints: Constraints,
}

fn is_default_constraints(c: &Constraints) -> bool {
    *c == Constraints::default()
}

impl FieldDescriptor {
    /// Create a required field.
    pub fn required(
        name: impl Into<FieldKey>,
        label: impl Into<String>,
        field_type: FieldType,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            field_type,
            required: true,
            options: Vec::new(),
            constraints: Constraints::default(),
        }
    }

    /// Create an optional field.
    pub fn optional(
        name: impl Into<FieldKey>,
        label: impl Into<String>,
        field_type: FieldType,
    ) -> Self {
        Self {
            required: false,
            ..Self::required(name, label, field_type)
        }
    }

    /// Builder-style method to attach select options.
    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }

    /// Builder-style method to attach constraints.
    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = constraints;
        self
    }
}

/// An ordered group of fields under a section title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub title: String,
    pub fields: Vec<FieldDescriptor>,
}

impl Section {
    pub fn new(title: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            title: title.into(),
            fields,
        }
    }
}

/// The full field schema for one resource type.
///
/// Construction validates the cross-section invariant that every field name
/// is unique. Schemas are plain data: building one from the same inputs
/// always yields the same schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    pub sections: Vec<Section>,
}

impl FieldSchema {
    /// Create a schema from ordered sections.
    ///
    /// Fails with [`Error::DuplicateField`] if a field name appears more
    /// than once across all sections.
    pub fn new(sections: Vec<Section>) -> Result<Self> {
        let mut seen = HashSet::new();
        for section in &sections {
            for field in &section.fields {
                if !seen.insert(field.name.as_str()) {
                    return Err(Error::DuplicateField(field.name.clone()));
                }
            }
        }
        Ok(Self { sections })
    }

    /// Look up a field descriptor by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields().find(|f| f.name == name)
    }

    /// All fields in schema order (section by section).
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    /// Names of all required fields.
    pub fn required_fields(&self) -> Vec<FieldKey> {
        self.fields()
            .filter(|f| f.required)
            .map(|f| f.name.clone())
            .collect()
    }

    /// Validate that a payload carries every required field, non-blank.
    ///
    /// Reports the first offending field name so forms can render an inline
    /// message next to it.
    pub fn validate_payload(&self, payload: &Record) -> Result<()> {
        for field in self.fields().filter(|f| f.required) {
            let blank = match payload.get(&field.name) {
                None | Some(serde_json::Value::Null) => true,
                Some(serde_json::Value::String(s)) => s.trim().is_empty(),
                Some(_) => false,
            };
            if blank {
                return Err(Error::MissingRequiredField(field.name.clone()));
            }
        }
        Ok(())
    }
}
