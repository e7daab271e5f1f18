//! Format registry: display formatters and input normalizers per field type.
//!
//! Dispatch is a closed set over [`FieldType`]. Adding a new field type
//! means extending both `display` and `normalize` here, not branching
//! ad hoc at call sites.

use crate::record::coerce_value;
use crate::{Error, FieldType, Result};
use chrono::NaiveDate;
use serde_json::Value;

/// Separator inserted between phone digit groups.
const GROUP_SEPARATOR: char = ' ';

/// Dialing-code metadata for phone normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    /// Dialing code, e.g. `+91`
    pub dial_code: &'static str,
    /// Maximum national digit count
    pub max_length: usize,
    /// Ordered digit group sizes for display
    pub groups: &'static [usize],
}

/// The fixed set of supported dialing codes.
pub const COUNTRIES: &[Country] = &[
    Country { dial_code: "+1", max_length: 10, groups: &[3, 3, 4] },
    Country { dial_code: "+44", max_length: 10, groups: &[4, 6] },
    Country { dial_code: "+49", max_length: 11, groups: &[3, 4, 4] },
    Country { dial_code: "+61", max_length: 9, groups: &[3, 3, 3] },
    Country { dial_code: "+81", max_length: 10, groups: &[2, 4, 4] },
    Country { dial_code: "+91", max_length: 10, groups: &[4, 3, 3] },
    Country { dial_code: "+971", max_length: 9, groups: &[2, 3, 4] },
];

impl Country {
    /// Look up a country by exact dialing code.
    pub fn by_dial_code(code: &str) -> Option<&'static Country> {
        COUNTRIES.iter().find(|c| c.dial_code == code)
    }

    /// Match the longest dialing-code prefix of a raw value like
    /// `+91 9876 543 210`.
    pub fn by_prefix(raw: &str) -> Option<&'static Country> {
        COUNTRIES
            .iter()
            .filter(|c| raw.starts_with(c.dial_code))
            .max_by_key(|c| c.dial_code.len())
    }
}

/// A phone number under entry: a selected country plus national digits.
///
/// Invariant: `digits` holds only ASCII digits and never exceeds the
/// country's `max_length`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneValue {
    pub country: Country,
    digits: String,
}

impl PhoneValue {
    /// Start an empty phone value for a country.
    pub fn new(country: Country) -> Self {
        Self {
            country,
            digits: String::new(),
        }
    }

    /// Replace the digits from raw user input (non-digits stripped,
    /// truncated to the country's maximum).
    pub fn set_input(&mut self, raw: &str) {
        self.digits = clean_digits(raw, self.country.max_length);
    }

    /// Switch country, re-normalizing the already-entered digits rather
    /// than clearing them.
    pub fn set_country(&mut self, country: Country) {
        self.country = country;
        self.digits.truncate(country.max_length);
    }

    /// The stored national digits.
    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// The grouped display string, without dialing code.
    pub fn formatted(&self) -> String {
        group_digits(&self.digits, self.country.groups)
    }
}

fn clean_digits(raw: &str, max_length: usize) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(max_length)
        .collect()
}

fn group_digits(digits: &str, groups: &[usize]) -> String {
    let mut out = String::with_capacity(digits.len() + groups.len());
    let mut rest = digits;
    for &size in groups {
        if rest.is_empty() {
            break;
        }
        let take = size.min(rest.len());
        if !out.is_empty() {
            out.push(GROUP_SEPARATOR);
        }
        out.push_str(&rest[..take]);
        rest = &rest[take..];
    }
    // Digits beyond the declared groups are emitted as one trailing group.
    if !rest.is_empty() {
        if !out.is_empty() {
            out.push(GROUP_SEPARATOR);
        }
        out.push_str(rest);
    }
    out
}

/// Normalize raw phone input for a country: strip non-digits, truncate to
/// `max_length`, then re-group per the country's group sizes. Empty input
/// yields the empty string through the same path as ordinary edits.
pub fn normalize_phone(raw: &str, country: &Country) -> String {
    group_digits(&clean_digits(raw, country.max_length), country.groups)
}

/// Render a field value for display, per its declared type.
///
/// Values that do not parse for their declared type pass through the plain
/// string coercion unchanged; display formatting never fails.
pub fn display(field_type: FieldType, value: &Value) -> String {
    let text = coerce_value(value);

    match field_type {
        FieldType::Date => format_date(&text).unwrap_or(text),
        FieldType::Phone => format_phone(&text).unwrap_or(text),
        FieldType::Text
        | FieldType::Email
        | FieldType::Number
        | FieldType::Select
        | FieldType::Textarea
        | FieldType::File => text,
    }
}

fn format_date(text: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok()?;
    Some(date.format("%d %b %Y").to_string())
}

fn format_phone(text: &str) -> Option<String> {
    let country = Country::by_prefix(text.trim())?;
    let national = &text.trim()[country.dial_code.len()..];
    Some(format!(
        "{} {}",
        country.dial_code,
        normalize_phone(national, country)
    ))
}

/// Normalize raw user input for a field type into its canonical stored
/// representation.
pub fn normalize(field_type: FieldType, raw: &str) -> String {
    match field_type {
        FieldType::Text | FieldType::Email | FieldType::Select | FieldType::File => {
            raw.trim().to_string()
        }
        FieldType::Textarea => raw.trim_end().to_string(),
        FieldType::Number => raw
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '-' || *c == '.')
            .collect(),
        FieldType::Date => raw.trim().to_string(),
        // Without a country selection, phone input keeps digits only.
        FieldType::Phone => raw.chars().filter(|c| c.is_ascii_digit()).collect(),
    }
}

/// Normalize a phone field against an explicit country selection.
///
/// Fails with a field-attributable error when the dialing code is not in
/// the supported set.
pub fn normalize_phone_field(field: &str, raw: &str, dial_code: &str) -> Result<String> {
    let country = Country::by_dial_code(dial_code).ok_or_else(|| Error::InvalidField {
        field: field.to_string(),
        message: format!("unsupported dialing code: {dial_code}"),
    })?;
    Ok(normalize_phone(raw, country))
}
