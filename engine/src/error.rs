//! Error types for the Rostra engine.

use crate::FieldKey;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Broad error class, used by UI layers to pick between
/// "fix your input" and "try again" messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Raised locally before any transport call; never retried.
    Validation,
    /// Network/HTTP-level failure.
    Transport,
    /// Absent-entity lookup (404-class).
    NotFound,
}

/// All possible errors from the Rostra engine and its consumers.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Error {
    // Validation errors (raised before dispatch)
    #[error("missing identifier")]
    MissingId,

    #[error("empty payload")]
    EmptyPayload,

    #[error("empty identifier collection")]
    EmptyIdSet,

    #[error("missing required field: {0}")]
    MissingRequiredField(FieldKey),

    #[error("invalid field '{field}': {message}")]
    InvalidField { field: FieldKey, message: String },

    // Schema construction errors
    #[error("duplicate field key: {0}")]
    DuplicateField(FieldKey),

    // Remote errors (raised after dispatch)
    #[error("not found: {0}")]
    NotFound(String),

    #[error("transport error{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Transport { status: Option<u16>, message: String },
}

impl Error {
    /// Classify this error for UI-facing messaging.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::Transport { .. } => ErrorKind::Transport,
            _ => ErrorKind::Validation,
        }
    }

    /// The offending field name, when the error is attributable to one.
    ///
    /// Forms use this to surface an inline message next to the field.
    pub fn field(&self) -> Option<&str> {
        match self {
            Error::MissingRequiredField(field) => Some(field),
            Error::InvalidField { field, .. } => Some(field),
            Error::DuplicateField(field) => Some(field),
            _ => None,
        }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
