//! # Rostra Engine
//!
//! The schema-driven core of the Rostra staffing admin console.
//!
//! Every feature area of the console (requirements, submissions,
//! interviews, teams) is an instantiation of the same triad:
//!
//! - a declarative **field schema** that drives both data-entry forms and
//!   tabular display without per-resource code,
//! - a **format registry** mapping field types to display formatters and
//!   input normalizers (including phone-number grouping by dialing code),
//! - a **resource lifecycle state machine** shared by every list, detail,
//!   and mutate operation.
//!
//! ## Design Principles
//!
//! - **No IO**: the engine has no knowledge of HTTP, files, or rendering
//! - **Deterministic**: same inputs always produce the same outputs
//! - **Single transition point**: only [`ResourceState::apply`] mutates
//!   lifecycle state, keeping the four statuses exhaustive
//!
//! ## Quick Start
//!
//! ```rust
//! use rostra_engine::{
//!     columns::{project, ColumnSource},
//!     search::filter,
//!     FieldDescriptor, FieldSchema, FieldType, Record, Section,
//! };
//! use serde_json::json;
//!
//! // 1. Declare a schema
//! let schema = FieldSchema::new(vec![Section::new(
//!     "Candidate",
//!     vec![
//!         FieldDescriptor::required("candidateFullName", "Candidate Full Name", FieldType::Text),
//!         FieldDescriptor::optional("interviewStatus", "Interview Status", FieldType::Select),
//!     ],
//! )])
//! .unwrap();
//!
//! // 2. Project columns over a record set
//! let records = vec![
//!     Record::from_value(json!({"candidateFullName": "Jane Doe", "interviewStatus": "Scheduled"})).unwrap(),
//!     Record::from_value(json!({"candidateFullName": "Jon Park", "interviewStatus": "Completed"})).unwrap(),
//! ];
//! let columns = project(&records, ColumnSource::FromSchema(&schema));
//!
//! // 3. Filter against a free-text query
//! let hits = filter(&records, &columns, "jon");
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].display_value("candidateFullName"), "Jon Park");
//! ```
//!
//! The async side, issuing the actual CRUD operations over a transport
//! and driving [`ResourceState`], lives in the `rostra-client` crate.

pub mod columns;
pub mod error;
pub mod format;
pub mod record;
pub mod schema;
pub mod search;
pub mod state;

// Re-export main types at crate root
pub use columns::{label_from_key, Column, ColumnSource};
pub use error::{Error, ErrorKind, Result};
pub use format::{normalize_phone, Country, PhoneValue, COUNTRIES};
pub use record::Record;
pub use schema::{Constraints, FieldDescriptor, FieldSchema, FieldType, Section, SelectOption};
pub use state::{Pagination, ResourceState, StateEvent, Status, DEFAULT_PAGE_SIZE};

/// Type aliases for clarity
pub type FieldKey = String;
pub type ResourceName = String;
pub type RecordId = String;
