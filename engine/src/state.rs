//! Resource lifecycle state machine.
//!
//! Every list/detail/mutate operation drives one [`ResourceState`] through
//! `idle → loading → {succeeded | failed}` via a single transition entry
//! point, [`ResourceState::apply`]. Views read status from here and never
//! infer loading from the presence or absence of data.

use crate::{Error, Record};
use serde::{Deserialize, Serialize};

/// Default page size for list operations.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Lifecycle status of the most recent operation on a scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// Pagination window reported by the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Zero-based page index
    pub page: u32,
    /// Page size
    pub size: u32,
    /// Total records across all pages, as last reported by the server
    pub total_count: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            total_count: 0,
        }
    }
}

/// Events emitted by store operations. Each settles or advances the
/// lifecycle; there is no other way to mutate a [`ResourceState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StateEvent {
    /// An operation was dispatched to the transport.
    Started,
    /// A list response replaced the current page.
    ListLoaded {
        items: Vec<Record>,
        pagination: Pagination,
    },
    /// A single-entity response arrived.
    EntityLoaded { record: Record },
    /// A create succeeded; the new record joins the current page.
    Created { record: Record },
    /// An update succeeded for the given id.
    Updated { id: String, record: Record },
    /// A delete succeeded for the given id.
    Deleted { id: String },
    /// A bulk update succeeded; the patch applies to every listed id.
    BulkUpdated { ids: Vec<String>, patch: Record },
    /// A bulk delete succeeded for every listed id.
    BulkDeleted { ids: Vec<String> },
    /// The operation failed, locally or remotely.
    Failed { error: Error },
}

/// Canonical in-memory state for one `(resource, scope)` pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceState {
    /// Current page of records, in server order
    pub items: Vec<Record>,
    /// The single entity for detail scopes
    pub current: Option<Record>,
    /// Lifecycle status of the latest operation
    pub status: Status,
    /// Error from the latest failed operation
    pub error: Option<Error>,
    /// Pagination window of the latest list response
    pub pagination: Pagination,
}

impl ResourceState {
    /// Create a fresh idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a lifecycle event. The single authoritative transition
    /// function: all four statuses are settled here and nowhere else.
    ///
    /// A failure keeps the previous `items` and `current` untouched so a
    /// failed re-fetch never blanks data that was already on screen.
    pub fn apply(&mut self, event: StateEvent) {
        match event {
            StateEvent::Started => {
                self.status = Status::Loading;
                self.error = None;
            }
            StateEvent::ListLoaded { items, pagination } => {
                self.items = items;
                self.pagination = pagination;
                self.succeed();
            }
            StateEvent::EntityLoaded { record } => {
                self.current = Some(record);
                self.succeed();
            }
            StateEvent::Created { record } => {
                self.items.push(record);
                self.succeed();
            }
            StateEvent::Updated { id, record } => {
                if let Some(existing) = self.items.iter_mut().find(|r| r.id().as_deref() == Some(&*id)) {
                    *existing = record.clone();
                }
                if self.current.as_ref().and_then(Record::id).as_deref() == Some(&*id) {
                    self.current = Some(record);
                }
                self.succeed();
            }
            StateEvent::Deleted { id } => {
                // total_count is deliberately not adjusted here; the server
                // owns it and the next list refresh reconciles.
                self.items.retain(|r| r.id().as_deref() != Some(&*id));
                self.succeed();
            }
            StateEvent::BulkUpdated { ids, patch } => {
                for record in &mut self.items {
                    if record.id().map(|id| ids.contains(&id)).unwrap_or(false) {
                        record.merge(&patch);
                    }
                }
                if let Some(current) = self.current.as_mut() {
                    if current.id().map(|id| ids.contains(&id)).unwrap_or(false) {
                        current.merge(&patch);
                    }
                }
                self.succeed();
            }
            StateEvent::BulkDeleted { ids } => {
                self.items
                    .retain(|r| !r.id().map(|id| ids.contains(&id)).unwrap_or(false));
                self.succeed();
            }
            StateEvent::Failed { error } => {
                self.status = Status::Failed;
                self.error = Some(error);
            }
        }
    }

    fn succeed(&mut self) {
        self.status = Status::Succeeded;
        self.error = None;
    }

    /// True while the very first load of this scope is in flight, i.e.
    /// loading with nothing yet to show. List views render a blocking
    /// spinner exactly here and stale data everywhere else.
    pub fn is_initial_load(&self) -> bool {
        self.status == Status::Loading && self.items.is_empty() && self.current.is_none()
    }
}
