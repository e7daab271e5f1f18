//! Per-(resource, scope) state registry.
//!
//! Each `(resource, scope)` pair owns exactly one [`ResourceState`]. The
//! slot is created when the first subscriber arrives and torn down when the
//! last handle drops; there is no process-wide singleton shared across
//! unrelated resource types. Concurrent views of the same scope observe the
//! same state through their handles; only store operations mutate it.

use dashmap::DashMap;
use rostra_engine::{ResourceName, ResourceState, StateEvent, Status};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, Weak};

/// One logical instance of resource state: the list view and the detail
/// view of the same resource are independent scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    List,
    Detail,
}

type ScopeKey = (ResourceName, Scope);

struct ScopeSlot {
    state: RwLock<ResourceState>,
    subscribers: AtomicUsize,
}

struct RegistryInner {
    slots: DashMap<ScopeKey, Arc<ScopeSlot>>,
}

/// Registry handing out subscriber-counted scope handles.
///
/// Cheap to clone; all clones share the same slot map.
#[derive(Clone)]
pub struct ScopeRegistry {
    inner: Arc<RegistryInner>,
}

impl ScopeRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                slots: DashMap::new(),
            }),
        }
    }

    /// Subscribe to a scope, creating its state on first subscription.
    pub fn subscribe(&self, resource: impl Into<ResourceName>, scope: Scope) -> ScopeHandle {
        let key = (resource.into(), scope);
        let slot = self
            .inner
            .slots
            .entry(key.clone())
            .or_insert_with(|| {
                Arc::new(ScopeSlot {
                    state: RwLock::new(ResourceState::new()),
                    subscribers: AtomicUsize::new(0),
                })
            })
            .clone();
        slot.subscribers.fetch_add(1, Ordering::SeqCst);

        ScopeHandle {
            key,
            slot,
            registry: Arc::downgrade(&self.inner),
        }
    }

    /// Number of live scope slots, for diagnostics.
    pub fn len(&self) -> usize {
        self.inner.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.slots.is_empty()
    }
}

impl Default for ScopeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A subscription to one scope's state.
///
/// Dropping the last handle for a scope removes its slot from the
/// registry. A response that lands after that is applied to a detached
/// slot and discarded with it, so it cannot disturb other scopes.
pub struct ScopeHandle {
    key: ScopeKey,
    slot: Arc<ScopeSlot>,
    registry: Weak<RegistryInner>,
}

impl ScopeHandle {
    /// Snapshot the current state.
    pub fn snapshot(&self) -> ResourceState {
        self.read(|state| state.clone())
    }

    /// Current lifecycle status.
    pub fn status(&self) -> Status {
        self.read(|state| state.status)
    }

    /// Run a closure against the shared state under the read lock.
    pub fn read<T>(&self, f: impl FnOnce(&ResourceState) -> T) -> T {
        let guard = self
            .slot
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Apply a lifecycle event. The lock is held only for the transition,
    /// never across an await point.
    pub(crate) fn apply(&self, event: StateEvent) {
        let mut guard = self
            .slot
            .state
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        guard.apply(event);
    }
}

impl Clone for ScopeHandle {
    fn clone(&self) -> Self {
        self.slot.subscribers.fetch_add(1, Ordering::SeqCst);
        Self {
            key: self.key.clone(),
            slot: Arc::clone(&self.slot),
            registry: Weak::clone(&self.registry),
        }
    }
}

impl Drop for ScopeHandle {
    fn drop(&mut self) {
        if self.slot.subscribers.fetch_sub(1, Ordering::SeqCst) == 1 {
            if let Some(registry) = self.registry.upgrade() {
                registry
                    .slots
                    .remove_if(&self.key, |_, slot| {
                        slot.subscribers.load(Ordering::SeqCst) == 0
                    });
            }
        }
    }
}
