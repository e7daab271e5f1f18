//! # Rostra Client
//!
//! The async side of the Rostra resource engine: a generic CRUD store that
//! drives the `rostra-engine` lifecycle state machine over an HTTP
//! transport.
//!
//! A view subscribes to a `(resource, scope)` pair, asks the store to
//! load, and reads results back through the shared scope handle:
//!
//! ```rust,no_run
//! use rostra_client::{Config, HttpClient, ListParams, ResourceStore, Scope, ScopeRegistry};
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let client = Arc::new(HttpClient::new(&config)?);
//! let registry = ScopeRegistry::new();
//!
//! let scope = registry.subscribe("requirements", Scope::List);
//! let store = ResourceStore::new("requirements", client, scope.clone());
//!
//! store.list(&ListParams::new().page(0).search("rust")).await;
//! let state = scope.snapshot();
//! println!("{} of {} requirements", state.items.len(), state.pagination.total_count);
//! # Ok(())
//! # }
//! ```
//!
//! Operations never return `Err`: every call settles its scope into
//! `succeeded` or `failed` with an error payload the view can classify via
//! [`rostra_engine::ErrorKind`]. Same-scope requests are not fenced;
//! responses may resolve out of issue order, and the next refresh
//! reconciles.

pub mod client;
pub mod config;
pub mod params;
pub mod scope;
pub mod store;

pub use client::{HttpClient, ResourceClient};
pub use config::{Config, ConfigError};
pub use params::{ListParams, SortDirection};
pub use scope::{Scope, ScopeHandle, ScopeRegistry};
pub use store::ResourceStore;
