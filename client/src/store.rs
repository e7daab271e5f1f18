//! ResourceStore - the async CRUD state machine driver.
//!
//! Every mutating operation validates shape *before* issuing a network
//! call: malformed requests become instantaneous validation failures
//! instead of failed round trips. No operation here returns `Err`; each
//! settles its scope into `succeeded` or `failed` and reports the final
//! status, keeping the store the single authority over lifecycle state.

use crate::client::ResourceClient;
use crate::params::ListParams;
use crate::scope::ScopeHandle;
use rostra_engine::{
    Error, FieldKey, FieldSchema, Pagination, Record, Result, StateEvent, Status,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Async CRUD driver for one resource over one scope.
pub struct ResourceStore<C: ResourceClient> {
    /// API path segment, e.g. `requirements`
    resource: String,
    client: Arc<C>,
    scope: ScopeHandle,
    /// Field keys a create payload must carry, normally derived from the
    /// resource's schema
    required_fields: Vec<FieldKey>,
}

impl<C: ResourceClient> ResourceStore<C> {
    /// Create a store with no required-field checks.
    pub fn new(resource: impl Into<String>, client: Arc<C>, scope: ScopeHandle) -> Self {
        Self {
            resource: resource.into(),
            client,
            scope,
            required_fields: Vec::new(),
        }
    }

    /// Derive required fields from a schema.
    pub fn with_schema(mut self, schema: &FieldSchema) -> Self {
        self.required_fields = schema.required_fields();
        self
    }

    /// Supply required fields explicitly.
    pub fn with_required_fields(mut self, fields: Vec<FieldKey>) -> Self {
        self.required_fields = fields;
        self
    }

    /// The scope this store drives.
    pub fn scope(&self) -> &ScopeHandle {
        &self.scope
    }

    /// Load a page of records.
    ///
    /// On success replaces `items` and `pagination`; on failure the
    /// previous items stay on screen (stale-but-valid display).
    pub async fn list(&self, params: &ListParams) -> Status {
        debug!(resource = %self.resource, page = params.page, "list");
        self.scope.apply(StateEvent::Started);

        let result = self.client.get(&self.resource, &params.to_query()).await;
        match result.and_then(|value| parse_list(value, params)) {
            Ok((items, pagination)) => {
                self.scope.apply(StateEvent::ListLoaded { items, pagination })
            }
            Err(error) => self.fail(error),
        }
        self.scope.status()
    }

    /// Load a single entity into `current`.
    pub async fn get_by_id(&self, id: &str) -> Status {
        if id.trim().is_empty() {
            return self.fail_now(Error::MissingId);
        }

        debug!(resource = %self.resource, id, "get_by_id");
        self.scope.apply(StateEvent::Started);

        let path = format!("{}/{}", self.resource, id);
        match self.client.get(&path, &[]).await.and_then(Record::from_value) {
            Ok(record) => self.scope.apply(StateEvent::EntityLoaded { record }),
            Err(error) => self.fail(error),
        }
        self.scope.status()
    }

    /// Create a record. The new record joins `items` without re-fetching
    /// the page.
    pub async fn create(&self, payload: Record) -> Status {
        if let Err(error) = self.validate_payload(&payload) {
            return self.fail_now(error);
        }

        debug!(resource = %self.resource, "create");
        self.scope.apply(StateEvent::Started);

        match self.client.post(&self.resource, &payload.clone().into_value()).await {
            Ok(body) => {
                // Prefer the server echo (it carries the assigned id); fall
                // back to the submitted payload when the body is empty.
                let record = Record::from_value(body).unwrap_or(payload);
                self.scope.apply(StateEvent::Created { record });
            }
            Err(error) => self.fail(error),
        }
        self.scope.status()
    }

    /// Update a record by id, replacing it in `items` and, when the ids
    /// match, in `current`.
    pub async fn update(&self, id: &str, payload: Record) -> Status {
        if id.trim().is_empty() {
            return self.fail_now(Error::MissingId);
        }
        if payload.is_empty() {
            return self.fail_now(Error::EmptyPayload);
        }

        debug!(resource = %self.resource, id, "update");
        self.scope.apply(StateEvent::Started);

        let path = format!("{}/{}", self.resource, id);
        match self.client.put(&path, &payload.clone().into_value()).await {
            Ok(body) => {
                let patch = Record::from_value(body).unwrap_or(payload);
                let record = self.merged_record(id, patch);
                self.scope.apply(StateEvent::Updated {
                    id: id.to_string(),
                    record,
                });
            }
            Err(error) => self.fail(error),
        }
        self.scope.status()
    }

    /// Delete a record by id. `pagination.total_count` is left for the
    /// next list refresh to reconcile.
    pub async fn delete(&self, id: &str) -> Status {
        if id.trim().is_empty() {
            return self.fail_now(Error::MissingId);
        }

        debug!(resource = %self.resource, id, "delete");
        self.scope.apply(StateEvent::Started);

        let path = format!("{}/{}", self.resource, id);
        match self.client.delete(&path).await {
            Ok(_) => self.scope.apply(StateEvent::Deleted { id: id.to_string() }),
            Err(error) => self.fail(error),
        }
        self.scope.status()
    }

    /// Apply one patch to many records in a single request.
    ///
    /// All-or-nothing from this side: a partial server-side failure is
    /// surfaced as one failed operation, with no client-side rollback.
    pub async fn bulk_update(&self, ids: &[String], payload: Record) -> Status {
        if let Err(error) = validate_ids(ids) {
            return self.fail_now(error);
        }
        if payload.is_empty() {
            return self.fail_now(Error::EmptyPayload);
        }

        debug!(resource = %self.resource, count = ids.len(), "bulk_update");
        self.scope.apply(StateEvent::Started);

        let path = format!("{}/bulk", self.resource);
        let body = serde_json::json!({
            "ids": ids,
            "payload": payload.clone().into_value(),
        });
        match self.client.put(&path, &body).await {
            Ok(_) => self.scope.apply(StateEvent::BulkUpdated {
                ids: ids.to_vec(),
                patch: payload,
            }),
            Err(error) => self.fail(error),
        }
        self.scope.status()
    }

    /// Delete many records in a single request. Same all-or-nothing policy
    /// as [`ResourceStore::bulk_update`].
    pub async fn bulk_delete(&self, ids: &[String]) -> Status {
        if let Err(error) = validate_ids(ids) {
            return self.fail_now(error);
        }

        debug!(resource = %self.resource, count = ids.len(), "bulk_delete");
        self.scope.apply(StateEvent::Started);

        let path = format!("{}/bulk-delete", self.resource);
        let body = serde_json::json!({ "ids": ids });
        match self.client.post(&path, &body).await {
            Ok(_) => self.scope.apply(StateEvent::BulkDeleted { ids: ids.to_vec() }),
            Err(error) => self.fail(error),
        }
        self.scope.status()
    }

    fn validate_payload(&self, payload: &Record) -> Result<()> {
        if payload.is_empty() {
            return Err(Error::EmptyPayload);
        }
        for field in &self.required_fields {
            let blank = match payload.get(field) {
                None | Some(Value::Null) => true,
                Some(Value::String(s)) => s.trim().is_empty(),
                Some(_) => false,
            };
            if blank {
                return Err(Error::MissingRequiredField(field.clone()));
            }
        }
        Ok(())
    }

    /// Merge a response patch over the record currently known for `id`,
    /// for servers that echo only the changed fields.
    fn merged_record(&self, id: &str, patch: Record) -> Record {
        let existing = self.scope.read(|state| {
            state
                .items
                .iter()
                .find(|r| r.id().as_deref() == Some(id))
                .or(state.current.as_ref().filter(|r| r.id().as_deref() == Some(id)))
                .cloned()
        });

        match existing {
            Some(mut record) => {
                record.merge(&patch);
                record
            }
            None => {
                let mut record = patch;
                if record.id().is_none() {
                    record.set("id", Value::String(id.to_string()));
                }
                record
            }
        }
    }

    /// Settle a remote failure.
    fn fail(&self, error: Error) {
        warn!(resource = %self.resource, %error, "operation failed");
        self.scope.apply(StateEvent::Failed { error });
    }

    /// Settle a local validation failure synchronously: no `Started`
    /// transition, no transport call, same-tick `failed` status.
    fn fail_now(&self, error: Error) -> Status {
        debug!(resource = %self.resource, %error, "rejected before dispatch");
        self.scope.apply(StateEvent::Failed { error });
        self.scope.status()
    }
}

fn validate_ids(ids: &[String]) -> Result<()> {
    if ids.is_empty() {
        return Err(Error::EmptyIdSet);
    }
    if ids.iter().any(|id| id.trim().is_empty()) {
        return Err(Error::MissingId);
    }
    Ok(())
}

/// Interpret a list response body.
///
/// Accepts `{"items": [...], "totalCount": n}` (also `content` for the
/// item key) and bare arrays, since the wire shape varies per resource.
/// Non-object items are skipped with a warning rather than failing the
/// whole page.
fn parse_list(value: Value, params: &ListParams) -> Result<(Vec<Record>, Pagination)> {
    let (raw_items, total_count) = match value {
        Value::Array(items) => {
            let len = items.len() as u64;
            (items, len)
        }
        Value::Object(mut map) => {
            let items = match map.remove("items").or_else(|| map.remove("content")) {
                Some(Value::Array(items)) => items,
                _ => {
                    return Err(Error::Transport {
                        status: None,
                        message: "list response carries no item array".into(),
                    })
                }
            };
            let total = map
                .get("totalCount")
                .and_then(Value::as_u64)
                .unwrap_or(items.len() as u64);
            (items, total)
        }
        other => {
            return Err(Error::Transport {
                status: None,
                message: format!("unexpected list response: {other}"),
            })
        }
    };

    let mut items = Vec::with_capacity(raw_items.len());
    for raw in raw_items {
        match Record::from_value(raw) {
            Ok(record) => items.push(record),
            Err(e) => warn!(%e, "skipping malformed list item"),
        }
    }

    Ok((
        items,
        Pagination {
            page: params.page,
            size: params.size,
            total_count,
        },
    ))
}
