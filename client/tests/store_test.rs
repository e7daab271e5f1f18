//! Integration tests for the ResourceStore lifecycle over a mock transport.
//!
//! No network involved: the mock client records every dispatched request
//! and serves queued responses, so the tests can assert exactly when the
//! store does and does not hit the transport.

use async_trait::async_trait;
use rostra_client::{ListParams, ResourceClient, ResourceStore, Scope, ScopeRegistry};
use rostra_engine::{
    Error, ErrorKind, FieldDescriptor, FieldSchema, FieldType, Record, Result, Section, Status,
};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Mock transport: serves queued responses, records every call.
#[derive(Default)]
struct MockClient {
    responses: Mutex<VecDeque<Result<Value>>>,
    calls: Mutex<Vec<String>>,
}

impl MockClient {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn push_ok(&self, value: Value) {
        self.responses.lock().unwrap().push_back(Ok(value));
    }

    fn push_err(&self, error: Error) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn next(&self, call: String) -> Result<Value> {
        self.calls.lock().unwrap().push(call);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(Value::Null))
    }
}

#[async_trait]
impl ResourceClient for MockClient {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value> {
        let qs: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
        self.next(format!("GET {path}?{}", qs.join("&")))
    }

    async fn post(&self, path: &str, _body: &Value) -> Result<Value> {
        self.next(format!("POST {path}"))
    }

    async fn put(&self, path: &str, _body: &Value) -> Result<Value> {
        self.next(format!("PUT {path}"))
    }

    async fn delete(&self, path: &str) -> Result<Value> {
        self.next(format!("DELETE {path}"))
    }
}

fn record(value: Value) -> Record {
    Record::from_value(value).unwrap()
}

fn requirement_schema() -> FieldSchema {
    FieldSchema::new(vec![Section::new(
        "Role",
        vec![
            FieldDescriptor::required("jobTitle", "Job Title", FieldType::Text),
            FieldDescriptor::required("clientName", "Client Name", FieldType::Text),
        ],
    )])
    .unwrap()
}

fn setup() -> (Arc<MockClient>, ScopeRegistry) {
    (MockClient::new(), ScopeRegistry::new())
}

#[tokio::test]
async fn list_success_replaces_items() {
    let (client, registry) = setup();
    let scope = registry.subscribe("requirements", Scope::List);
    let store = ResourceStore::new("requirements", client.clone(), scope.clone());

    client.push_ok(json!({
        "items": [{"id": "r-1", "clientName": "Acme"}, {"id": "r-2", "clientName": "Globex"}],
        "totalCount": 12
    }));

    let status = store.list(&ListParams::new().page(0).size(20)).await;

    assert_eq!(status, Status::Succeeded);
    let state = scope.snapshot();
    assert_eq!(state.items.len(), 2);
    assert_eq!(state.pagination.total_count, 12);
    assert_eq!(client.calls(), vec!["GET requirements?page=0&size=20"]);
}

#[tokio::test]
async fn create_empty_payload_never_dispatches() {
    let (client, registry) = setup();
    let scope = registry.subscribe("requirements", Scope::List);
    let store = ResourceStore::new("requirements", client.clone(), scope.clone());

    let status = store.create(Record::new()).await;

    assert_eq!(status, Status::Failed);
    assert!(client.calls().is_empty()); // no network call, same tick
    let state = scope.snapshot();
    assert_eq!(state.error, Some(Error::EmptyPayload));
    assert_eq!(state.error.unwrap().kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn create_missing_required_field_names_the_field() {
    let (client, registry) = setup();
    let scope = registry.subscribe("requirements", Scope::List);
    let store = ResourceStore::new("requirements", client.clone(), scope.clone())
        .with_schema(&requirement_schema());

    let status = store.create(record(json!({"jobTitle": "Backend Engineer"}))).await;

    assert_eq!(status, Status::Failed);
    assert!(client.calls().is_empty());
    let error = scope.snapshot().error.unwrap();
    assert_eq!(error, Error::MissingRequiredField("clientName".into()));
    assert_eq!(error.field(), Some("clientName"));
}

#[tokio::test]
async fn create_appends_server_echo() {
    let (client, registry) = setup();
    let scope = registry.subscribe("requirements", Scope::List);
    let store = ResourceStore::new("requirements", client.clone(), scope.clone())
        .with_schema(&requirement_schema());

    client.push_ok(json!({"id": "r-9", "jobTitle": "Backend Engineer", "clientName": "Acme"}));

    let status = store
        .create(record(json!({"jobTitle": "Backend Engineer", "clientName": "Acme"})))
        .await;

    assert_eq!(status, Status::Succeeded);
    let state = scope.snapshot();
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].id(), Some("r-9".into()));
    assert_eq!(client.calls(), vec!["POST requirements"]);
}

#[tokio::test]
async fn delete_removes_item_but_total_count_is_untouched() {
    let (client, registry) = setup();
    let scope = registry.subscribe("requirements", Scope::List);
    let store = ResourceStore::new("requirements", client.clone(), scope.clone());

    client.push_ok(json!({
        "items": [{"id": "r-1"}, {"id": "r-2"}],
        "totalCount": 2
    }));
    store.list(&ListParams::new()).await;

    client.push_ok(Value::Null);
    let status = store.delete("r-1").await;

    assert_eq!(status, Status::Succeeded);
    let state = scope.snapshot();
    assert!(state.items.iter().all(|r| r.id().as_deref() != Some("r-1")));
    // Documented limitation: the local delete does not reconcile the count
    assert_eq!(state.pagination.total_count, 2);
}

#[tokio::test]
async fn failed_refetch_keeps_stale_items() {
    let (client, registry) = setup();
    let scope = registry.subscribe("requirements", Scope::List);
    let store = ResourceStore::new("requirements", client.clone(), scope.clone());

    client.push_ok(json!({"items": [{"id": "r-1"}], "totalCount": 1}));
    store.list(&ListParams::new()).await;

    client.push_err(Error::Transport {
        status: Some(503),
        message: "unavailable".into(),
    });
    let status = store.list(&ListParams::new()).await;

    assert_eq!(status, Status::Failed);
    let state = scope.snapshot();
    assert_eq!(state.items.len(), 1); // stale display over empty display
    assert_eq!(state.error.unwrap().kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn get_by_id_blank_id_rejected_locally() {
    let (client, registry) = setup();
    let scope = registry.subscribe("requirements", Scope::Detail);
    let store = ResourceStore::new("requirements", client.clone(), scope.clone());

    let status = store.get_by_id("  ").await;

    assert_eq!(status, Status::Failed);
    assert!(client.calls().is_empty());
    assert_eq!(scope.snapshot().error, Some(Error::MissingId));
}

#[tokio::test]
async fn get_by_id_not_found_is_tagged() {
    let (client, registry) = setup();
    let scope = registry.subscribe("requirements", Scope::Detail);
    let store = ResourceStore::new("requirements", client.clone(), scope.clone());

    client.push_err(Error::NotFound("requirements/r-404".into()));
    let status = store.get_by_id("r-404").await;

    assert_eq!(status, Status::Failed);
    assert_eq!(scope.snapshot().error.unwrap().kind(), ErrorKind::NotFound);
    assert_eq!(client.calls(), vec!["GET requirements/r-404?"]);
}

#[tokio::test]
async fn update_replaces_items_and_current() {
    let (client, registry) = setup();
    let scope = registry.subscribe("requirements", Scope::Detail);
    let store = ResourceStore::new("requirements", client.clone(), scope.clone());

    client.push_ok(json!({"id": "r-1", "clientName": "Acme", "status": "Open"}));
    store.get_by_id("r-1").await;

    // Server echoes only the patch; store merges over the known record
    client.push_ok(json!({"status": "Closed"}));
    let status = store.update("r-1", record(json!({"status": "Closed"}))).await;

    assert_eq!(status, Status::Succeeded);
    let current = scope.snapshot().current.unwrap();
    assert_eq!(current.display_value("status"), "Closed");
    assert_eq!(current.display_value("clientName"), "Acme");
    assert_eq!(
        client.calls(),
        vec!["GET requirements/r-1?", "PUT requirements/r-1"]
    );
}

#[tokio::test]
async fn update_without_payload_rejected_locally() {
    let (client, registry) = setup();
    let scope = registry.subscribe("requirements", Scope::Detail);
    let store = ResourceStore::new("requirements", client.clone(), scope.clone());

    assert_eq!(store.update("r-1", Record::new()).await, Status::Failed);
    assert_eq!(store.update("", record(json!({"a": 1}))).await, Status::Failed);
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn bulk_update_requires_ids_and_applies_patch() {
    let (client, registry) = setup();
    let scope = registry.subscribe("submissions", Scope::List);
    let store = ResourceStore::new("submissions", client.clone(), scope.clone());

    // Empty id collection rejected before dispatch
    let status = store.bulk_update(&[], record(json!({"status": "Archived"}))).await;
    assert_eq!(status, Status::Failed);
    assert_eq!(scope.snapshot().error, Some(Error::EmptyIdSet));
    assert!(client.calls().is_empty());

    client.push_ok(json!({"items": [{"id": "s-1"}, {"id": "s-2"}], "totalCount": 2}));
    store.list(&ListParams::new()).await;

    client.push_ok(Value::Null);
    let ids = vec!["s-1".to_string(), "s-2".to_string()];
    let status = store.bulk_update(&ids, record(json!({"status": "Archived"}))).await;

    assert_eq!(status, Status::Succeeded);
    let state = scope.snapshot();
    assert!(state
        .items
        .iter()
        .all(|r| r.display_value("status") == "Archived"));
    assert!(client.calls().contains(&"PUT submissions/bulk".to_string()));
}

#[tokio::test]
async fn bulk_delete_is_single_request() {
    let (client, registry) = setup();
    let scope = registry.subscribe("submissions", Scope::List);
    let store = ResourceStore::new("submissions", client.clone(), scope.clone());

    client.push_ok(json!([{"id": "s-1"}, {"id": "s-2"}, {"id": "s-3"}]));
    store.list(&ListParams::new()).await;

    client.push_ok(Value::Null);
    let ids = vec!["s-1".to_string(), "s-3".to_string()];
    let status = store.bulk_delete(&ids).await;

    assert_eq!(status, Status::Succeeded);
    let state = scope.snapshot();
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].id(), Some("s-2".into()));
    assert_eq!(
        client.calls(),
        vec!["GET submissions?page=0&size=20", "POST submissions/bulk-delete"]
    );
}

#[tokio::test]
async fn shared_scope_sees_store_results() {
    let (client, registry) = setup();
    let scope = registry.subscribe("teams", Scope::List);
    let observer = registry.subscribe("teams", Scope::List);
    let store = ResourceStore::new("teams", client.clone(), scope);

    client.push_ok(json!({"items": [{"id": "t-1"}], "totalCount": 1}));
    store.list(&ListParams::new()).await;

    // A second subscriber of the same scope observes the same state
    assert_eq!(observer.snapshot().items.len(), 1);
}

#[tokio::test]
async fn response_after_last_unsubscribe_does_not_disturb_other_scopes() {
    let (client, registry) = setup();

    let surviving = registry.subscribe("teams", Scope::List);
    let doomed = registry.subscribe("interviews", Scope::List);
    let store = ResourceStore::new("interviews", client.clone(), doomed.clone());
    drop(doomed);

    client.push_ok(json!({"items": [{"id": "i-1"}], "totalCount": 1}));
    // The view is gone but the request still resolves; the store settles
    // its own handle's slot without panicking, and the slot is torn down
    // when the store itself drops.
    let status = store.list(&ListParams::new()).await;

    assert_eq!(status, Status::Succeeded);
    assert_eq!(surviving.status(), Status::Idle);
    assert!(surviving.snapshot().items.is_empty());
}

#[tokio::test]
async fn validation_failure_settles_without_started_transition() {
    let (client, registry) = setup();
    let scope = registry.subscribe("requirements", Scope::List);
    let store = ResourceStore::new("requirements", client.clone(), scope.clone());

    // Seed a succeeded state first
    client.push_ok(json!({"items": [], "totalCount": 0}));
    store.list(&ListParams::new()).await;
    assert_eq!(scope.status(), Status::Succeeded);

    // The rejection settles directly to failed; a concurrent reader can
    // never observe a loading phase for a request that was never sent.
    let status = store.delete("").await;
    assert_eq!(status, Status::Failed);
    assert_eq!(client.calls().len(), 1); // only the list call
}
