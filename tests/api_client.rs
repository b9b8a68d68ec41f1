use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{Notify, Semaphore};
use ticketdesk::api::interceptors::{X_USER_EMAIL, X_USER_ROLE};
use ticketdesk::api::{ApiClient, ApiError, ApiRequest, ApiResponse, ScriptedTransport, Transport};
use ticketdesk::models::{Session, Task};
use ticketdesk::navigation::{RecordingNavigator, LOGIN_PATH};
use ticketdesk::session::{MemorySessionStore, SessionStore};

const BASE: &str = "http://desk.test/api";

struct Harness {
    client: ApiClient,
    store: Arc<MemorySessionStore>,
    navigator: Arc<RecordingNavigator>,
}

fn harness(session: Session, transport: Arc<dyn Transport>) -> Harness {
    let store = Arc::new(MemorySessionStore::with_session(session));
    let navigator = Arc::new(RecordingNavigator::new());
    let client = ApiClient::with_transport(
        BASE,
        HeaderMap::new(),
        store.clone(),
        navigator.clone(),
        transport,
    )
    .unwrap();
    Harness {
        client,
        store,
        navigator,
    }
}

#[tokio::test]
async fn test_get_admin_tasks_with_bearer_token() {
    let transport = Arc::new(ScriptedTransport::new().reply(200, json!([{"id": 1, "title": "Task One"}])));
    let h = harness(
        Session::authenticated("abc", "u@x.com", "user"),
        transport.clone(),
    );

    let body: Value = h.client.get("/admin/tasks", None).await.unwrap();

    assert_eq!(body, json!([{"id": 1, "title": "Task One"}]));
    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    let (url, request) = &sent[0];
    assert_eq!(url.as_str(), "http://desk.test/api/admin/tasks");
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.headers.get(AUTHORIZATION).unwrap(), "Bearer abc");
    assert_eq!(request.headers.get(X_USER_EMAIL).unwrap(), "u@x.com");
    assert_eq!(request.headers.get(X_USER_ROLE).unwrap(), "user");
    assert_eq!(request.headers.get(CONTENT_TYPE).unwrap(), "application/json");
}

#[tokio::test]
async fn test_typed_decode_of_success_body() {
    let transport = Arc::new(ScriptedTransport::new().reply(200, json!([{"id": 1, "title": "Task One"}])));
    let h = harness(Session::authenticated("abc", "u@x.com", "admin"), transport);

    let tasks: Vec<Task> = h.client.get("/admin/tasks", None).await.unwrap();

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Task One");
}

#[tokio::test]
async fn test_expired_token_invalidates_and_rejects() {
    let transport = Arc::new(ScriptedTransport::new().reply(401, json!({"message": "jwt expired"})));
    let expired = Session {
        token: Some("expired".to_string()),
        ..Session::default()
    };
    let h = harness(expired, transport);

    let err = h
        .client
        .get::<Value>("/notifications", None)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.body(), Some(&json!({"message": "jwt expired"})));
    assert!(h.store.read().is_empty());
    assert_eq!(h.navigator.current_location().as_deref(), Some(LOGIN_PATH));
}

#[tokio::test]
async fn test_forbidden_keeps_session() {
    let transport = Arc::new(ScriptedTransport::new().reply(403, json!({"message": "admins only"})));
    let session = Session::authenticated("abc", "u@x.com", "user");
    let h = harness(session.clone(), transport);

    let err = h.client.get::<Value>("/admin/tasks", None).await.unwrap_err();

    assert_eq!(err.status(), Some(403));
    assert_eq!(err.server_message(), Some("admins only"));
    assert_eq!(h.store.read(), session);
    assert!(h.navigator.visited().is_empty());
}

#[tokio::test]
async fn test_transport_failure_has_no_status() {
    let transport = Arc::new(ScriptedTransport::new().fail("connection refused"));
    let session = Session::authenticated("abc", "u@x.com", "user");
    let h = harness(session.clone(), transport);

    let err = h.client.get::<Value>("/tickets", None).await.unwrap_err();

    assert_eq!(err, ApiError::transport("connection refused"));
    assert_eq!(err.status(), None);
    assert_eq!(h.store.read(), session);
}

#[tokio::test]
async fn test_empty_error_body_is_absent() {
    let transport = Arc::new(ScriptedTransport::new().reply(500, Value::Null));
    let h = harness(Session::default(), transport);

    let err = h.client.delete::<Value>("/tickets/3", None).await.unwrap_err();

    assert_eq!(err, ApiError::status_code(500, None));
}

#[tokio::test]
async fn test_body_and_per_call_headers() {
    let transport = Arc::new(ScriptedTransport::new().reply(201, json!({"id": 9})));
    let h = harness(Session::authenticated("abc", "u@x.com", "user"), transport.clone());

    let mut extra = HeaderMap::new();
    extra.insert("x-trace", HeaderValue::from_static("t-1"));
    extra.insert(AUTHORIZATION, HeaderValue::from_static("Bearer forged"));

    let created: Value = h
        .client
        .post("/tickets", &json!({"title": "No signal"}), Some(extra))
        .await
        .unwrap();

    assert_eq!(created, json!({"id": 9}));
    let (_, request) = &transport.sent()[0];
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.body, Some(json!({"title": "No signal"})));
    assert_eq!(request.headers.get("x-trace").unwrap(), "t-1");
    assert_eq!(request.headers.get(AUTHORIZATION).unwrap(), "Bearer abc");
}

#[tokio::test]
async fn test_query_parameters_are_encoded() {
    let transport = Arc::new(ScriptedTransport::new().reply(200, json!([])));
    let h = harness(Session::default(), transport.clone());

    let _: Value = h
        .client
        .get_query("/tickets", &[("email", "a+b@x.com")], None)
        .await
        .unwrap();

    let (url, _) = &transport.sent()[0];
    assert_eq!(url.path(), "/api/tickets");
    let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    assert_eq!(pairs, vec![("email".to_string(), "a+b@x.com".to_string())]);
}

#[tokio::test]
async fn test_patch_without_body() {
    let transport = Arc::new(ScriptedTransport::new().reply(200, json!({"id": 4, "message": "m", "read": true})));
    let h = harness(Session::default(), transport.clone());

    let _: Value = h
        .client
        .patch::<Value, Value>("/notifications/4/read", None, None)
        .await
        .unwrap();

    let (url, request) = &transport.sent()[0];
    assert_eq!(url.as_str(), "http://desk.test/api/notifications/4/read");
    assert_eq!(request.method, Method::PATCH);
    assert!(request.body.is_none());
}

#[tokio::test]
async fn test_decode_mismatch_is_not_a_status_error() {
    let transport = Arc::new(ScriptedTransport::new().reply(200, json!({"unexpected": true})));
    let session = Session::authenticated("abc", "u@x.com", "admin");
    let h = harness(session.clone(), transport);

    let err = h.client.get::<Vec<Task>>("/admin/tasks", None).await.unwrap_err();

    assert!(matches!(err, ApiError::Serialization { .. }));
    assert_eq!(err.status(), None);
    assert_eq!(h.store.read(), session);
}

#[tokio::test]
async fn test_two_concurrent_unauthorized_responses() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .reply(401, Value::Null)
            .reply(401, Value::Null),
    );
    let h = harness(Session::authenticated("abc", "u@x.com", "user"), transport);

    let (a, b) = tokio::join!(
        h.client.get::<Value>("/tickets", None),
        h.client.get::<Value>("/notifications", None)
    );

    assert_eq!(a.unwrap_err().status(), Some(401));
    assert_eq!(b.unwrap_err().status(), Some(401));
    assert!(h.store.read().is_empty());
    assert!(h.navigator.visited().iter().all(|p| p == LOGIN_PATH));
    assert!(!h.navigator.visited().is_empty());
}

/// Holds every request until the test opens the gate.
struct GatedTransport {
    received: Mutex<Vec<ApiRequest>>,
    arrived: Notify,
    gate: Semaphore,
    status: u16,
}

impl GatedTransport {
    fn new(status: u16) -> Self {
        Self {
            received: Mutex::new(Vec::new()),
            arrived: Notify::new(),
            gate: Semaphore::new(0),
            status,
        }
    }

    fn authorization(&self, index: usize) -> Option<String> {
        self.received.lock().unwrap()[index]
            .headers
            .get(AUTHORIZATION)
            .map(|v| v.to_str().unwrap().to_string())
    }
}

#[async_trait]
impl Transport for GatedTransport {
    async fn send(&self, _url: Url, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.received.lock().unwrap().push(request);
        self.arrived.notify_one();
        let permit = self
            .gate
            .acquire()
            .await
            .map_err(|e| ApiError::transport(e.to_string()))?;
        permit.forget();
        Ok(ApiResponse::new(self.status, json!({})))
    }
}

#[tokio::test]
async fn test_each_call_snapshots_session_when_issued() {
    let transport = Arc::new(GatedTransport::new(200));
    let h = harness(Session::authenticated("first", "a@x.com", "user"), transport.clone());

    let client = h.client.clone();
    let call_a = tokio::spawn(async move { client.get::<Value>("/a", None).await });
    transport.arrived.notified().await;

    h.store
        .save(&Session::authenticated("second", "b@x.com", "admin"))
        .unwrap();

    let client = h.client.clone();
    let call_b = tokio::spawn(async move { client.get::<Value>("/b", None).await });
    transport.arrived.notified().await;

    transport.gate.add_permits(2);
    call_a.await.unwrap().unwrap();
    call_b.await.unwrap().unwrap();

    assert_eq!(transport.authorization(0).as_deref(), Some("Bearer first"));
    assert_eq!(transport.authorization(1).as_deref(), Some("Bearer second"));
}

#[tokio::test]
async fn test_unauthorized_invalidates_after_caller_gives_up() {
    let transport = Arc::new(GatedTransport::new(401));
    let h = harness(Session::authenticated("abc", "u@x.com", "user"), transport.clone());

    let abandoned =
        tokio::time::timeout(Duration::from_millis(20), h.client.get::<Value>("/tickets", None)).await;
    assert!(abandoned.is_err());
    assert_eq!(transport.received.lock().unwrap().len(), 1);

    transport.gate.add_permits(1);

    let mut waited = 0;
    while h.navigator.visited().is_empty() && waited < 100 {
        tokio::time::sleep(Duration::from_millis(10)).await;
        waited += 1;
    }
    assert!(h.store.read().is_empty());
    assert_eq!(h.navigator.current_location().as_deref(), Some(LOGIN_PATH));
}
