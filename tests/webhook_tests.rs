use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use order_core::{
    Order, OrderStore, SendRequest, SendResponse, SmsClient, SmsError, StoreError,
};
use order_sms::handler::{AppState, NOT_FOUND_REPLY, router};
use time::{Duration, OffsetDateTime};
use tower::ServiceExt;

/// In-memory stand-in for the Postgres store.
#[derive(Default)]
struct MemoryStore {
    orders: HashMap<String, Order>,
}

impl MemoryStore {
    fn with_order(order: Order) -> Self {
        let mut orders = HashMap::new();
        orders.insert(order.order_id.clone(), order);
        Self { orders }
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn find_by_order_id(&self, order_id: &str) -> Result<Option<Order>, StoreError> {
        Ok(self.orders.get(order_id).cloned())
    }
}

struct FailingStore;

#[async_trait]
impl OrderStore for FailingStore {
    async fn find_by_order_id(&self, _order_id: &str) -> Result<Option<Order>, StoreError> {
        Err(StoreError::Query("connection refused".into()))
    }
}

#[derive(Debug, Clone)]
struct SentSms {
    to: String,
    from: String,
    text: String,
}

/// Records every send instead of calling a provider.
#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<SentSms>>,
}

impl RecordingNotifier {
    fn sent(&self) -> Vec<SentSms> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl SmsClient for RecordingNotifier {
    async fn send(&self, req: SendRequest<'_>) -> Result<SendResponse, SmsError> {
        self.sent.lock().unwrap().push(SentSms {
            to: req.to.to_string(),
            from: req.from.to_string(),
            text: req.text.to_string(),
        });
        Ok(SendResponse {
            id: "SMtest".into(),
            provider: "test",
            raw: serde_json::json!({}),
        })
    }
}

struct FailingNotifier;

#[async_trait]
impl SmsClient for FailingNotifier {
    async fn send(&self, _req: SendRequest<'_>) -> Result<SendResponse, SmsError> {
        Err(SmsError::Provider("HTTP 400: invalid recipient".into()))
    }
}

fn sample_order() -> Order {
    Order {
        order_id: "AB12CD34EF".into(),
        current_location: "5th Ave".into(),
        last_location: "Main St".into(),
        status: "in transit".into(),
    }
}

fn state_with(store: Arc<dyn OrderStore>, notifier: Arc<dyn SmsClient>) -> AppState {
    AppState {
        store,
        notifier,
        from_number: "+15559990000".into(),
    }
}

async fn post_webhook(state: AppState, form_body: &'static str) -> StatusCode {
    let request = Request::builder()
        .method("POST")
        .uri("/webhooks/sms")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form_body))
        .unwrap();
    router(state).oneshot(request).await.unwrap().status()
}

#[tokio::test]
async fn known_order_is_answered_with_its_details() {
    let notifier = Arc::new(RecordingNotifier::default());
    let state = state_with(
        Arc::new(MemoryStore::with_order(sample_order())),
        notifier.clone(),
    );

    let status = post_webhook(state, "From=%2B15551234567&Body=AB12CD34EF").await;
    assert_eq!(status, StatusCode::OK);

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "+15551234567");
    assert_eq!(sent[0].from, "+15559990000");
    assert!(sent[0].text.contains("#AB12CD34EF"));
    assert!(sent[0].text.contains("5th Ave"));
    assert!(sent[0].text.contains("Main St"));
    assert!(sent[0].text.contains("in transit"));

    let tomorrow = (OffsetDateTime::now_utc() + Duration::days(1)).date();
    assert!(
        sent[0].text.contains(&tomorrow.to_string()),
        "reply missing arrival date: {}",
        sent[0].text
    );
}

#[tokio::test]
async fn unknown_order_id_gets_the_fixed_reply() {
    let notifier = Arc::new(RecordingNotifier::default());
    let state = state_with(
        Arc::new(MemoryStore::with_order(sample_order())),
        notifier.clone(),
    );

    let status = post_webhook(state, "From=%2B15550000000&Body=NOPE").await;
    assert_eq!(status, StatusCode::OK);

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "+15550000000");
    assert_eq!(sent[0].text, NOT_FOUND_REPLY);
}

#[tokio::test]
async fn lookup_is_case_sensitive() {
    let notifier = Arc::new(RecordingNotifier::default());
    let state = state_with(
        Arc::new(MemoryStore::with_order(sample_order())),
        notifier.clone(),
    );

    let status = post_webhook(state, "From=%2B15551234567&Body=ab12cd34ef").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(notifier.sent()[0].text, NOT_FOUND_REPLY);
}

#[tokio::test]
async fn lookup_does_not_trim_whitespace() {
    let notifier = Arc::new(RecordingNotifier::default());
    let state = state_with(
        Arc::new(MemoryStore::with_order(sample_order())),
        notifier.clone(),
    );

    // Trailing space, percent-encoded so it survives form decoding.
    let status = post_webhook(state, "From=%2B15551234567&Body=AB12CD34EF%20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(notifier.sent()[0].text, NOT_FOUND_REPLY);
}

#[tokio::test]
async fn missing_body_field_reads_as_not_found() {
    let notifier = Arc::new(RecordingNotifier::default());
    let state = state_with(
        Arc::new(MemoryStore::with_order(sample_order())),
        notifier.clone(),
    );

    let status = post_webhook(state, "From=%2B15551234567").await;
    assert_eq!(status, StatusCode::OK);

    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].text, NOT_FOUND_REPLY);
}

#[tokio::test]
async fn send_failure_becomes_a_server_error() {
    let state = state_with(
        Arc::new(MemoryStore::with_order(sample_order())),
        Arc::new(FailingNotifier),
    );

    let status = post_webhook(state, "From=%2B15551234567&Body=AB12CD34EF").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn store_failure_becomes_a_server_error() {
    let notifier = Arc::new(RecordingNotifier::default());
    let state = state_with(Arc::new(FailingStore), notifier.clone());

    let status = post_webhook(state, "From=%2B15551234567&Body=AB12CD34EF").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(notifier.sent().is_empty(), "no SMS should go out on a failed lookup");
}
