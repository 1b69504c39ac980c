use std::sync::Arc;

use axum::Json;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use order_core::{Order, OrderStore, SendRequest, SendResponse, SmsClient, SmsError, StoreError};
use serde::Deserialize;
use time::{Duration, OffsetDateTime};

/// Fixed reply for an unknown order id.
pub const NOT_FOUND_REPLY: &str = "Invalid Order Id sent!";

/// Handler dependencies, built once at startup and shared across requests.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn OrderStore>,
    pub notifier: Arc<dyn SmsClient>,
    /// Configured sender number; never taken from the request.
    pub from_number: String,
}

/// Inbound SMS webhook payload. Field names follow the provider's
/// form-encoded callback. Missing fields decode as empty strings rather
/// than rejecting the request; an empty `Body` simply looks up nothing.
#[derive(Debug, Deserialize)]
pub struct IncomingSms {
    #[serde(rename = "From", default)]
    pub from: String,
    #[serde(rename = "Body", default)]
    pub body: String,
}

/// Failures that abort the webhook with a 500. An unknown order id is not
/// one of them; it is answered over SMS like any other reply.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Send(#[from] SmsError),
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "webhook request failed");
        let body = serde_json::json!({ "error": self.to_string() });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// `POST /webhooks/sms`: treat the message body as an order id, look it up,
/// and text the status back to the sender.
///
/// The reply always goes out over SMS, including the not-found case, so the
/// HTTP status is 200 for both. On success the provider's send receipt is
/// returned as the response payload.
pub async fn order_status(
    State(state): State<AppState>,
    Form(sms): Form<IncomingSms>,
) -> Result<Json<SendResponse>, WebhookError> {
    let order = state.store.find_by_order_id(&sms.body).await?;
    let reply = match &order {
        Some(order) => order_details_reply(order),
        None => NOT_FOUND_REPLY.to_string(),
    };

    let receipt = state
        .notifier
        .send(SendRequest {
            to: &sms.from,
            from: &state.from_number,
            text: &reply,
        })
        .await?;

    tracing::debug!(to = %sms.from, found = order.is_some(), "status reply sent");
    Ok(Json(receipt))
}

/// Routes with their shared state.
pub fn router(state: AppState) -> axum::Router {
    axum::Router::new()
        .route("/webhooks/sms", post(order_status))
        .with_state(state)
}

fn order_details_reply(order: &Order) -> String {
    format!(
        "Heres the current details of your order #{}: \n\nCurrent location: {} \n\nPrevious location: {} \n\nStatus: {} \n\nArrival date: {}",
        order.order_id,
        order.current_location,
        order.last_location,
        order.status,
        arrival_date(),
    )
}

/// Placeholder arrival estimate: tomorrow's calendar date (UTC). Not
/// derived from the order data.
fn arrival_date() -> time::Date {
    (OffsetDateTime::now_utc() + Duration::days(1)).date()
}
