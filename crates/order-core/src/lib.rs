//! # Order Core
//!
//! Core traits and types for the order-sms webhook responder.
//!
//! This crate provides the building blocks shared by the web application
//! and the provider crates:
//! - [`SmsClient`] trait for sending SMS messages
//! - [`OrderStore`] trait for looking up tracked orders
//! - Common types for requests, responses, and errors
//!
//! ## Example
//!
//! ```rust,ignore
//! use order_core::{SendRequest, SmsClient};
//!
//! // Any SMS provider implements SmsClient
//! let receipt = client.send(SendRequest {
//!     to: "+1234567890",
//!     from: "+0987654321",
//!     text: "Your order is on the way!",
//! }).await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during SMS operations
#[derive(Debug, thiserror::Error)]
pub enum SmsError {
    /// HTTP communication error
    #[error("http error: {0}")]
    Http(String),
    /// Authentication/authorization error
    #[error("authentication error: {0}")]
    Auth(String),
    /// SMS provider returned an error
    #[error("provider error: {0}")]
    Provider(String),
}

/// Errors raised by an order lookup.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("order lookup failed: {0}")]
    Query(String),
}

/// A tracked shipment record keyed by an opaque string identifier.
///
/// Orders are owned by an external system; this crate only reads them.
/// `status` is a free-text label ("approved", "in transit", ...) with no
/// enforced enumeration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Order {
    pub order_id: String,
    pub current_location: String,
    pub last_location: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendRequest<'a> {
    pub to: &'a str,
    pub from: &'a str,
    pub text: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendResponse {
    pub id: String,
    /// Name of the backend/provider that produced the response, e.g. "twilio".
    pub provider: &'static str,
    /// Raw provider payload for debugging / audit.
    pub raw: serde_json::Value,
}

#[async_trait]
pub trait SmsClient: Send + Sync {
    /// Send a single text SMS.
    async fn send(&self, req: SendRequest<'_>) -> Result<SendResponse, SmsError>;
}

/// Read-only access to the orders table.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Look up an order by its exact identifier. No trimming, no case
    /// folding: `" ab12 "` and `"ab12"` are different keys.
    async fn find_by_order_id(&self, order_id: &str) -> Result<Option<Order>, StoreError>;
}

/// Utility to create a pseudo id if a provider doesn't return one.
pub fn fallback_id() -> String {
    Uuid::new_v4().to_string()
}
