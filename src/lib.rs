//! # Order SMS
//!
//! A small webhook responder that answers order-status questions over SMS.
//!
//! When the messaging provider receives a text, it POSTs the sender and the
//! message body to this service. The body is treated as an order id, looked
//! up in Postgres, and the order's current details are texted back through
//! Twilio. Unknown ids get a fixed "invalid order id" reply, also over SMS.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use order_sms::config::AppConfig;
//! use order_sms::handler::{router, AppState};
//!
//! let config = AppConfig::load()?;
//! let app = router(AppState { store, notifier, from_number });
//! axum::serve(listener, app).await?;
//! ```
//!
//! Dependencies (the order store and the SMS client) are traits from
//! [`order_core`], injected through [`handler::AppState`] so tests can swap
//! in doubles.

pub mod config;
pub mod handler;
pub mod store;

pub use crate::config::*;
