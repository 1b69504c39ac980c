use async_trait::async_trait;
use order_core::{SendRequest, SendResponse, SmsClient, SmsError};
use serde::Serialize;

const PROVIDER: &str = "twilio";
const DEFAULT_BASE_URL: &str = "https://api.twilio.com";

/// Twilio REST client for the Programmable Messaging API.
///
/// One synchronous (awaited) call per [`SmsClient::send`]; no retries,
/// no batching. Timeouts are whatever `reqwest` defaults to: no overall
/// request timeout, OS-level connect timeout.
#[derive(Clone, Debug)]
pub struct TwilioClient {
    /// Twilio Account SID (username for Basic auth).
    pub account_sid: String,
    /// Twilio Auth Token (password for Basic auth).
    pub auth_token: String,
    /// API base URL; override for testing/mocking.
    pub base_url: String,
    http: reqwest::Client,
}

impl TwilioClient {
    pub fn new<S: Into<String>>(account_sid: S, auth_token: S) -> Self {
        Self::with_base_url(account_sid, auth_token, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url<S: Into<String>>(account_sid: S, auth_token: S, base_url: String) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            base_url,
            http: reqwest::Client::new(),
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url.trim_end_matches('/'),
            self.account_sid
        )
    }
}

/// Form fields for `POST /2010-04-01/Accounts/{Sid}/Messages.json`.
#[derive(Debug, Serialize)]
struct TwilioSendForm<'a> {
    #[serde(rename = "To")]
    to: &'a str,
    #[serde(rename = "From")]
    from: &'a str,
    #[serde(rename = "Body")]
    body: &'a str,
}

#[async_trait]
impl SmsClient for TwilioClient {
    async fn send(&self, req: SendRequest<'_>) -> Result<SendResponse, SmsError> {
        let payload = TwilioSendForm {
            to: req.to,
            from: req.from,
            body: req.text,
        };
        let res = self
            .http
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&payload)
            .send()
            .await
            .map_err(|e| SmsError::Http(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(SmsError::Auth(format!("HTTP {}: {}", status, body)));
            }
            return Err(SmsError::Provider(format!("HTTP {}: {}", status, body)));
        }

        let raw_text = res
            .text()
            .await
            .map_err(|e| SmsError::Http(e.to_string()))?;
        let raw_json: serde_json::Value = serde_json::from_str(&raw_text)
            .unwrap_or_else(|_| serde_json::json!({ "raw": raw_text }));

        // Twilio names the message id "sid" in its REST responses.
        let id = raw_json
            .get("sid")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(order_core::fallback_id);

        tracing::debug!(provider = PROVIDER, message_sid = %id, "message accepted by provider");

        Ok(SendResponse {
            id,
            provider: PROVIDER,
            raw: raw_json,
        })
    }
}
