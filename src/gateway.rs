//! Outbound SMS gateway.
//!
//! The `SmsGateway` trait is the seam between the dispatch flow and the
//! provider; `TwilioGateway` is the production implementation over the
//! Twilio Messages REST API.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::GatewayConfig;
use crate::error::{Result, SmsRelayError};
use crate::models::SentSms;

const TWILIO_API_BASE: &str = "https://api.twilio.com";

/// A remote SMS-sending service
#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Send one message to `to` and return the provider receipt.
    ///
    /// Any failure (network, invalid number, auth) maps to
    /// [`SmsRelayError::Gateway`].
    async fn send_sms(&self, to: &str, body: &str) -> Result<SentSms>;
}

/// Twilio implementation of [`SmsGateway`]
pub struct TwilioGateway {
    client: reqwest::Client,
    base_url: String,
    account_sid: String,
    auth_token: String,
    from_number: String,
}

/// Successful send response, reduced to the fields we use
#[derive(Debug, Deserialize)]
struct TwilioMessageResponse {
    sid: String,
}

/// Error envelope returned by the Twilio API
#[derive(Debug, Deserialize)]
struct TwilioErrorResponse {
    message: Option<String>,
}

impl TwilioGateway {
    /// Create a gateway from configured credentials.
    #[must_use]
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: TWILIO_API_BASE.to_string(),
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from_number: config.from_number.clone(),
        }
    }

    /// Override the API base URL, e.g. for a regional endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.account_sid
        )
    }
}

#[async_trait]
impl SmsGateway for TwilioGateway {
    async fn send_sms(&self, to: &str, body: &str) -> Result<SentSms> {
        debug!(to, body_len = body.len(), "Sending SMS via Twilio");

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[
                ("To", to),
                ("From", self.from_number.as_str()),
                ("Body", body),
            ])
            .send()
            .await
            .map_err(|e| SmsRelayError::Gateway(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let message: TwilioMessageResponse = response
                .json()
                .await
                .map_err(|e| SmsRelayError::Gateway(e.to_string()))?;
            info!(sid = %message.sid, "SMS accepted by gateway");
            return Ok(SentSms { sid: message.sid });
        }

        // Surface the provider's own message text when the error body parses
        let text = response
            .text()
            .await
            .map_err(|e| SmsRelayError::Gateway(e.to_string()))?;
        let detail = serde_json::from_str::<TwilioErrorResponse>(&text)
            .ok()
            .and_then(|e| e.message)
            .unwrap_or(text);

        if detail.is_empty() {
            return Err(SmsRelayError::Gateway(format!(
                "gateway returned status {status}"
            )));
        }

        Err(SmsRelayError::Gateway(detail))
    }
}
