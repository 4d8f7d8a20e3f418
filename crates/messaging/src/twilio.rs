//! Twilio Messages API client.
//!
//! One POST per dispatch, basic auth, bounded timeout, no retries. The auth
//! token stays wrapped in `SecretString` until the request is built.

use std::time::Duration;

use async_trait::async_trait;
use preventivo_core::config::TwilioConfig;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::dispatch::{DispatchError, MessageDispatcher, OutboundMessage};

const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";

pub struct TwilioDispatcher {
    client: Client,
    base_url: String,
    account_sid: String,
    auth_token: SecretString,
}

impl TwilioDispatcher {
    pub fn new(config: &TwilioConfig) -> Result<Self, DispatchError> {
        Self::with_base_url(config, TWILIO_API_BASE)
    }

    /// Point the client at a different API root. Tests use this to target a
    /// local stub server.
    pub fn with_base_url(config: &TwilioConfig, base_url: &str) -> Result<Self, DispatchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|error| DispatchError::Client(error.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
        })
    }

    fn messages_url(&self) -> String {
        format!("{}/Accounts/{}/Messages.json", self.base_url, self.account_sid)
    }
}

#[async_trait]
impl MessageDispatcher for TwilioDispatcher {
    async fn dispatch(&self, message: &OutboundMessage) -> Result<(), DispatchError> {
        let params = [
            ("From", message.from.as_str()),
            ("To", message.to.as_str()),
            ("Body", message.body.as_str()),
        ];

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(self.auth_token.expose_secret()))
            .form(&params)
            .send()
            .await
            .map_err(|error| {
                if error.is_timeout() {
                    DispatchError::Timeout(error.to_string())
                } else {
                    DispatchError::Http(error.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(DispatchError::Api {
                status: status.as_u16(),
                detail: truncate(&detail, 256),
            });
        }

        debug!(to = %message.to, "outbound message accepted by twilio");
        Ok(())
    }

    fn transport(&self) -> &'static str {
        "twilio"
    }
}

fn truncate(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}
