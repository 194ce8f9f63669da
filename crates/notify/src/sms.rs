//! SMS alert delivery via an HTTP gateway.
//!
//! [`SmsNotifier`] POSTs a JSON `{to, body}` payload to a configured SMS
//! gateway URL. Failed attempts are retried up to three times with
//! exponential backoff (1 s, 2 s, 4 s) before the failure is logged and
//! dropped.

use std::time::Duration;

use async_trait::async_trait;

use oncall_core::{Channel, Notifier};

/// Retry delays in seconds (exponential backoff: 1s, 2s, 4s).
const RETRY_DELAYS_SECS: [u64; 3] = [1, 2, 4];

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for SMS gateway delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum SmsError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The gateway returned a non-2xx status code.
    #[error("SMS gateway returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// SmsConfig
// ---------------------------------------------------------------------------

/// Configuration for the HTTP SMS gateway shared by all SMS targets.
#[derive(Debug, Clone)]
pub struct SmsConfig {
    /// Gateway endpoint that accepts `{to, body}` POSTs.
    pub gateway_url: String,
    /// Optional bearer token sent with every request.
    pub auth_token: Option<String>,
}

impl SmsConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `SMS_GATEWAY_URL` is not set, signalling that SMS
    /// delivery is not configured. `SMS_GATEWAY_TOKEN` is optional.
    pub fn from_env() -> Option<Self> {
        let gateway_url = std::env::var("SMS_GATEWAY_URL").ok()?;
        Some(Self {
            gateway_url,
            auth_token: std::env::var("SMS_GATEWAY_TOKEN").ok(),
        })
    }
}

// ---------------------------------------------------------------------------
// SmsNotifier
// ---------------------------------------------------------------------------

/// Pages one phone number with alert messages.
pub struct SmsNotifier {
    client: reqwest::Client,
    config: SmsConfig,
    to_number: String,
}

impl SmsNotifier {
    /// Create a target for `to_number` over the shared gateway configuration.
    pub fn new(config: SmsConfig, to_number: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            config,
            to_number: to_number.into(),
        }
    }

    /// Deliver one alert text with retry.
    ///
    /// Retries up to 3 times with exponential backoff before giving up.
    /// Returns `Ok(())` on the first successful attempt.
    pub async fn deliver(&self, message: &str) -> Result<(), SmsError> {
        let payload = serde_json::json!({
            "to": self.to_number,
            "body": message,
        });

        let mut last_err: Option<SmsError> = None;

        for (attempt, delay_secs) in RETRY_DELAYS_SECS.iter().enumerate() {
            match self.try_send(&payload).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        to = %self.to_number,
                        error = %e,
                        "SMS delivery attempt failed, retrying"
                    );
                    last_err = Some(e);
                    tokio::time::sleep(Duration::from_secs(*delay_secs)).await;
                }
            }
        }

        // Final attempt after the last backoff.
        match self.try_send(&payload).await {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::error!(to = %self.to_number, error = %e, "SMS delivery failed after all retries");
                Err(last_err.unwrap_or(e))
            }
        }
    }

    /// Execute a single POST request and check the response status.
    async fn try_send(&self, payload: &serde_json::Value) -> Result<(), SmsError> {
        let mut request = self.client.post(&self.config.gateway_url).json(payload);
        if let Some(token) = &self.config.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(SmsError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for SmsNotifier {
    fn channel(&self) -> Channel {
        Channel::Sms
    }

    fn address(&self) -> &str {
        &self.to_number
    }

    async fn notify(&self, message: &str) {
        if let Err(e) = self.deliver(message).await {
            tracing::error!(to = %self.to_number, error = %e, "SMS notification failed");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
