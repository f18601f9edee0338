//! Telegram Bot API submitter.

use std::fmt;

use async_trait::async_trait;
use foodcart_commerce::checkout::{OrderSubmitter, SubmitError};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::NotifyError;
use crate::timeout::TimeoutConfig;

/// Public Bot API endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Where and how to deliver order messages.
#[derive(Clone, PartialEq, Eq)]
pub struct TelegramConfig {
    /// API base URL, without the `/bot<token>` part.
    pub api_base: String,
    /// Bot token from BotFather.
    pub bot_token: String,
    /// Target chat id or `@channel` name.
    pub chat_id: String,
    /// Request timeouts.
    pub timeout: TimeoutConfig,
}

impl TelegramConfig {
    /// Create a config for the public API.
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
            timeout: TimeoutConfig::default(),
        }
    }

    /// Point at a different API base (self-hosted Bot API server, tests).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set request timeouts.
    pub fn with_timeout(mut self, timeout: TimeoutConfig) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check that token and chat are present and the timeout is usable.
    pub fn validate(&self) -> Result<(), NotifyError> {
        if self.bot_token.trim().is_empty() {
            return Err(NotifyError::Config("bot token is not set".to_string()));
        }
        if self.chat_id.trim().is_empty() {
            return Err(NotifyError::Config("chat id is not set".to_string()));
        }
        if self.timeout.total.is_zero() {
            return Err(NotifyError::Config("timeout must be greater than 0".to_string()));
        }
        Ok(())
    }

    /// `sendMessage` endpoint URL.
    pub fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_base.trim_end_matches('/'),
            self.bot_token
        )
    }
}

// The token grants full control of the bot; keep it out of logs.
impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("api_base", &self.api_base)
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// `sendMessage` request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SendMessageRequest {
    pub chat_id: String,
    pub text: String,
}

/// Envelope every Bot API method answers with.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ApiResponse {
    pub ok: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub error_code: Option<u16>,
}

/// Sends orders as chat messages through a Telegram bot.
///
/// One POST per order, no retries.
#[derive(Debug, Clone)]
pub struct TelegramSubmitter {
    config: TelegramConfig,
    client: reqwest::Client,
}

impl TelegramSubmitter {
    /// Create a submitter; fails on missing token or chat id.
    pub fn new(config: TelegramConfig) -> Result<Self, NotifyError> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .connect_timeout(config.timeout.connect)
            .timeout(config.timeout.total)
            .build()
            .map_err(|e| NotifyError::Config(e.to_string()))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &TelegramConfig {
        &self.config
    }

    /// Deliver one message.
    pub async fn send_message(&self, text: &str) -> Result<(), NotifyError> {
        let body = SendMessageRequest {
            chat_id: self.config.chat_id.clone(),
            text: text.to_string(),
        };

        debug!(chat_id = %self.config.chat_id, bytes = text.len(), "sending order message");

        let response = self
            .client
            .post(self.config.send_message_url())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        let parsed: Option<ApiResponse> = serde_json::from_slice(&bytes).ok();

        match parsed {
            Some(api) if status.is_success() && api.ok => Ok(()),
            Some(api) if status.is_success() => Err(NotifyError::Api(
                api.description
                    .unwrap_or_else(|| "unknown error".to_string()),
            )),
            Some(api) => Err(NotifyError::Http {
                status: status.as_u16(),
                description: api
                    .description
                    .unwrap_or_else(|| status_reason(status)),
            }),
            None if status.is_success() => Err(NotifyError::Deserialization(format!(
                "unexpected response body ({} bytes)",
                bytes.len()
            ))),
            None => Err(NotifyError::Http {
                status: status.as_u16(),
                description: status_reason(status),
            }),
        }
    }
}

fn status_reason(status: reqwest::StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("unknown status")
        .to_string()
}

#[async_trait]
impl OrderSubmitter for TelegramSubmitter {
    async fn submit_order(&self, text: &str) -> Result<(), SubmitError> {
        self.send_message(text).await.map_err(|e| {
            warn!(error = %e, "telegram delivery failed");
            SubmitError::from(e)
        })
    }

    fn name(&self) -> &str {
        "telegram"
    }
}
