//! LINE Messaging API reply client.

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use super::error::ReplyError;
use super::messages::build_message;
use super::types::{ApiErrorResponse, ReplyRequest};
use crate::config::LineConfig;
use crate::webhook::ReplySender;
use crate::webhook::reply::OutboundReply;

/// Client for the reply endpoint.
#[derive(Clone)]
pub struct LineClient {
    client: Client,
    channel_access_token: SecretString,
    reply_url: String,
}

impl std::fmt::Debug for LineClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineClient")
            .field("channel_access_token", &"[REDACTED]")
            .field("reply_url", &self.reply_url)
            .finish_non_exhaustive()
    }
}

impl LineClient {
    /// Create a client from LINE configuration.
    ///
    /// Every request is bounded by the configured reply timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built (TLS backend
    /// initialization failure).
    pub fn new(config: &LineConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.reply_timeout).build()?;

        Ok(Self {
            client,
            channel_access_token: config.channel_access_token.clone(),
            reply_url: format!(
                "{}/v2/bot/message/reply",
                config.api_base.as_str().trim_end_matches('/')
            ),
        })
    }

    /// URL replies are posted to.
    #[must_use]
    pub fn reply_url(&self) -> &str {
        &self.reply_url
    }

    /// Send one message using a reply token.
    ///
    /// # Errors
    ///
    /// Returns a [`ReplyError`] describing why LINE did not accept the reply.
    #[instrument(skip(self, reply_token, message))]
    pub async fn send_reply(
        &self,
        reply_token: &str,
        message: &OutboundReply,
    ) -> Result<(), ReplyError> {
        let request = ReplyRequest {
            reply_token: reply_token.to_string(),
            messages: vec![build_message(message)],
        };

        let response = self
            .client
            .post(&self.reply_url)
            .bearer_auth(self.channel_access_token.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| ReplyError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            debug!(status = status.as_u16(), "Reply sent to LINE");
            return Ok(());
        }

        let body = response
            .text()
            .await
            .map_err(|e| ReplyError::Transport(e.to_string()))?;

        // Gateways in front of LINE can answer with non-JSON bodies
        let error_body = serde_json::from_str::<ApiErrorResponse>(&body).unwrap_or_else(|_| {
            ApiErrorResponse {
                message: body,
                details: Vec::new(),
            }
        });

        Err(ReplyError::from_status(status.as_u16(), error_body))
    }
}

impl ReplySender for LineClient {
    async fn reply(&self, reply_token: &str, message: &OutboundReply) -> Result<(), ReplyError> {
        self.send_reply(reply_token, message).await
    }
}
