//! Webhook delivery dispatch.

use secrecy::SecretString;
use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use super::carousel::CarouselFormatter;
use super::commands::{
    Command, CommandTable, ENTRIES_UNAVAILABLE_REPLY, UNDER_CONSTRUCTION_REPLY,
    UNKNOWN_COMMAND_REPLY,
};
use super::reply::OutboundReply;
use super::{EntrySource, ReplySender};
use crate::line::signature::verify_signature;
use crate::line::types::{Event, MessageContent, MessageEvent, WebhookPayload};

/// The delivery was not signed with the channel secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("webhook signature verification failed")]
pub struct VerificationError;

/// A verified body that is not a webhook payload.
#[derive(Debug, Error)]
#[error("malformed webhook payload: {0}")]
pub struct MalformedPayloadError(#[from] serde_json::Error);

/// Outcome counts for one delivery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Text message events that got a reply attempt.
    pub handled: usize,
    /// Events of other types, non-text messages, messages without a reply
    /// token, and events that do not decode.
    pub ignored: usize,
    /// Handled events whose reply failed.
    pub failed: usize,
}

/// Routes verified webhook events to command replies.
pub struct WebhookDispatcher<S, R> {
    channel_secret: SecretString,
    commands: CommandTable,
    entries: S,
    replier: R,
    formatter: CarouselFormatter,
}

impl<S, R> std::fmt::Debug for WebhookDispatcher<S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookDispatcher")
            .field("channel_secret", &"[REDACTED]")
            .field("commands", &self.commands.len())
            .field("formatter", &self.formatter)
            .finish_non_exhaustive()
    }
}

impl<S, R> WebhookDispatcher<S, R>
where
    S: EntrySource + Sync,
    R: ReplySender + Sync,
{
    /// Create a dispatcher.
    #[must_use]
    pub const fn new(
        channel_secret: SecretString,
        commands: CommandTable,
        entries: S,
        replier: R,
        formatter: CarouselFormatter,
    ) -> Self {
        Self {
            channel_secret,
            commands,
            entries,
            replier,
            formatter,
        }
    }

    /// The reply sender.
    pub const fn replier(&self) -> &R {
        &self.replier
    }

    /// Verify and process one webhook delivery.
    ///
    /// Events are handled in array order, one reply attempt each. Reply
    /// failures are logged and counted; they never stop the batch. Each
    /// event is decoded on its own, so an event that does not decode is
    /// skipped without affecting the rest. A body that verifies but is not
    /// a webhook envelope is logged and acknowledged with an empty report.
    ///
    /// # Errors
    ///
    /// Returns [`VerificationError`] if `signature` does not match `body`.
    /// Nothing is parsed or sent in that case.
    #[instrument(skip_all, fields(body_len = body.len()))]
    pub async fn dispatch(
        &self,
        body: &[u8],
        signature: &str,
    ) -> Result<DispatchReport, VerificationError> {
        if !verify_signature(body, signature, &self.channel_secret) {
            warn!("Webhook signature verification failed");
            return Err(VerificationError);
        }

        let payload = match parse_payload(body) {
            Ok(payload) => payload,
            Err(error) => {
                warn!(error = %error, "Ignoring malformed webhook payload");
                return Ok(DispatchReport::default());
            }
        };

        let mut report = DispatchReport::default();

        for (index, decoded) in payload.decoded_events().enumerate() {
            let event = match decoded {
                Ok(event) => event,
                Err(error) => {
                    warn!(index, error = %error, "Skipping undecodable webhook event");
                    report.ignored += 1;
                    continue;
                }
            };

            let Event::Message(MessageEvent {
                reply_token: Some(reply_token),
                message: MessageContent::Text(message),
                ..
            }) = &event
            else {
                debug!(index, event = event.kind(), "Ignoring webhook event");
                report.ignored += 1;
                continue;
            };

            report.handled += 1;

            let reply = self.reply_for(&message.text).await;
            if let Err(error) = self.replier.reply(reply_token, &reply).await {
                warn!(
                    kind = error.kind(),
                    error = %error,
                    details = ?error.details(),
                    "Failed to send LINE reply"
                );
                report.failed += 1;
            }
        }

        info!(
            handled = report.handled,
            ignored = report.ignored,
            failed = report.failed,
            "Webhook delivery processed"
        );

        Ok(report)
    }

    async fn reply_for(&self, text: &str) -> OutboundReply {
        let command = self.commands.resolve(text);
        debug!(command = ?command, "Resolved chat command");

        match command {
            Some(Command::ListEntries) => match self.entries.list_by_deadline().await {
                Ok(entries) => OutboundReply::CardCarousel(self.formatter.format(&entries)),
                Err(error) => {
                    error!(error = %error, "Failed to load entries for carousel");
                    OutboundReply::text(ENTRIES_UNAVAILABLE_REPLY)
                }
            },
            Some(Command::UnderConstruction) => OutboundReply::text(UNDER_CONSTRUCTION_REPLY),
            None => OutboundReply::text(UNKNOWN_COMMAND_REPLY),
        }
    }
}

fn parse_payload(body: &[u8]) -> Result<WebhookPayload, MalformedPayloadError> {
    Ok(serde_json::from_slice(body)?)
}
