//! LINE webhook handling.
//!
//! A delivery flows through [`WebhookDispatcher::dispatch`]: the body is
//! checked against `X-Line-Signature`, parsed into events, and each text
//! message is looked up in the [`CommandTable`]. The list command renders
//! stored entries with the [`CarouselFormatter`]; everything else answers
//! with fixed text. Exactly one reply is attempted per handled event.
//!
//! The dispatcher is generic over where entries come from ([`EntrySource`])
//! and how replies leave ([`ReplySender`]) so the flow can be exercised
//! without a database or the LINE API.

pub mod carousel;
pub mod commands;
pub mod dispatcher;
pub mod reply;

use std::future::Future;

use crate::db::RepositoryError;
use crate::line::ReplyError;
use crate::models::Entry;

pub use carousel::CarouselFormatter;
pub use commands::{Command, CommandTable};
pub use dispatcher::{DispatchReport, MalformedPayloadError, VerificationError, WebhookDispatcher};
pub use reply::{Card, CardAction, CardCarousel, OutboundReply};

/// Read access to stored entries.
pub trait EntrySource {
    /// All entries, earliest deadline first.
    fn list_by_deadline(&self) -> impl Future<Output = Result<Vec<Entry>, RepositoryError>> + Send;
}

/// Sends a reply for one inbound event.
pub trait ReplySender {
    /// Reply using the event's one-time token.
    fn reply(
        &self,
        reply_token: &str,
        message: &OutboundReply,
    ) -> impl Future<Output = Result<(), ReplyError>> + Send;
}
