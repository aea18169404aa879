//! LINE Messaging API wire types.
//!
//! These types cover the subset of the Messaging API the board needs:
//! inbound webhook events, the reply request, text and Flex carousel
//! messages, and the error body the API returns.
//!
//! See: <https://developers.line.biz/en/reference/messaging-api/>

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Webhook Types
// =============================================================================

/// Body of a webhook delivery.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    /// Bot user ID the events are addressed to.
    #[serde(default)]
    pub destination: Option<String>,
    /// Events in delivery order. Empty for the console's verify request.
    ///
    /// Kept as raw JSON so one malformed event does not reject the batch.
    pub events: Vec<Value>,
}

impl WebhookPayload {
    /// Decode each event on its own, in delivery order.
    pub fn decoded_events(&self) -> impl Iterator<Item = Result<Event, serde_json::Error>> + '_ {
        self.events.iter().map(Event::deserialize)
    }
}

/// A webhook event.
///
/// Only message events are modelled; every other event type (follow,
/// postback, unsend, ...) deserializes to [`Event::Unsupported`].
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    /// A user sent a message.
    Message(MessageEvent),
    /// Any event type the board does not handle.
    #[serde(other)]
    Unsupported,
}

impl Event {
    /// Short name for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Message(_) => "message",
            Self::Unsupported => "unsupported",
        }
    }
}

/// Payload of a message event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEvent {
    /// One-time token for replying to this event. Absent for events
    /// delivered while the channel is in standby mode.
    #[serde(default)]
    pub reply_token: Option<String>,
    /// The received message.
    pub message: MessageContent,
    /// Who sent the message.
    #[serde(default)]
    pub source: Option<EventSource>,
    /// Event time in milliseconds since the epoch.
    #[serde(default)]
    pub timestamp: Option<i64>,
    /// Unique event ID, stable across redeliveries.
    #[serde(default)]
    pub webhook_event_id: Option<String>,
}

/// Message content of a message event.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum MessageContent {
    /// Plain text message.
    Text(TextMessage),
    /// Stickers, images, locations, and any other message type.
    #[serde(other)]
    Unsupported,
}

/// A received text message.
#[derive(Debug, Clone, Deserialize)]
pub struct TextMessage {
    /// Message ID.
    pub id: String,
    /// Message text.
    pub text: String,
}

/// Source of an event.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSource {
    /// Source type (`user`, `group`, or `room`).
    #[serde(rename = "type")]
    pub source_type: String,
    /// Sending user, when the user has consented to sharing it.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Group ID for group chats.
    #[serde(default)]
    pub group_id: Option<String>,
    /// Room ID for multi-person chats.
    #[serde(default)]
    pub room_id: Option<String>,
}

// =============================================================================
// Reply Types
// =============================================================================

/// Request body for `POST /v2/bot/message/reply`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyRequest {
    /// Reply token from the webhook event.
    pub reply_token: String,
    /// Messages to send (1 to 5).
    pub messages: Vec<Message>,
}

/// An outgoing message.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    /// Text message.
    Text { text: String },
    /// Flex message.
    Flex {
        #[serde(rename = "altText")]
        alt_text: String,
        contents: Carousel,
    },
}

/// Flex carousel container.
#[derive(Debug, Clone, Serialize)]
pub struct Carousel {
    #[serde(rename = "type")]
    pub container_type: &'static str,
    pub contents: Vec<Bubble>,
}

impl Carousel {
    /// Create a carousel from bubbles.
    #[must_use]
    pub const fn new(contents: Vec<Bubble>) -> Self {
        Self {
            container_type: "carousel",
            contents,
        }
    }
}

/// Flex bubble container (one carousel page).
#[derive(Debug, Clone, Serialize)]
pub struct Bubble {
    #[serde(rename = "type")]
    pub container_type: &'static str,
    pub body: FlexBox,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<FlexBox>,
}

impl Bubble {
    /// Create a bubble with a body and optional footer.
    #[must_use]
    pub const fn new(body: FlexBox, footer: Option<FlexBox>) -> Self {
        Self {
            container_type: "bubble",
            body,
            footer,
        }
    }
}

/// Flex box component.
#[derive(Debug, Clone, Serialize)]
pub struct FlexBox {
    #[serde(rename = "type")]
    pub component_type: &'static str,
    pub layout: &'static str,
    pub contents: Vec<FlexComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<&'static str>,
}

impl FlexBox {
    /// Create a vertical box.
    #[must_use]
    pub const fn vertical(contents: Vec<FlexComponent>, spacing: Option<&'static str>) -> Self {
        Self {
            component_type: "box",
            layout: "vertical",
            contents,
            spacing,
        }
    }
}

/// Flex components placed inside a box.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlexComponent {
    /// Text component.
    Text {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        size: Option<&'static str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        weight: Option<&'static str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        color: Option<&'static str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        margin: Option<&'static str>,
        wrap: bool,
    },
    /// Horizontal rule.
    Separator {
        #[serde(skip_serializing_if = "Option::is_none")]
        margin: Option<&'static str>,
    },
    /// Button component.
    Button {
        action: Action,
        #[serde(skip_serializing_if = "Option::is_none")]
        style: Option<&'static str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        height: Option<&'static str>,
    },
}

/// Action triggered by a button.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Open a URL.
    Uri { label: String, uri: String },
}

// =============================================================================
// Error Response Types
// =============================================================================

/// Error body returned by the Messaging API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorResponse {
    /// Summary message.
    #[serde(default)]
    pub message: String,
    /// Per-field problems.
    #[serde(default)]
    pub details: Vec<ApiErrorDetail>,
}

/// A single entry of an error body's `details` list.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorDetail {
    /// Human-readable problem.
    #[serde(default)]
    pub message: String,
    /// JSON path of the offending field.
    #[serde(default)]
    pub property: Option<String>,
}
