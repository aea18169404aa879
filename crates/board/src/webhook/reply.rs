//! Transport-neutral reply values.
//!
//! The dispatcher decides *what* to say with these types; the LINE client
//! turns them into Messaging API JSON.

/// A reply to one inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundReply {
    /// Plain text message.
    PlainText(String),
    /// Horizontally paged cards.
    CardCarousel(CardCarousel),
}

impl OutboundReply {
    /// Build a plain text reply.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::PlainText(text.into())
    }

    /// The text of a plain text reply.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::PlainText(text) => Some(text),
            Self::CardCarousel(_) => None,
        }
    }

    /// The carousel of a card reply.
    #[must_use]
    pub const fn as_carousel(&self) -> Option<&CardCarousel> {
        match self {
            Self::CardCarousel(carousel) => Some(carousel),
            Self::PlainText(_) => None,
        }
    }
}

/// Ordered cards shown as one rich message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardCarousel {
    pub cards: Vec<Card>,
}

impl CardCarousel {
    #[must_use]
    pub const fn new(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// One page of a carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub subtitle: String,
    pub body: String,
    pub actions: Vec<CardAction>,
}

/// A button on a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardAction {
    /// Open a URL in the chat's browser.
    OpenUri { label: String, uri: String },
}
