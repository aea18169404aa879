//! Builders that turn board replies into LINE messages.
//!
//! A [`CardCarousel`] becomes a Flex carousel with one bubble per card:
//! - Body: bold title, grey subtitle (the deadline), separator, wrapped body
//! - Footer: one link button per card action, omitted when there are none

use super::types::{Action, Bubble, Carousel, FlexBox, FlexComponent, Message};
use crate::webhook::reply::{Card, CardAction, CardCarousel, OutboundReply};

/// Notification and fallback text for carousel replies.
pub const CAROUSEL_ALT_TEXT: &str = "周知事項一覧";

/// Build the LINE message for a reply.
#[must_use]
pub fn build_message(reply: &OutboundReply) -> Message {
    match reply {
        OutboundReply::PlainText(text) => Message::Text { text: text.clone() },
        OutboundReply::CardCarousel(carousel) => build_carousel_message(carousel),
    }
}

/// Build a Flex carousel message.
#[must_use]
pub fn build_carousel_message(carousel: &CardCarousel) -> Message {
    Message::Flex {
        alt_text: CAROUSEL_ALT_TEXT.to_string(),
        contents: Carousel::new(carousel.cards.iter().map(build_bubble).collect()),
    }
}

fn build_bubble(card: &Card) -> Bubble {
    let mut body = vec![FlexComponent::Text {
        text: card.title.clone(),
        size: Some("lg"),
        weight: Some("bold"),
        color: None,
        margin: None,
        wrap: true,
    }];

    // Flex rejects empty text components
    if !card.subtitle.is_empty() {
        body.push(FlexComponent::Text {
            text: card.subtitle.clone(),
            size: Some("sm"),
            weight: None,
            color: Some("#888888"),
            margin: Some("sm"),
            wrap: true,
        });
    }

    body.push(FlexComponent::Separator { margin: Some("md") });
    body.push(FlexComponent::Text {
        text: card.body.clone(),
        size: Some("sm"),
        weight: None,
        color: None,
        margin: Some("md"),
        wrap: true,
    });

    let footer = (!card.actions.is_empty()).then(|| {
        FlexBox::vertical(
            card.actions.iter().map(build_button).collect(),
            Some("sm"),
        )
    });

    Bubble::new(FlexBox::vertical(body, None), footer)
}

fn build_button(action: &CardAction) -> FlexComponent {
    match action {
        CardAction::OpenUri { label, uri } => FlexComponent::Button {
            action: Action::Uri {
                label: label.clone(),
                uri: uri.clone(),
            },
            style: Some("link"),
            height: Some("sm"),
        },
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;

    fn card(title: &str, subtitle: &str, actions: Vec<CardAction>) -> Card {
        Card {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            body: "本文".to_string(),
            actions,
        }
    }

    fn to_json(message: &Message) -> Value {
        serde_json::to_value(message).expect("serialize")
    }

    #[test]
    fn test_plain_text() {
        let json = to_json(&build_message(&OutboundReply::text("こんにちは")));
        assert_eq!(json["type"], "text");
        assert_eq!(json["text"], "こんにちは");
    }

    #[test]
    fn test_carousel_has_one_bubble_per_card() {
        let carousel = CardCarousel::new(vec![
            card("A", "2024年01月01日", vec![]),
            card("B", "2024年02月01日", vec![]),
        ]);

        let json = to_json(&build_message(&OutboundReply::CardCarousel(carousel)));
        assert_eq!(json["type"], "flex");
        assert_eq!(json["altText"], CAROUSEL_ALT_TEXT);

        let bubbles = json["contents"]["contents"].as_array().expect("bubbles");
        assert_eq!(bubbles.len(), 2);
        assert_eq!(bubbles[0]["body"]["contents"][0]["text"], "A");
        assert_eq!(bubbles[0]["body"]["contents"][1]["text"], "2024年01月01日");
        assert_eq!(bubbles[1]["body"]["contents"][0]["text"], "B");
    }

    #[test]
    fn test_bubble_without_actions_has_no_footer() {
        let json = to_json(&build_carousel_message(&CardCarousel::new(vec![card(
            "A",
            "2024年01月01日",
            vec![],
        )])));
        assert!(json["contents"]["contents"][0].get("footer").is_none());
    }

    #[test]
    fn test_open_uri_becomes_link_button() {
        let json = to_json(&build_carousel_message(&CardCarousel::new(vec![card(
            "A",
            "2024年01月01日",
            vec![CardAction::OpenUri {
                label: "掲示板で見る".to_string(),
                uri: "https://board.example.com/#entry-1".to_string(),
            }],
        )])));

        let button = &json["contents"]["contents"][0]["footer"]["contents"][0];
        assert_eq!(button["type"], "button");
        assert_eq!(button["action"]["type"], "uri");
        assert_eq!(button["action"]["label"], "掲示板で見る");
        assert_eq!(button["action"]["uri"], "https://board.example.com/#entry-1");
    }

    #[test]
    fn test_empty_subtitle_is_skipped() {
        let json = to_json(&build_carousel_message(&CardCarousel::new(vec![card(
            "周知事項はありません",
            "",
            vec![],
        )])));

        let contents = json["contents"]["contents"][0]["body"]["contents"]
            .as_array()
            .expect("contents");
        assert!(
            contents
                .iter()
                .all(|c| c["type"] != "text" || c["text"] != "")
        );
        assert_eq!(contents[1]["type"], "separator");
    }
}
