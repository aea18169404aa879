//! Entry list to card carousel.

use tracing::debug;
use url::Url;

use super::reply::{Card, CardAction, CardCarousel};
use crate::models::Entry;

/// Most bubbles LINE accepts in one carousel.
pub const MAX_CAROUSEL_CARDS: usize = 12;

/// Card titles are cut to this many characters.
pub const CARD_TITLE_MAX_CHARS: usize = 40;

/// Card bodies are cut to this many characters.
pub const CARD_BODY_MAX_CHARS: usize = 300;

/// Label of the link button on each card.
pub const OPEN_ENTRY_LABEL: &str = "掲示板で見る";

/// Title of the card shown when there are no entries.
pub const EMPTY_TITLE: &str = "周知事項はありません";

/// Body of the card shown when there are no entries.
pub const EMPTY_BODY: &str = "現在登録されている周知事項はありません。";

/// Builds the carousel sent for the list command.
#[derive(Debug, Clone, Default)]
pub struct CarouselFormatter {
    entry_link_base: Option<Url>,
}

impl CarouselFormatter {
    /// Create a formatter. With a base URL, every card links to its entry
    /// on the board page.
    #[must_use]
    pub const fn new(entry_link_base: Option<Url>) -> Self {
        Self { entry_link_base }
    }

    /// One card per entry in input order, capped at [`MAX_CAROUSEL_CARDS`].
    ///
    /// An empty list yields a single placeholder card, since LINE rejects
    /// a carousel with no bubbles.
    #[must_use]
    pub fn format(&self, entries: &[Entry]) -> CardCarousel {
        if entries.is_empty() {
            return CardCarousel::new(vec![placeholder_card()]);
        }

        if entries.len() > MAX_CAROUSEL_CARDS {
            debug!(
                total = entries.len(),
                shown = MAX_CAROUSEL_CARDS,
                "Entries beyond carousel limit omitted"
            );
        }

        CardCarousel::new(
            entries
                .iter()
                .take(MAX_CAROUSEL_CARDS)
                .map(|entry| self.card(entry))
                .collect(),
        )
    }

    fn card(&self, entry: &Entry) -> Card {
        Card {
            title: truncate_chars(&entry.title, CARD_TITLE_MAX_CHARS),
            subtitle: entry.deadline.to_string(),
            body: truncate_chars(&entry.body, CARD_BODY_MAX_CHARS),
            actions: self.actions(entry),
        }
    }

    fn actions(&self, entry: &Entry) -> Vec<CardAction> {
        self.entry_link_base
            .as_ref()
            .map(|base| CardAction::OpenUri {
                label: OPEN_ENTRY_LABEL.to_string(),
                uri: format!(
                    "{}/#entry-{}",
                    base.as_str().trim_end_matches('/'),
                    entry.id
                ),
            })
            .into_iter()
            .collect()
    }
}

fn placeholder_card() -> Card {
    Card {
        title: EMPTY_TITLE.to_string(),
        subtitle: String::new(),
        body: EMPTY_BODY.to_string(),
        actions: Vec::new(),
    }
}

/// Keep the first `max` Unicode scalar values of `s`.
fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use notice_board_core::{Deadline, EntryId};

    use super::*;

    fn entry(id: i32, title: &str, deadline: &str, body: &str) -> Entry {
        Entry {
            id: EntryId::new(id),
            title: title.to_string(),
            deadline: Deadline::from_iso_date(deadline).expect("valid date"),
            body: body.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_one_card_per_entry_in_order() {
        let entries = vec![
            entry(1, "A", "2024-01-01", "first"),
            entry(2, "B", "2024-02-01", "second"),
        ];

        let carousel = CarouselFormatter::default().format(&entries);

        assert_eq!(carousel.len(), 2);
        let first = &carousel.cards[0];
        assert_eq!(first.title, "A");
        assert_eq!(first.subtitle, "2024年01月01日");
        assert_eq!(first.body, "first");
        assert!(first.actions.is_empty());
        assert_eq!(carousel.cards[1].title, "B");
        assert_eq!(carousel.cards[1].subtitle, "2024年02月01日");
    }

    #[test]
    fn test_empty_list_yields_placeholder() {
        let carousel = CarouselFormatter::default().format(&[]);

        assert_eq!(carousel.len(), 1);
        let card = &carousel.cards[0];
        assert_eq!(card.title, EMPTY_TITLE);
        assert_eq!(card.subtitle, "");
        assert_eq!(card.body, EMPTY_BODY);
        assert!(card.actions.is_empty());
    }

    #[test]
    fn test_placeholder_has_no_link_even_with_base_url() {
        let base = Url::parse("https://board.example.com").expect("valid url");
        let carousel = CarouselFormatter::new(Some(base)).format(&[]);
        assert!(carousel.cards[0].actions.is_empty());
    }

    #[test]
    fn test_long_fields_are_cut() {
        let title = "あ".repeat(CARD_TITLE_MAX_CHARS + 10);
        let body = "本".repeat(CARD_BODY_MAX_CHARS + 1);

        let carousel =
            CarouselFormatter::default().format(&[entry(1, &title, "2024-01-01", &body)]);

        let card = &carousel.cards[0];
        assert_eq!(card.title.chars().count(), CARD_TITLE_MAX_CHARS);
        assert_eq!(card.body.chars().count(), CARD_BODY_MAX_CHARS);
        assert!(title.starts_with(&card.title));
        assert!(!card.title.ends_with('…'));
    }

    #[test]
    fn test_fields_at_limit_are_kept() {
        let title = "a".repeat(CARD_TITLE_MAX_CHARS);
        let body = "b".repeat(CARD_BODY_MAX_CHARS);

        let carousel =
            CarouselFormatter::default().format(&[entry(1, &title, "2024-01-01", &body)]);

        assert_eq!(carousel.cards[0].title, title);
        assert_eq!(carousel.cards[0].body, body);
    }

    #[test]
    fn test_capped_at_carousel_limit() {
        let entries: Vec<Entry> = (1..=15)
            .map(|i| entry(i, &format!("entry {i}"), "2024-01-01", "body"))
            .collect();

        let carousel = CarouselFormatter::default().format(&entries);

        assert_eq!(carousel.len(), MAX_CAROUSEL_CARDS);
        assert_eq!(carousel.cards[0].title, "entry 1");
        assert_eq!(carousel.cards[MAX_CAROUSEL_CARDS - 1].title, "entry 12");
    }

    #[test]
    fn test_link_action_with_base_url() {
        let base = Url::parse("https://board.example.com/").expect("valid url");
        let carousel =
            CarouselFormatter::new(Some(base)).format(&[entry(7, "A", "2024-01-01", "body")]);

        assert_eq!(
            carousel.cards[0].actions,
            vec![CardAction::OpenUri {
                label: OPEN_ENTRY_LABEL.to_string(),
                uri: "https://board.example.com/#entry-7".to_string(),
            }]
        );
    }

    #[test]
    fn test_truncate_chars_counts_scalars_not_bytes() {
        assert_eq!(truncate_chars("周知事項", 2), "周知");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }
}
