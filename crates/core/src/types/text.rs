//! Validated text for entry titles and bodies.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`NonEmptyText`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TextError {
    /// The input is empty or only whitespace.
    #[error("{field} cannot be empty")]
    Empty {
        /// Name of the field being validated.
        field: &'static str,
    },
}

/// Text that is guaranteed to contain at least one non-whitespace character.
///
/// Surrounding whitespace is removed; inner line breaks are preserved so
/// announcement bodies keep their paragraphs.
///
/// ```
/// use notice_board_core::NonEmptyText;
///
/// let title = NonEmptyText::parse("  避難訓練 ", "title").unwrap();
/// assert_eq!(title.as_str(), "避難訓練");
///
/// assert!(NonEmptyText::parse(" \n ", "title").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Parse text for the named field.
    ///
    /// # Errors
    ///
    /// Returns [`TextError::Empty`] if nothing remains after trimming.
    pub fn parse(input: &str, field: &'static str) -> Result<Self, TextError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty { field });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the text as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the text and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims() {
        let text = NonEmptyText::parse("\t提出書類\n", "title").expect("non-empty");
        assert_eq!(text.as_str(), "提出書類");
    }

    #[test]
    fn test_parse_keeps_inner_newlines() {
        let text = NonEmptyText::parse("一行目\n二行目", "body").expect("non-empty");
        assert_eq!(text.into_inner(), "一行目\n二行目");
    }

    #[test]
    fn test_parse_empty_names_field() {
        let err = NonEmptyText::parse("   ", "body").unwrap_err();
        assert_eq!(err, TextError::Empty { field: "body" });
        assert_eq!(err.to_string(), "body cannot be empty");
    }
}
