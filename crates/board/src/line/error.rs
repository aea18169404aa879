//! LINE reply errors.

use thiserror::Error;

use super::types::{ApiErrorDetail, ApiErrorResponse};

/// One problem reported in a LINE error body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    /// JSON path of the offending field, when LINE names one.
    pub property: Option<String>,
    /// Human-readable problem.
    pub message: String,
}

impl From<ApiErrorDetail> for ErrorDetail {
    fn from(detail: ApiErrorDetail) -> Self {
        Self {
            property: detail.property,
            message: detail.message,
        }
    }
}

/// Errors that can occur when sending a reply.
#[derive(Debug, Clone, Error)]
pub enum ReplyError {
    /// The reply token was already used, expired, or never existed.
    #[error("reply token rejected: {message}")]
    TokenExpiredOrInvalid { message: String },

    /// LINE refused the message body (HTTP 400 or 413).
    #[error("reply payload rejected: {message}")]
    PayloadRejected {
        message: String,
        details: Vec<ErrorDetail>,
    },

    /// The request never produced a response (connect failure, timeout).
    #[error("LINE request failed: {0}")]
    Transport(String),

    /// Any other non-success status.
    #[error("LINE API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        details: Vec<ErrorDetail>,
    },
}

impl ReplyError {
    /// Stable name for logs and metrics labels.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::TokenExpiredOrInvalid { .. } => "token_expired_or_invalid",
            Self::PayloadRejected { .. } => "payload_rejected",
            Self::Transport(_) => "transport",
            Self::Api { .. } => "api",
        }
    }

    /// Per-field problems reported by LINE, if any.
    #[must_use]
    pub fn details(&self) -> &[ErrorDetail] {
        match self {
            Self::PayloadRejected { details, .. } | Self::Api { details, .. } => details,
            Self::TokenExpiredOrInvalid { .. } | Self::Transport(_) => &[],
        }
    }

    /// Classify a non-success response from the reply endpoint.
    ///
    /// LINE answers a stale or reused reply token with a plain 400 whose
    /// message is `Invalid reply token`, so the message text is what tells
    /// it apart from a malformed body.
    #[must_use]
    pub fn from_status(status: u16, body: ApiErrorResponse) -> Self {
        let ApiErrorResponse { message, details } = body;
        let details: Vec<ErrorDetail> = details.into_iter().map(ErrorDetail::from).collect();

        match status {
            400 if mentions_reply_token(&message) => Self::TokenExpiredOrInvalid { message },
            400 | 413 => Self::PayloadRejected { message, details },
            _ => Self::Api {
                status,
                message,
                details,
            },
        }
    }
}

fn mentions_reply_token(message: &str) -> bool {
    message.to_ascii_lowercase().contains("reply token")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(message: &str, details: &[(&str, &str)]) -> ApiErrorResponse {
        ApiErrorResponse {
            message: message.to_string(),
            details: details
                .iter()
                .map(|(property, message)| ApiErrorDetail {
                    message: (*message).to_string(),
                    property: Some((*property).to_string()),
                })
                .collect(),
        }
    }

    #[test]
    fn test_invalid_reply_token() {
        let error = ReplyError::from_status(400, body("Invalid reply token", &[]));
        assert!(matches!(error, ReplyError::TokenExpiredOrInvalid { .. }));
        assert_eq!(error.kind(), "token_expired_or_invalid");
        assert!(error.details().is_empty());
    }

    #[test]
    fn test_bad_request_with_details() {
        let error = ReplyError::from_status(
            400,
            body(
                "The request body has 1 error(s)",
                &[("messages[0].contents.contents", "must not be empty")],
            ),
        );

        assert_eq!(error.kind(), "payload_rejected");
        assert_eq!(
            error.details(),
            &[ErrorDetail {
                property: Some("messages[0].contents.contents".to_string()),
                message: "must not be empty".to_string(),
            }]
        );
    }

    #[test]
    fn test_payload_too_large() {
        let error = ReplyError::from_status(413, ApiErrorResponse::default());
        assert_eq!(error.kind(), "payload_rejected");
    }

    #[test]
    fn test_other_statuses_are_api_errors() {
        for status in [401, 403, 429, 500, 503] {
            let error = ReplyError::from_status(status, body("nope", &[]));
            assert!(
                matches!(error, ReplyError::Api { status: s, .. } if s == status),
                "status {status}"
            );
        }
    }

    #[test]
    fn test_reply_token_message_only_matters_for_400() {
        let error = ReplyError::from_status(500, body("Invalid reply token", &[]));
        assert_eq!(error.kind(), "api");
    }

    #[test]
    fn test_display() {
        let error = ReplyError::Api {
            status: 429,
            message: "Too Many Requests".to_string(),
            details: vec![],
        };
        assert_eq!(error.to_string(), "LINE API error (429): Too Many Requests");
        assert_eq!(
            ReplyError::Transport("timed out".to_string()).to_string(),
            "LINE request failed: timed out"
        );
    }
}
