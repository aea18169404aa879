//! LINE Messaging API integration.
//!
//! - [`signature`] verifies `X-Line-Signature` on webhook deliveries
//! - [`types`] holds the webhook and reply wire formats
//! - [`messages`] turns board replies into text and Flex messages
//! - [`client`] posts replies with a one-time reply token

pub mod client;
pub mod error;
pub mod messages;
pub mod signature;
pub mod types;

pub use client::LineClient;
pub use error::{ErrorDetail, ReplyError};
pub use signature::{SIGNATURE_HEADER, compute_signature, verify_signature};
