//! Webhook signature verification.
//!
//! LINE signs every webhook delivery with HMAC-SHA256 over the raw request
//! body, keyed by the channel secret, and sends the base64-encoded digest in
//! the `X-Line-Signature` header.
//!
//! See: <https://developers.line.biz/en/reference/messaging-api/#signature-validation>

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the body signature.
pub const SIGNATURE_HEADER: &str = "x-line-signature";

/// Check `signature` against the HMAC of `body` under `channel_secret`.
///
/// Malformed base64 and digests of the wrong length are treated as a
/// mismatch. The digest comparison is constant-time.
#[must_use]
pub fn verify_signature(body: &[u8], signature: &str, channel_secret: &SecretString) -> bool {
    let Ok(provided) = BASE64.decode(signature.trim()) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(channel_secret.expose_secret().as_bytes()) else {
        return false;
    };
    mac.update(body);

    mac.verify_slice(&provided).is_ok()
}

/// Compute the `X-Line-Signature` value for `body`.
///
/// Used by tooling and tests that need to produce signed deliveries.
#[must_use]
pub fn compute_signature(body: &[u8], channel_secret: &SecretString) -> String {
    // HMAC accepts keys of any length
    let mut mac = HmacSha256::new_from_slice(channel_secret.expose_secret().as_bytes())
        .unwrap_or_else(|_| unreachable!("HMAC-SHA256 accepts any key length"));
    mac.update(body);
    BASE64.encode(mac.finalize().into_bytes())
}
