//! LINE webhook endpoint.

use axum::{body::Bytes, extract::State, http::HeaderMap};
use tracing::{instrument, warn};

use crate::error::AppError;
use crate::line::SIGNATURE_HEADER;
use crate::state::AppState;
use crate::webhook::VerificationError;

/// Receive a LINE webhook delivery.
///
/// Answers `200 OK` for every signed delivery, including ones whose body
/// cannot be parsed or whose replies fail, so LINE does not redeliver.
/// A missing or wrong signature is a `400`.
#[instrument(skip_all)]
pub async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, AppError> {
    let Some(signature) = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
    else {
        warn!("Webhook delivery without signature header");
        return Err(VerificationError.into());
    };

    state.webhook().dispatch(&body, signature).await?;

    Ok("OK")
}
