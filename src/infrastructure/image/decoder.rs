//! Decodes backend image payloads into pixels.

use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::{ImagePayload, InvalidPayload};

/// Errors that can occur while decoding a payload.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DecodeError {
    /// The payload text is not base64.
    #[error(transparent)]
    Payload(#[from] InvalidPayload),
    /// The bytes are not an image format we can read.
    #[error("Decode error: {0}")]
    Format(String),
    /// The decode task did not finish.
    #[error("Decode task failed: {0}")]
    Task(String),
}

/// Decodes a payload, sniffing the format from its bytes.
///
/// # Errors
/// Returns [`DecodeError::Payload`] when the text is not base64 and
/// [`DecodeError::Format`] when the bytes are not a supported image.
pub fn decode_payload(payload: &ImagePayload) -> Result<image::DynamicImage, DecodeError> {
    let bytes = payload.decode()?;
    let format = image::guess_format(&bytes)
        .map_err(|e| DecodeError::Format(format!("unknown image format: {e}")))?;
    debug!(?format, bytes = bytes.len(), "Decoding image payload");

    image::load_from_memory_with_format(&bytes, format)
        .map_err(|e| DecodeError::Format(format!("Failed to decode image: {e}")))
}

/// Decodes on the blocking pool so large images do not stall the UI task.
///
/// # Errors
/// Returns [`DecodeError`] if decoding fails or the task panics.
pub async fn decode_payload_async(
    payload: ImagePayload,
) -> Result<Arc<image::DynamicImage>, DecodeError> {
    tokio::task::spawn_blocking(move || decode_payload(&payload))
        .await
        .map_err(|e| DecodeError::Task(format!("Decode task panicked: {e}")))?
        .map(Arc::new)
}
