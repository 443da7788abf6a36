//! Generated image payloads and the state of the image display.

use std::sync::Arc;

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

/// Transparent 1x1 gif shown while a request is in flight.
pub const PLACEHOLDER_SRC: &str =
    "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";

pub const ALT_GENERATING: &str = "Generating...";
pub const ALT_LOADING: &str = "Loading image...";
pub const ALT_GENERATED: &str = "Generated Image";
pub const ALT_NOT_FOUND: &str = "Image not found for this prompt.";
pub const ALT_LOAD_FAILED: &str = "Error loading image.";
pub const ALT_NOT_YET_GENERATED: &str = "Image not yet generated for this new prompt.";

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// The payload text is not base64 in any accepted dialect.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid image payload: {0}")]
pub struct InvalidPayload(String);

/// Base64 image data as received from the backend.
///
/// The text is kept as sent and only decoded by whoever needs the pixels, so
/// a malformed payload never turns a stored generation into a failure.
#[derive(Clone, PartialEq, Eq)]
pub struct ImagePayload {
    encoded: Arc<str>,
}

impl ImagePayload {
    /// Wraps a base64 payload. Returns `None` when it is blank.
    #[must_use]
    pub fn from_base64(encoded: impl AsRef<str>) -> Option<Self> {
        let encoded = encoded.as_ref().trim();
        if encoded.is_empty() {
            return None;
        }
        Some(Self {
            encoded: encoded.into(),
        })
    }

    #[must_use]
    pub fn encoded(&self) -> &str {
        &self.encoded
    }

    /// Decodes the payload, accepting missing padding and the URL-safe
    /// alphabet.
    ///
    /// # Errors
    /// Returns [`InvalidPayload`] when neither alphabet decodes it.
    pub fn decode(&self) -> Result<Vec<u8>, InvalidPayload> {
        STANDARD_LENIENT
            .decode(self.encoded.as_bytes())
            .or_else(|_| URL_SAFE_LENIENT.decode(self.encoded.as_bytes()))
            .map_err(|e| InvalidPayload(e.to_string()))
    }

    /// Returns the `data:` URI the backend contract labels as PNG.
    #[must_use]
    pub fn data_uri(&self) -> String {
        format!("data:image/png;base64,{}", self.encoded)
    }
}

impl std::fmt::Debug for ImagePayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImagePayload")
            .field("encoded_len", &self.encoded.len())
            .finish()
    }
}

/// Why the display holds no image after a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFault {
    /// The server answered without an image.
    NotFound,
    /// The request or its payload failed.
    LoadFailed,
}

impl ImageFault {
    #[must_use]
    pub const fn alt_text(self) -> &'static str {
        match self {
            Self::NotFound => ALT_NOT_FOUND,
            Self::LoadFailed => ALT_LOAD_FAILED,
        }
    }
}

/// State of the single image display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageDisplay {
    /// Nothing shown yet.
    #[default]
    Empty,
    /// Emptied on purpose, with an explanation in place of the image.
    Cleared {
        alt: &'static str,
    },
    Generating,
    Loading,
    Loaded(ImagePayload),
    Error(ImageFault),
}

impl ImageDisplay {
    #[must_use]
    pub const fn not_yet_generated() -> Self {
        Self::Cleared {
            alt: ALT_NOT_YET_GENERATED,
        }
    }

    /// Returns the image source as a URI.
    ///
    /// Failures keep the placeholder that preceded them.
    #[must_use]
    pub fn src(&self) -> String {
        match self {
            Self::Empty | Self::Cleared { .. } => String::new(),
            Self::Generating | Self::Loading | Self::Error(_) => PLACEHOLDER_SRC.to_string(),
            Self::Loaded(payload) => payload.data_uri(),
        }
    }

    #[must_use]
    pub const fn alt(&self) -> &'static str {
        match self {
            Self::Empty => "",
            Self::Cleared { alt } => alt,
            Self::Generating => ALT_GENERATING,
            Self::Loading => ALT_LOADING,
            Self::Loaded(_) => ALT_GENERATED,
            Self::Error(fault) => fault.alt_text(),
        }
    }

    #[must_use]
    pub const fn payload(&self) -> Option<&ImagePayload> {
        match self {
            Self::Loaded(payload) => Some(payload),
            _ => None,
        }
    }
}
