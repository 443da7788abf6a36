//! Errors raised while generating or fetching images.

use thiserror::Error;

/// Failure taxonomy for the two image actions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum GenerationError {
    #[error("{message}")]
    Validation { message: String },

    #[error("server rejected the request: {message}")]
    Application { message: String },

    #[error("transport error: {message}")]
    Transport { message: String },

    #[error("image not found for prompt {prompt_id}")]
    NotFound { prompt_id: String },
}

impl GenerationError {
    /// Creates validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates error reported by the backend.
    #[must_use]
    pub fn application(message: impl Into<String>) -> Self {
        Self::Application {
            message: message.into(),
        }
    }

    /// Creates transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Returns the text shown to the user for this error.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Validation { message } | Self::Application { message } => message,
            Self::Transport { .. } => "An error occurred while generating the image.",
            Self::NotFound { .. } => crate::domain::entities::ALT_NOT_FOUND,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_hides_transport_detail() {
        let err = GenerationError::transport("connection refused");
        assert_eq!(
            err.user_message(),
            "An error occurred while generating the image."
        );
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_application_message_passes_through() {
        let err = GenerationError::application("quota exceeded");
        assert_eq!(err.user_message(), "quota exceeded");
    }

    #[test]
    fn test_not_found_message() {
        let err = GenerationError::NotFound {
            prompt_id: "7".to_string(),
        };
        assert_eq!(err.user_message(), crate::domain::entities::ALT_NOT_FOUND);
    }
}
