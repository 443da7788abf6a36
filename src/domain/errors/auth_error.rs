//! Session login error types.

use thiserror::Error;

/// Login error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum AuthError {
    #[error("no password supplied for user {username}")]
    MissingPassword { username: String },

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("network error during login: {message}")]
    NetworkError { message: String },

    #[error("unexpected login error: {message}")]
    Unexpected { message: String },
}

impl AuthError {
    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::NetworkError { .. })
    }
}
