//! Login DTOs.

use crate::domain::ports::Credentials;

/// Where the login password came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordSource {
    /// `GENVIEW_PASSWORD` from the process environment or `.env`.
    Environment,
    /// Supplied programmatically.
    Provided,
}

impl std::fmt::Display for PasswordSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Environment => write!(f, "environment variable"),
            Self::Provided => write!(f, "caller"),
        }
    }
}

/// Login request data.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub credentials: Credentials,
    pub source: PasswordSource,
}

impl LoginRequest {
    #[must_use]
    pub const fn new(credentials: Credentials, source: PasswordSource) -> Self {
        Self {
            credentials,
            source,
        }
    }
}
