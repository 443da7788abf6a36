//! Session login port definition.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::errors::AuthError;

/// Username and password for the backend's cookie session.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: Zeroizing<String>,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Zeroizing::new(password.into()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Port for establishing an authenticated session with the backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionPort: Send + Sync {
    /// Logs in, keeping the session cookie for later requests.
    async fn login(&self, credentials: &Credentials) -> Result<(), AuthError>;
}
