//! Login use case implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::LoginRequest;
use crate::domain::errors::AuthError;
use crate::domain::ports::SessionPort;

/// Establishes the backend session before any image request is made.
#[derive(Clone)]
pub struct LoginUseCase {
    session_port: Arc<dyn SessionPort>,
}

impl LoginUseCase {
    #[must_use]
    pub const fn new(session_port: Arc<dyn SessionPort>) -> Self {
        Self { session_port }
    }

    /// Executes login with provided request.
    ///
    /// # Errors
    /// Returns error if the password is empty or the backend rejects the
    /// credentials.
    pub async fn execute(&self, request: LoginRequest) -> Result<(), AuthError> {
        let username = request.credentials.username.clone();
        debug!(user = %username, source = %request.source, "Attempting login");

        if request.credentials.password.is_empty() {
            warn!(user = %username, "Login attempted without a password");
            return Err(AuthError::MissingPassword { username });
        }

        self.session_port
            .login(&request.credentials)
            .await
            .inspect_err(|e| warn!(user = %username, error = %e, "Login failed"))?;

        info!(user = %username, "Session established");
        Ok(())
    }
}
