//! HTTP client for the generation backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::dto::{GenerateRequest, GenerateResponse, ImageResponse};
use crate::domain::entities::{ImagePayload, Prompt, PromptId};
use crate::domain::errors::{AuthError, GenerationError};
use crate::domain::ports::{Credentials, GeneratedImage, ImageApiPort, SessionPort};

const USER_AGENT: &str = concat!("genview/", env!("CARGO_PKG_VERSION"));
const LOGIN_PATHS: [&str; 2] = ["/login", "/register"];

/// Backend client. Keeps the session cookie across requests.
pub struct HttpImageApi {
    client: Client,
    base_url: Url,
}

impl HttpImageApi {
    /// Creates a client for the backend at `base_url`.
    ///
    /// # Errors
    /// Returns error if the URL is invalid or HTTP client creation fails.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GenerationError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| GenerationError::transport(format!("invalid server URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(GenerationError::transport(format!(
                "server URL '{base_url}' cannot have paths"
            )));
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(|e| GenerationError::transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Appends path segments to the base URL, escaping each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, GenerationError> {
        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;

        serde_json::from_str(&body).map_err(|e| {
            warn!(status = %status, error = %e, "Backend returned an unreadable body");
            GenerationError::transport(format!("invalid response body (HTTP {status}): {e}"))
        })
    }
}

fn map_transport_error(e: reqwest::Error) -> GenerationError {
    warn!(error = %e, "Request to backend failed");
    if e.is_timeout() {
        GenerationError::transport("request timed out")
    } else if e.is_connect() {
        GenerationError::transport("failed to connect to server")
    } else {
        GenerationError::transport(e.to_string())
    }
}

#[async_trait]
impl ImageApiPort for HttpImageApi {
    async fn generate(&self, prompt: &Prompt) -> Result<GeneratedImage, GenerationError> {
        let url = self.endpoint(&["generate"]);
        debug!(url = %url, "Posting prompt");

        let response = self
            .client
            .post(url)
            .json(&GenerateRequest {
                prompt: prompt.as_str(),
            })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body: GenerateResponse = Self::read_json(response).await?;
        if !status.is_success() {
            debug!(status = %status, "Generation answered with error status");
        }

        body.into_result()
    }

    async fn fetch_image(&self, prompt_id: &PromptId) -> Result<ImagePayload, GenerationError> {
        let url = self.endpoint(&["get_image", prompt_id.as_str()]);
        debug!(url = %url, "Fetching image");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_transport_error)?;

        let body: ImageResponse = Self::read_json(response).await?;
        body.into_result(prompt_id)
    }
}

#[async_trait]
impl SessionPort for HttpImageApi {
    async fn login(&self, credentials: &Credentials) -> Result<(), AuthError> {
        let url = self.endpoint(&["login"]);
        debug!(url = %url, user = %credentials.username, "Logging in");

        let form = [
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ];

        let response = self
            .client
            .post(url)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AuthError::network("request timed out")
                } else if e.is_connect() {
                    AuthError::network("failed to connect to server")
                } else {
                    AuthError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(AuthError::unexpected(format!("login returned HTTP {status}")));
        }

        // A successful login redirects away from the login form.
        let final_path = response.url().path().trim_end_matches('/');
        if LOGIN_PATHS.iter().any(|path| final_path.ends_with(path)) {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(())
    }
}
