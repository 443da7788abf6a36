//! Stored image lookup use case.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::{ImagePayload, PromptId};
use crate::domain::errors::GenerationError;
use crate::domain::ports::ImageApiPort;

/// Fetches the image stored for an identified history entry.
#[derive(Clone)]
pub struct FetchImageUseCase {
    api: Arc<dyn ImageApiPort>,
}

impl FetchImageUseCase {
    #[must_use]
    pub const fn new(api: Arc<dyn ImageApiPort>) -> Self {
        Self { api }
    }

    /// # Errors
    /// Returns [`GenerationError::NotFound`] when the server has no image,
    /// or a transport error.
    pub async fn execute(&self, prompt_id: &PromptId) -> Result<ImagePayload, GenerationError> {
        debug!(prompt_id = %prompt_id, "Fetching stored image");

        self.api.fetch_image(prompt_id).await.inspect_err(|e| {
            warn!(prompt_id = %prompt_id, error = %e, "Image lookup failed");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockImageApi;

    #[tokio::test]
    async fn test_fetches_requested_id() {
        let api = Arc::new(MockImageApi::new());
        api.push_fetch(Ok(ImagePayload::from_base64("R0lGODlh").unwrap()));
        let use_case = FetchImageUseCase::new(api.clone());

        let image = use_case.execute(&PromptId::new("7").unwrap()).await.unwrap();

        assert_eq!(image.decode().unwrap(), b"GIF89a");
        assert_eq!(api.fetched_ids(), vec!["7"]);
    }

    #[tokio::test]
    async fn test_not_found() {
        let api = Arc::new(MockImageApi::new());
        api.push_fetch(Err(GenerationError::NotFound {
            prompt_id: "7".to_string(),
        }));
        let use_case = FetchImageUseCase::new(api);

        let result = use_case.execute(&PromptId::new("7").unwrap()).await;

        assert!(matches!(result, Err(GenerationError::NotFound { .. })));
    }
}
