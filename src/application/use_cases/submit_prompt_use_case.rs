//! Prompt submission use case.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::Prompt;
use crate::domain::errors::GenerationError;
use crate::domain::ports::{GeneratedImage, ImageApiPort};

/// Sends a validated prompt to the generation endpoint.
#[derive(Clone)]
pub struct SubmitPromptUseCase {
    api: Arc<dyn ImageApiPort>,
}

impl SubmitPromptUseCase {
    #[must_use]
    pub const fn new(api: Arc<dyn ImageApiPort>) -> Self {
        Self { api }
    }

    /// Requests an image for the prompt.
    ///
    /// # Errors
    /// Returns the backend's application error or a transport error.
    pub async fn execute(&self, prompt: &Prompt) -> Result<GeneratedImage, GenerationError> {
        debug!(chars = prompt.as_str().len(), "Requesting generation");

        self.api.generate(prompt).await.inspect_err(|e| {
            warn!(error = %e, "Generation request failed");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ImagePayload, PromptId};
    use crate::domain::ports::mocks::MockImageApi;

    #[tokio::test]
    async fn test_sends_full_prompt_text() {
        let api = Arc::new(MockImageApi::new());
        api.push_generate(Ok(GeneratedImage {
            image: ImagePayload::from_base64("iVBORw0KGgo=").unwrap(),
            prompt_id: PromptId::new("42").unwrap(),
        }));
        let use_case = SubmitPromptUseCase::new(api.clone());

        let result = use_case
            .execute(&Prompt::new("A cat\nwearing a hat").unwrap())
            .await;

        assert_eq!(result.unwrap().prompt_id.as_str(), "42");
        assert_eq!(api.generated_prompts(), vec!["A cat\nwearing a hat"]);
    }

    #[tokio::test]
    async fn test_propagates_application_error() {
        let api = Arc::new(MockImageApi::new());
        api.push_generate(Err(GenerationError::application("quota exceeded")));
        let use_case = SubmitPromptUseCase::new(api);

        let result = use_case.execute(&Prompt::new("x").unwrap()).await;

        assert!(matches!(result, Err(GenerationError::Application { .. })));
    }
}
