//! Port for the image-generation backend.

use async_trait::async_trait;

use crate::domain::entities::{ImagePayload, Prompt, PromptId};
use crate::domain::errors::GenerationError;

/// Successful answer to a generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub image: ImagePayload,
    pub prompt_id: PromptId,
}

/// Port for the two backend image operations.
#[async_trait]
pub trait ImageApiPort: Send + Sync {
    /// Requests a new image for the prompt.
    ///
    /// A server-reported `error` maps to [`GenerationError::Application`];
    /// any other failure maps to [`GenerationError::Transport`].
    async fn generate(&self, prompt: &Prompt) -> Result<GeneratedImage, GenerationError>;

    /// Fetches the stored image for a previously generated prompt.
    ///
    /// A body without an image maps to [`GenerationError::NotFound`].
    async fn fetch_image(&self, prompt_id: &PromptId) -> Result<ImagePayload, GenerationError>;
}
