//! Wire formats of the generation backend.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::entities::{ImagePayload, PromptId};
use crate::domain::errors::GenerationError;
use crate::domain::ports::GeneratedImage;

#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    pub prompt: &'a str,
}

/// Body of `POST /generate`, either an image or an error.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::domain::serde_utils::string_or_number::option::deserialize"
    )]
    pub prompt_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl GenerateResponse {
    /// Interprets the body. An `error` takes precedence over everything else.
    ///
    /// # Errors
    /// Returns [`GenerationError::Application`] for a server-reported error
    /// and [`GenerationError::Transport`] for any other unusable shape.
    pub fn into_result(self) -> Result<GeneratedImage, GenerationError> {
        if let Some(message) = self.error.filter(|m| !m.is_empty()) {
            return Err(GenerationError::application(message));
        }

        let image = self
            .image
            .and_then(ImagePayload::from_base64)
            .ok_or_else(|| GenerationError::transport("response carried neither image nor error"))?;
        let prompt_id = self
            .prompt_id
            .and_then(PromptId::new)
            .ok_or_else(|| GenerationError::transport("response is missing prompt_id"))?;

        Ok(GeneratedImage { image, prompt_id })
    }
}

/// Body of `GET /get_image/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct ImageResponse {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ImageResponse {
    /// Interprets the body. Anything without an image counts as not found.
    ///
    /// # Errors
    /// Returns [`GenerationError::NotFound`] without an image. The payload
    /// itself is not decoded here.
    pub fn into_result(self, prompt_id: &PromptId) -> Result<ImagePayload, GenerationError> {
        match self.image.and_then(ImagePayload::from_base64) {
            Some(image) => Ok(image),
            None => {
                if let Some(error) = self.error {
                    debug!(prompt_id = %prompt_id, server_error = %error, "Server has no image");
                }
                Err(GenerationError::NotFound {
                    prompt_id: prompt_id.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<GeneratedImage, GenerationError> {
        serde_json::from_str::<GenerateResponse>(body)
            .unwrap()
            .into_result()
    }

    #[test]
    fn test_generate_success_with_numeric_id() {
        let generated = parse(r#"{"image": "iVBORw0KGgo=", "prompt_id": 42}"#).unwrap();
        assert_eq!(generated.prompt_id.as_str(), "42");
        assert_eq!(
            generated.image.data_uri(),
            "data:image/png;base64,iVBORw0KGgo="
        );
    }

    #[test]
    fn test_generate_error_field() {
        let result = parse(r#"{"error": "quota exceeded"}"#);
        assert_eq!(result, Err(GenerationError::application("quota exceeded")));
    }

    #[test]
    fn test_error_wins_over_image() {
        let result = parse(r#"{"error": "nope", "image": "iVBORw0KGgo=", "prompt_id": "1"}"#);
        assert!(matches!(result, Err(GenerationError::Application { .. })));
    }

    #[test]
    fn test_generate_unexpected_shapes() {
        assert!(matches!(parse("{}"), Err(GenerationError::Transport { .. })));
        assert!(matches!(
            parse(r#"{"image": "iVBORw0KGgo="}"#),
            Err(GenerationError::Transport { .. })
        ));
        assert!(matches!(
            parse(r#"{"image": "", "prompt_id": "1"}"#),
            Err(GenerationError::Transport { .. })
        ));
    }

    #[test]
    fn test_undecodable_image_is_still_a_generation() {
        let generated = parse(r#"{"image": "???", "prompt_id": "1"}"#).unwrap();
        assert_eq!(generated.prompt_id.as_str(), "1");
        assert_eq!(generated.image.encoded(), "???");
        assert!(generated.image.decode().is_err());

        let unpadded = parse(r#"{"image": "iVBORw0KGgo", "prompt_id": "42"}"#).unwrap();
        assert_eq!(unpadded.prompt_id.as_str(), "42");
        assert_eq!(unpadded.image.decode().unwrap()[1..4], *b"PNG");
    }

    #[test]
    fn test_image_response_not_found() {
        let id = PromptId::new("9").unwrap();
        let body: ImageResponse = serde_json::from_str(r#"{"error": "Image not found."}"#).unwrap();
        assert_eq!(
            body.into_result(&id),
            Err(GenerationError::NotFound {
                prompt_id: "9".to_string()
            })
        );
    }

    #[test]
    fn test_image_response_found() {
        let id = PromptId::new("9").unwrap();
        let body: ImageResponse = serde_json::from_str(r#"{"image": "R0lGODlh"}"#).unwrap();
        assert_eq!(body.into_result(&id).unwrap().decode().unwrap(), b"GIF89a");
    }

    #[test]
    fn test_request_serialization() {
        let body = serde_json::to_string(&GenerateRequest { prompt: "a\nb" }).unwrap();
        assert_eq!(body, r#"{"prompt":"a\nb"}"#);
    }
}
