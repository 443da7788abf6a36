//! One-shot generation without the terminal UI.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::application::{SaveImageUseCase, StateChange, SubmitPromptUseCase, UiController};
use crate::application::use_cases::SaveImageError;
use crate::domain::NotificationLevel;
use crate::domain::entities::PromptId;
use crate::domain::ports::ImageApiPort;
use crate::infrastructure::AppConfig;

#[derive(Debug, Error)]
pub enum HeadlessError {
    /// The prompt was rejected or generation failed; carries the alert text.
    #[error("{0}")]
    Rejected(String),
    #[error("Failed to save image: {0}")]
    Save(#[from] SaveImageError),
}

/// Result of a one-shot generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneShotOutcome {
    pub prompt_id: PromptId,
    /// Where the image was written, when an output path was given.
    pub saved_to: Option<PathBuf>,
}

/// Generates one image through the controller and optionally writes it to
/// `output`.
///
/// # Errors
/// Returns [`HeadlessError::Rejected`] with the message the UI would have
/// shown, or [`HeadlessError::Save`] if writing fails.
pub async fn generate_once(
    api: Arc<dyn ImageApiPort>,
    config: &AppConfig,
    prompt: &str,
    output: Option<&Path>,
) -> Result<OneShotOutcome, HeadlessError> {
    let mut controller = UiController::new(config.ordering, config.notification_duration());

    let dispatch = controller.submit_prompt(prompt);
    let Some(ticket) = dispatch.request else {
        return Err(rejection(&dispatch.changes));
    };

    let result = SubmitPromptUseCase::new(api).execute(&ticket.prompt).await;
    let changes = controller.complete_submission(&ticket, result);

    let Some(prompt_id) = controller
        .state()
        .history()
        .get(ticket.entry)
        .and_then(|entry| entry.prompt_id().cloned())
    else {
        return Err(rejection(&changes));
    };

    let saved_to = match (output, controller.state().image().payload()) {
        (Some(path), Some(payload)) => {
            SaveImageUseCase::execute_at(payload, path)?;
            info!(path = %path.display(), prompt_id = %prompt_id, "Image written");
            Some(path.to_path_buf())
        }
        _ => None,
    };

    Ok(OneShotOutcome {
        prompt_id,
        saved_to,
    })
}

fn rejection(changes: &[StateChange]) -> HeadlessError {
    let message = changes
        .iter()
        .find_map(|change| match change {
            StateChange::Alert {
                level: NotificationLevel::Error,
                message,
            } => Some(message.clone()),
            _ => None,
        })
        .unwrap_or_else(|| "No image was generated.".to_string());
    HeadlessError::Rejected(message)
}
