//! Descriptions of UI state changes produced by action handlers.

use crate::domain::NotificationLevel;
use crate::domain::entities::{EntryKey, HistoryEntry, ImageDisplay, PromptId};

/// One intended change to [`UiState`](crate::application::services::UiState).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    /// Prepend an entry to the history list.
    EntryAdded(HistoryEntry),
    /// Drop an entry whose request failed.
    EntryRemoved(EntryKey),
    /// Attach the server identifier to an entry.
    EntryIdentified { key: EntryKey, prompt_id: PromptId },
    /// Replace the image display.
    ImageSet(ImageDisplay),
    /// Replace the prompt field contents.
    PromptInputSet(String),
    /// Show an alert to the user.
    Alert {
        level: NotificationLevel,
        message: String,
    },
}

impl StateChange {
    #[must_use]
    pub fn error_alert(message: impl Into<String>) -> Self {
        Self::Alert {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn info_alert(message: impl Into<String>) -> Self {
        Self::Alert {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }
}
