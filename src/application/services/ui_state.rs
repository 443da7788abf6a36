//! Single reducer for all UI state.

use std::time::Duration;

use tracing::{debug, trace};

use super::NotificationManager;
use crate::application::dto::StateChange;
use crate::domain::entities::{History, ImageDisplay};

/// Everything the screen renders. Mutated only through [`UiState::apply`].
#[derive(Debug, Default)]
pub struct UiState {
    history: History,
    prompt_input: String,
    image: ImageDisplay,
    image_revision: u64,
    alerts: NotificationManager,
}

impl UiState {
    #[must_use]
    pub fn new(alert_duration: Duration) -> Self {
        Self {
            alerts: NotificationManager::new(alert_duration),
            ..Self::default()
        }
    }

    /// Applies one change.
    pub fn apply(&mut self, change: StateChange) {
        trace!(?change, "Applying state change");
        match change {
            StateChange::EntryAdded(entry) => self.history.prepend(entry),
            StateChange::EntryRemoved(key) => {
                if self.history.remove(key).is_none() {
                    debug!(entry = %key, "Entry already gone");
                }
            }
            StateChange::EntryIdentified { key, prompt_id } => {
                if !self.history.identify(key, prompt_id) {
                    debug!(entry = %key, "Cannot identify missing entry");
                }
            }
            StateChange::ImageSet(display) => {
                self.image = display;
                self.image_revision += 1;
            }
            StateChange::PromptInputSet(text) => self.prompt_input = text,
            StateChange::Alert { level, message } => self.alerts.notify(level, message),
        }
    }

    pub fn apply_all(&mut self, changes: impl IntoIterator<Item = StateChange>) {
        for change in changes {
            self.apply(change);
        }
    }

    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn prompt_input(&self) -> &str {
        &self.prompt_input
    }

    /// Mirrors keystrokes from the editor without recording a change.
    pub fn sync_prompt_input(&mut self, text: impl Into<String>) {
        self.prompt_input = text.into();
    }

    #[must_use]
    pub const fn image(&self) -> &ImageDisplay {
        &self.image
    }

    /// Incremented on every image change, so renderers can rebuild lazily.
    #[must_use]
    pub const fn image_revision(&self) -> u64 {
        self.image_revision
    }

    #[must_use]
    pub const fn alerts(&self) -> &NotificationManager {
        &self.alerts
    }

    pub fn alerts_mut(&mut self) -> &mut NotificationManager {
        &mut self.alerts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{EntryKey, HistoryEntry, Prompt, PromptId};

    #[test]
    fn test_apply_entry_lifecycle() {
        let mut state = UiState::default();
        let key = EntryKey::new(1);
        let entry = HistoryEntry::pending(key, &Prompt::new("hello").unwrap());

        state.apply(StateChange::EntryAdded(entry));
        assert_eq!(state.history().len(), 1);

        state.apply(StateChange::EntryIdentified {
            key,
            prompt_id: PromptId::new("3").unwrap(),
        });
        assert!(!state.history().get(key).unwrap().is_pending());

        state.apply(StateChange::EntryRemoved(key));
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_image_revision_tracks_changes() {
        let mut state = UiState::default();
        assert_eq!(state.image_revision(), 0);

        state.apply(StateChange::ImageSet(ImageDisplay::Generating));
        state.apply(StateChange::ImageSet(ImageDisplay::Generating));

        assert_eq!(state.image_revision(), 2);
        assert_eq!(state.image(), &ImageDisplay::Generating);
    }

    #[test]
    fn test_alert_is_queued() {
        let mut state = UiState::default();
        state.apply(StateChange::error_alert("quota exceeded"));
        assert_eq!(
            state.alerts().current_notification().unwrap().message,
            "quota exceeded"
        );
    }

    #[test]
    fn test_removing_missing_entry_is_noop() {
        let mut state = UiState::default();
        state.apply(StateChange::EntryRemoved(EntryKey::new(5)));
        assert!(state.history().is_empty());
    }
}
