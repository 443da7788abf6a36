//! Event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key classification shared by every screen.
pub struct EventHandler;

impl EventHandler {
    /// Checks if key is a quit event.
    #[must_use]
    pub fn is_quit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('c' | 'q'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        )
    }

    /// Checks if key is a submit event. Modified Enter inserts a newline.
    #[must_use]
    pub fn is_submit_event(key: &KeyEvent) -> bool {
        key.code == KeyCode::Enter
            && !key
                .modifiers
                .intersects(KeyModifiers::ALT | KeyModifiers::SHIFT | KeyModifiers::CONTROL)
    }

    /// Checks if key inserts a newline into the prompt.
    #[must_use]
    pub fn is_newline_event(key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter => key
                .modifiers
                .intersects(KeyModifiers::ALT | KeyModifiers::SHIFT),
            KeyCode::Char('j') => key.modifiers == KeyModifiers::CONTROL,
            _ => false,
        }
    }

    /// Checks if key moves focus between panes.
    #[must_use]
    pub fn is_focus_event(key: &KeyEvent) -> bool {
        matches!(key.code, KeyCode::Tab | KeyCode::BackTab)
    }

    /// Checks if key saves the displayed image.
    #[must_use]
    pub fn is_save_event(key: &KeyEvent) -> bool {
        key.code == KeyCode::Char('s') && key.modifiers == KeyModifiers::CONTROL
    }

    /// Checks if key dismisses the current alert.
    #[must_use]
    pub fn is_dismiss_event(key: &KeyEvent) -> bool {
        key.code == KeyCode::Esc
    }
}
