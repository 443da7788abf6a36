//! Prompt, history and image panes.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::{StatefulWidget, Widget},
};

use super::notification_popup::NotificationPopup;
use crate::application::UiState;
use crate::presentation::events::EventHandler;
use crate::presentation::widgets::{
    FocusContext, FooterBar, HistoryList, HistoryListState, ImageView, ImageViewState,
    PromptEditor, PromptEditorState,
};

const PROMPT_HEIGHT: u16 = 6;

/// What the app should do after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenAction {
    Consumed,
    Ignored,
    Quit,
    /// The prompt text changed.
    Edited(String),
    /// Enter in the prompt field, carrying the raw text.
    Submit(String),
    /// Enter on a history row.
    SelectHistory(usize),
    SaveImage,
    DismissAlert,
}

pub struct MainScreenState {
    focus: FocusContext,
    editor: PromptEditorState<'static>,
    history: HistoryListState,
    image: ImageViewState,
    show_timestamps: bool,
}

impl MainScreenState {
    #[must_use]
    pub fn new(image: ImageViewState, show_timestamps: bool) -> Self {
        let mut state = Self {
            focus: FocusContext::Prompt,
            editor: PromptEditorState::new(),
            history: HistoryListState::new(),
            image,
            show_timestamps,
        };
        state.apply_focus();
        state
    }

    #[must_use]
    pub const fn focus(&self) -> FocusContext {
        self.focus
    }

    pub fn set_focus(&mut self, focus: FocusContext) {
        self.focus = focus;
        self.apply_focus();
    }

    fn apply_focus(&mut self) {
        self.editor.set_focused(self.focus == FocusContext::Prompt);
        self.history.set_focused(self.focus == FocusContext::History);
    }

    #[must_use]
    pub const fn editor(&self) -> &PromptEditorState<'static> {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut PromptEditorState<'static> {
        &mut self.editor
    }

    #[must_use]
    pub const fn history(&self) -> &HistoryListState {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryListState {
        &mut self.history
    }

    #[must_use]
    pub const fn image(&self) -> &ImageViewState {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut ImageViewState {
        &mut self.image
    }

    /// Routes a key press. `history_len` bounds list navigation.
    pub fn handle_key(&mut self, key: KeyEvent, history_len: usize) -> ScreenAction {
        if EventHandler::is_quit_event(&key) {
            return ScreenAction::Quit;
        }
        if EventHandler::is_save_event(&key) {
            return ScreenAction::SaveImage;
        }
        if EventHandler::is_dismiss_event(&key) {
            return ScreenAction::DismissAlert;
        }
        if EventHandler::is_focus_event(&key) {
            self.set_focus(self.focus.next());
            return ScreenAction::Consumed;
        }

        match self.focus {
            FocusContext::Prompt => self.handle_prompt_key(key),
            FocusContext::History => self.handle_history_key(key, history_len),
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) -> ScreenAction {
        if EventHandler::is_newline_event(&key) {
            self.editor.insert_newline();
            return ScreenAction::Edited(self.editor.value());
        }
        if EventHandler::is_submit_event(&key) {
            return ScreenAction::Submit(self.editor.value());
        }
        if self.editor.handle_key(key) {
            ScreenAction::Edited(self.editor.value())
        } else {
            ScreenAction::Consumed
        }
    }

    fn handle_history_key(&mut self, key: KeyEvent, history_len: usize) -> ScreenAction {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.history.select_previous(history_len);
                ScreenAction::Consumed
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.history.select_next(history_len);
                ScreenAction::Consumed
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.history
                    .select((history_len > 0).then_some(0));
                ScreenAction::Consumed
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.history.select(history_len.checked_sub(1));
                ScreenAction::Consumed
            }
            KeyCode::Enter => self
                .history
                .selected()
                .filter(|index| *index < history_len)
                .map_or(ScreenAction::Consumed, ScreenAction::SelectHistory),
            _ => ScreenAction::Ignored,
        }
    }
}

/// Renders the whole screen from the reducer state.
pub struct MainScreen<'a> {
    state: &'a UiState,
}

impl<'a> MainScreen<'a> {
    #[must_use]
    pub const fn new(state: &'a UiState) -> Self {
        Self { state }
    }
}

impl StatefulWidget for MainScreen<'_> {
    type State = MainScreenState;

    fn render(self, area: Rect, buf: &mut Buffer, screen: &mut Self::State) {
        let [body_area, footer_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        let [history_area, right_area] =
            Layout::horizontal([Constraint::Percentage(30), Constraint::Fill(1)])
                .areas(body_area);
        let [image_area, prompt_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(PROMPT_HEIGHT)])
                .areas(right_area);

        HistoryList::new(self.state.history())
            .show_timestamps(screen.show_timestamps)
            .render(history_area, buf, &mut screen.history);

        ImageView::new(self.state.image()).render(image_area, buf, &mut screen.image);

        PromptEditor::new().render(&mut screen.editor, prompt_area, buf);

        let pending = self.state.history().pending_count();
        let pending_info = (pending > 0).then(|| format!("{pending} generating "));
        FooterBar::new(screen.focus)
            .right_info(pending_info.as_deref())
            .render(footer_area, buf);

        if let Some(notification) = self.state.alerts().current_notification() {
            NotificationPopup::new(notification).render(area, buf);
        }
    }
}
