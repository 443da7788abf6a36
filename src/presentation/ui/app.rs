//! Main application orchestrator.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures_util::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use ratatui_image::picker::Picker;
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, error, info, warn};

use super::main_screen::{MainScreen, MainScreenState, ScreenAction};
use crate::application::{
    FetchImageUseCase, FetchTicket, SaveImageUseCase, StateChange, SubmitPromptUseCase,
    SubmitTicket, UiController,
};
use crate::domain::entities::{HistoryEntry, ImageDisplay, ImagePayload, PromptId};
use crate::domain::errors::GenerationError;
use crate::domain::ports::{GeneratedImage, ImageApiPort};
use crate::infrastructure::{AppConfig, DecodeError, decode_payload_async};
use crate::presentation::widgets::ImageViewState;

const ALERT_TICK_RATE: Duration = Duration::from_millis(250);
const NO_IMAGE_TO_SAVE: &str = "There is no image to save.";

/// Results of background work, delivered back to the event loop.
#[derive(Debug)]
enum Action {
    Generated {
        ticket: SubmitTicket,
        result: Result<GeneratedImage, GenerationError>,
    },
    ImageFetched {
        ticket: FetchTicket,
        result: Result<ImagePayload, GenerationError>,
    },
    ImageDecoded {
        revision: u64,
        result: Result<Arc<image::DynamicImage>, DecodeError>,
    },
}

pub struct App {
    running: bool,
    controller: UiController,
    screen: MainScreenState,
    submit_use_case: SubmitPromptUseCase,
    fetch_use_case: FetchImageUseCase,
    save_use_case: SaveImageUseCase,
    /// Identifier of the image currently on display, used to name saved files.
    shown_prompt_id: Option<PromptId>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    /// Creates the app. Without a `picker` the image pane shows alt text only.
    #[must_use]
    pub fn new(api: Arc<dyn ImageApiPort>, config: &AppConfig, picker: Option<Picker>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let image_state = ImageViewState::new(picker);

        Self {
            running: true,
            controller: UiController::new(config.ordering, config.notification_duration()),
            screen: MainScreenState::new(image_state, config.ui.show_timestamps),
            submit_use_case: SubmitPromptUseCase::new(api.clone()),
            fetch_use_case: FetchImageUseCase::new(api),
            save_use_case: SaveImageUseCase::new(config.effective_save_dir()),
            shown_prompt_id: None,
            action_tx,
            action_rx,
        }
    }

    /// # Errors
    /// Returns error if drawing to the terminal fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        info!(policy = %self.controller.policy(), "Starting event loop");
        let mut terminal_events = EventStream::new();
        let mut alert_interval = interval(ALERT_TICK_RATE);

        terminal.draw(|frame| self.render(frame))?;

        while self.running {
            tokio::select! {
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                    terminal.draw(|frame| self.render(frame))?;
                }

                Some(event) = terminal_events.next() => {
                    match event {
                        Ok(event) => self.handle_terminal_event(event),
                        Err(e) => {
                            error!(error = %e, "Terminal event stream failed");
                            self.running = false;
                        }
                    }
                    terminal.draw(|frame| self.render(frame))?;
                }

                _ = alert_interval.tick() => {
                    let before = self.controller.state().alerts().len();
                    self.controller.state_mut().alerts_mut().tick();
                    if self.controller.state().alerts().len() != before {
                        terminal.draw(|frame| self.render(frame))?;
                    }
                }
            }
        }

        info!("Application exiting normally");
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        frame.render_stateful_widget(
            MainScreen::new(self.controller.state()),
            frame.area(),
            &mut self.screen,
        );
    }

    fn handle_terminal_event(&mut self, event: Event) {
        if let Event::Key(key) = event
            && key.kind == KeyEventKind::Press
        {
            self.handle_key(key);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let history_len = self.controller.state().history().len();
        match self.screen.handle_key(key, history_len) {
            ScreenAction::Quit => self.running = false,
            ScreenAction::Edited(text) => self.controller.state_mut().sync_prompt_input(text),
            ScreenAction::Submit(text) => self.submit(&text),
            ScreenAction::SelectHistory(index) => self.select_history(index),
            ScreenAction::SaveImage => self.save_image(),
            ScreenAction::DismissAlert => {
                self.controller.state_mut().alerts_mut().dismiss();
            }
            ScreenAction::Consumed | ScreenAction::Ignored => {}
        }
    }

    fn submit(&mut self, text: &str) {
        self.controller.state_mut().sync_prompt_input(text);
        let dispatch = self.keeping_history_selection(|app| app.controller.submit_prompt(text));
        self.track_shown_image(&dispatch.changes, None);

        if let Some(ticket) = dispatch.request {
            let use_case = self.submit_use_case.clone();
            let tx = self.action_tx.clone();
            tokio::spawn(async move {
                let result = use_case.execute(&ticket.prompt).await;
                let _ = tx.send(Action::Generated { ticket, result });
            });
        }
        self.sync_image_view();
    }

    fn select_history(&mut self, index: usize) {
        let dispatch = self.controller.select_history_index(index);
        if dispatch.changes.is_empty() {
            return;
        }
        self.track_shown_image(&dispatch.changes, None);

        let prompt_text = self.controller.state().prompt_input().to_string();
        self.screen.editor_mut().set_text(&prompt_text);

        if let Some(ticket) = dispatch.request {
            let use_case = self.fetch_use_case.clone();
            let tx = self.action_tx.clone();
            tokio::spawn(async move {
                let result = use_case.execute(&ticket.prompt_id).await;
                let _ = tx.send(Action::ImageFetched { ticket, result });
            });
        }
        self.sync_image_view();
    }

    fn save_image(&mut self) {
        let Some(payload) = self.controller.state().image().payload().cloned() else {
            self.controller
                .state_mut()
                .apply(StateChange::error_alert(NO_IMAGE_TO_SAVE));
            return;
        };

        let change = match self
            .save_use_case
            .execute(&payload, self.shown_prompt_id.as_ref())
        {
            Ok(path) => StateChange::info_alert(format!("Saved to {}", path.display())),
            Err(e) => {
                warn!(error = %e, "Failed to save image");
                StateChange::error_alert(format!("Failed to save image: {e}"))
            }
        };
        self.controller.state_mut().apply(change);
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Generated { ticket, result } => {
                let prompt_id = result.as_ref().ok().map(|g| g.prompt_id.clone());
                let changes = self.keeping_history_selection(|app| {
                    app.controller.complete_submission(&ticket, result)
                });
                self.track_shown_image(&changes, prompt_id);
                self.sync_image_view();
            }
            Action::ImageFetched { ticket, result } => {
                let changes = self.controller.complete_fetch(&ticket, result);
                self.track_shown_image(&changes, Some(ticket.prompt_id));
                self.sync_image_view();
            }
            Action::ImageDecoded { revision, result } => {
                let applied = match result {
                    Ok(image) => self.screen.image_mut().set_image(revision, &image),
                    Err(e) => {
                        warn!(error = %e, "Failed to decode image");
                        self.screen.image_mut().set_decode_error(revision, e.to_string())
                    }
                };
                if !applied {
                    debug!(revision, "Dropping decode result for replaced image");
                }
            }
        }
    }

    /// Runs `f` and keeps the same history entry highlighted afterwards,
    /// wherever prepends and rollbacks moved it.
    fn keeping_history_selection<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let selected_key = self
            .screen
            .history()
            .selected()
            .and_then(|index| self.controller.state().history().get_index(index))
            .map(HistoryEntry::key);

        let result = f(self);

        let history = self.controller.state().history();
        let index = selected_key.and_then(|key| history.position(key));
        let len = history.len();
        self.screen.history_mut().follow(index, len);
        result
    }

    /// Remembers which prompt the displayed image belongs to.
    fn track_shown_image(&mut self, changes: &[StateChange], prompt_id: Option<PromptId>) {
        let Some(display) = changes.iter().rev().find_map(|change| match change {
            StateChange::ImageSet(display) => Some(display),
            _ => None,
        }) else {
            return;
        };

        self.shown_prompt_id = match display {
            ImageDisplay::Loaded(_) => prompt_id,
            _ => None,
        };
    }

    /// Starts decoding when the displayed image changed since the last render.
    fn sync_image_view(&mut self) {
        let revision = self.controller.state().image_revision();
        if self.screen.image().revision() == revision {
            return;
        }
        self.screen.image_mut().reset(revision);

        if !self.screen.image().preview_enabled() {
            return;
        }
        if let Some(payload) = self.controller.state().image().payload().cloned() {
            let tx = self.action_tx.clone();
            tokio::spawn(async move {
                let result = decode_payload_async(payload).await;
                let _ = tx.send(Action::ImageDecoded { revision, result });
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockImageApi;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn app_with(api: Arc<MockImageApi>) -> App {
        App::new(api, &AppConfig::default(), None)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    fn payload() -> ImagePayload {
        ImagePayload::from_base64("iVBORw0KGgo=").unwrap()
    }

    #[tokio::test]
    async fn test_submit_round_trip() {
        let api = Arc::new(MockImageApi::new());
        api.push_generate(Ok(GeneratedImage {
            image: payload(),
            prompt_id: PromptId::new("7").unwrap(),
        }));
        let mut app = app_with(api.clone());

        type_text(&mut app, "a fox");
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

        assert_eq!(app.controller.state().image(), &ImageDisplay::Generating);
        assert_eq!(app.controller.state().history().pending_count(), 1);

        let action = app.action_rx.recv().await.unwrap();
        app.handle_action(action);

        let state = app.controller.state();
        assert!(state.image().payload().is_some());
        assert_eq!(state.history().pending_count(), 0);
        assert_eq!(app.shown_prompt_id.as_ref().map(PromptId::as_str), Some("7"));
        assert_eq!(api.generated_prompts(), vec!["a fox".to_string()]);
    }

    #[tokio::test]
    async fn test_blank_submit_alerts_without_request() {
        let api = Arc::new(MockImageApi::new());
        let mut app = app_with(api.clone());

        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

        let alert = app.controller.state().alerts().current_notification().unwrap();
        assert_eq!(alert.message, "Please enter a prompt.");
        assert!(api.generated_prompts().is_empty());
        assert!(app.controller.state().history().is_empty());
    }

    #[tokio::test]
    async fn test_select_history_refills_editor_and_fetches() {
        let api = Arc::new(MockImageApi::new());
        api.push_generate(Ok(GeneratedImage {
            image: payload(),
            prompt_id: PromptId::new("9").unwrap(),
        }));
        api.push_fetch(Ok(payload()));
        let mut app = app_with(api.clone());

        type_text(&mut app, "owl");
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        let action = app.action_rx.recv().await.unwrap();
        app.handle_action(action);

        type_text(&mut app, " extra");
        app.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        app.handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

        assert_eq!(app.screen.editor().value(), "owl");
        assert_eq!(app.controller.state().image(), &ImageDisplay::Loading);

        let action = app.action_rx.recv().await.unwrap();
        app.handle_action(action);

        assert!(app.controller.state().image().payload().is_some());
        assert_eq!(app.shown_prompt_id.as_ref().map(PromptId::as_str), Some("9"));
        assert_eq!(api.fetched_ids(), vec!["9".to_string()]);
    }

    #[tokio::test]
    async fn test_history_highlight_stays_on_entry() {
        let api = Arc::new(MockImageApi::new());
        api.push_generate(Ok(GeneratedImage {
            image: payload(),
            prompt_id: PromptId::new("9").unwrap(),
        }));
        api.push_generate(Err(GenerationError::application("quota exceeded")));
        let mut app = app_with(api);

        type_text(&mut app, "owl");
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        let action = app.action_rx.recv().await.unwrap();
        app.handle_action(action);

        app.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        app.handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
        let owl = app.controller.state().history().get_index(0).unwrap().key();
        assert_eq!(app.screen.history().selected(), Some(0));

        app.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        type_text(&mut app, "heron");
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

        assert_eq!(app.controller.state().history().len(), 2);
        assert_eq!(app.screen.history().selected(), Some(1));
        assert_eq!(app.controller.state().history().position(owl), Some(1));

        let action = app.action_rx.recv().await.unwrap();
        app.handle_action(action);

        assert_eq!(app.controller.state().history().len(), 1);
        assert_eq!(app.screen.history().selected(), Some(0));
        assert_eq!(app.controller.state().history().position(owl), Some(0));
    }

    #[tokio::test]
    async fn test_save_without_image_alerts() {
        let mut app = app_with(Arc::new(MockImageApi::new()));

        app.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));

        let alert = app.controller.state().alerts().current_notification().unwrap();
        assert_eq!(alert.message, NO_IMAGE_TO_SAVE);
    }

    #[tokio::test]
    async fn test_quit_stops_loop() {
        let mut app = app_with(Arc::new(MockImageApi::new()));
        app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }
}
