//! UI controller: turns user actions and backend responses into state changes.
//!
//! Every handler first plans a list of [`StateChange`]s, then applies them to
//! the owned [`UiState`] through its reducer. Network work is described by the
//! returned tickets and performed by the caller.

use std::time::Duration;

use tracing::{debug, info, warn};

use super::UiState;
use crate::application::dto::{Dispatch, FetchTicket, StateChange, SubmitTicket};
use crate::domain::entities::{
    EntryKey, HistoryEntry, ImageDisplay, ImageFault, ImagePayload, Prompt,
};
use crate::domain::errors::GenerationError;
use crate::domain::ports::GeneratedImage;
use crate::domain::{OrderingPolicy, RequestSequence, RequestToken};

#[derive(Debug)]
pub struct UiController {
    state: UiState,
    sequence: RequestSequence,
    policy: OrderingPolicy,
    next_entry: u64,
}

impl Default for UiController {
    fn default() -> Self {
        Self::new(OrderingPolicy::default(), Duration::from_secs(5))
    }
}

impl UiController {
    #[must_use]
    pub fn new(policy: OrderingPolicy, alert_duration: Duration) -> Self {
        Self {
            state: UiState::new(alert_duration),
            sequence: RequestSequence::new(),
            policy,
            next_entry: 0,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &UiState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut UiState {
        &mut self.state
    }

    #[must_use]
    pub const fn policy(&self) -> OrderingPolicy {
        self.policy
    }

    /// Handles the generate action for the given prompt text.
    ///
    /// Blank text raises an alert and issues no request. Otherwise a pending
    /// history entry is prepended and the display switches to the generating
    /// placeholder before the request is handed back to the caller.
    pub fn submit_prompt(&mut self, text: &str) -> Dispatch<SubmitTicket> {
        let prompt = match Prompt::new(text) {
            Ok(prompt) => prompt,
            Err(e) => {
                debug!(error = %e, "Rejected blank prompt");
                return self.commit(Dispatch::local(vec![StateChange::error_alert(
                    e.user_message(),
                )]));
            }
        };

        let key = self.allocate_key();
        let token = self.sequence.issue();

        info!(
            entry = %key,
            token = %token,
            label = prompt.first_line(),
            "Submitting prompt"
        );

        let changes = vec![
            StateChange::EntryAdded(HistoryEntry::pending(key, &prompt)),
            StateChange::ImageSet(ImageDisplay::Generating),
        ];

        self.commit(Dispatch {
            changes,
            request: Some(SubmitTicket {
                entry: key,
                token,
                prompt,
            }),
        })
    }

    /// Applies the backend's answer to a submission.
    pub fn complete_submission(
        &mut self,
        ticket: &SubmitTicket,
        result: Result<GeneratedImage, GenerationError>,
    ) -> Vec<StateChange> {
        let changes = self.plan_submission_result(ticket, result);
        self.state.apply_all(changes.iter().cloned());
        changes
    }

    /// Handles activation of a history entry.
    ///
    /// The prompt field is always refilled. Identified entries trigger a
    /// fetch; pending ones clear the display without any request.
    pub fn select_history_entry(&mut self, key: EntryKey) -> Dispatch<FetchTicket> {
        let Some(entry) = self.state.history().get(key).cloned() else {
            debug!(entry = %key, "Selected entry no longer exists");
            return Dispatch::none();
        };

        let token = self.sequence.issue();
        let mut changes = vec![StateChange::PromptInputSet(entry.full_prompt().to_string())];

        let request = if let Some(prompt_id) = entry.prompt_id() {
            debug!(entry = %key, prompt_id = %prompt_id, token = %token, "Loading stored image");
            changes.push(StateChange::ImageSet(ImageDisplay::Loading));
            Some(FetchTicket {
                entry: key,
                token,
                prompt_id: prompt_id.clone(),
            })
        } else {
            debug!(entry = %key, "Selected entry has no image yet");
            changes.push(StateChange::ImageSet(ImageDisplay::not_yet_generated()));
            None
        };

        self.commit(Dispatch { changes, request })
    }

    /// Handles activation of the history row at `index` (0 is newest).
    pub fn select_history_index(&mut self, index: usize) -> Dispatch<FetchTicket> {
        match self.state.history().get_index(index).map(HistoryEntry::key) {
            Some(key) => self.select_history_entry(key),
            None => Dispatch::none(),
        }
    }

    /// Applies the backend's answer to an image lookup.
    pub fn complete_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: Result<ImagePayload, GenerationError>,
    ) -> Vec<StateChange> {
        let changes = self.plan_fetch_result(ticket, result);
        self.state.apply_all(changes.iter().cloned());
        changes
    }

    fn plan_submission_result(
        &self,
        ticket: &SubmitTicket,
        result: Result<GeneratedImage, GenerationError>,
    ) -> Vec<StateChange> {
        match result {
            Ok(GeneratedImage { image, prompt_id }) => {
                info!(entry = %ticket.entry, prompt_id = %prompt_id, "Image generated");
                let mut changes = vec![StateChange::EntryIdentified {
                    key: ticket.entry,
                    prompt_id,
                }];
                if self.admits(ticket.token) {
                    changes.push(StateChange::ImageSet(ImageDisplay::Loaded(image)));
                } else {
                    debug!(token = %ticket.token, "Discarding image of superseded submission");
                }
                changes
            }
            Err(e) => {
                warn!(entry = %ticket.entry, error = %e, "Generation failed, rolling back entry");
                vec![
                    StateChange::error_alert(e.user_message()),
                    StateChange::EntryRemoved(ticket.entry),
                ]
            }
        }
    }

    fn plan_fetch_result(
        &self,
        ticket: &FetchTicket,
        result: Result<ImagePayload, GenerationError>,
    ) -> Vec<StateChange> {
        if !self.admits(ticket.token) {
            debug!(
                token = %ticket.token,
                prompt_id = %ticket.prompt_id,
                "Discarding superseded image lookup"
            );
            return Vec::new();
        }

        let display = match result {
            Ok(image) => ImageDisplay::Loaded(image),
            Err(GenerationError::NotFound { prompt_id }) => {
                info!(prompt_id = %prompt_id, "No stored image for prompt");
                ImageDisplay::Error(ImageFault::NotFound)
            }
            Err(e) => {
                warn!(prompt_id = %ticket.prompt_id, error = %e, "Failed to load image");
                ImageDisplay::Error(ImageFault::LoadFailed)
            }
        };

        vec![StateChange::ImageSet(display)]
    }

    fn admits(&self, token: RequestToken) -> bool {
        self.policy.admits(&self.sequence, token)
    }

    fn allocate_key(&mut self) -> EntryKey {
        self.next_entry += 1;
        EntryKey::new(self.next_entry)
    }

    fn commit<T>(&mut self, dispatch: Dispatch<T>) -> Dispatch<T> {
        self.state.apply_all(dispatch.changes.iter().cloned());
        dispatch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ALT_NOT_YET_GENERATED, PLACEHOLDER_SRC, PromptId};
    use test_case::test_case;

    fn payload(encoded: &str) -> ImagePayload {
        ImagePayload::from_base64(encoded).unwrap()
    }

    fn generated(encoded: &str, id: &str) -> Result<GeneratedImage, GenerationError> {
        Ok(GeneratedImage {
            image: payload(encoded),
            prompt_id: PromptId::new(id).unwrap(),
        })
    }

    fn controller(policy: OrderingPolicy) -> UiController {
        UiController::new(policy, Duration::from_secs(5))
    }

    #[test_case("" ; "empty")]
    #[test_case("  \n " ; "whitespace")]
    fn test_blank_submission_creates_nothing(text: &str) {
        let mut controller = UiController::default();

        let dispatch = controller.submit_prompt(text);

        assert!(dispatch.request.is_none());
        assert!(controller.state().history().is_empty());
        assert_eq!(controller.state().image(), &ImageDisplay::Empty);
        assert_eq!(
            controller
                .state()
                .alerts()
                .current_notification()
                .unwrap()
                .message,
            "Please enter a prompt."
        );
    }

    #[test]
    fn test_successful_generation() {
        let mut controller = UiController::default();

        let ticket = controller
            .submit_prompt("A cat\nwearing a hat")
            .request
            .unwrap();

        let entry = controller.state().history().get_index(0).unwrap();
        assert_eq!(entry.display_label(), "A cat");
        assert!(entry.is_pending());
        assert_eq!(controller.state().image(), &ImageDisplay::Generating);
        assert_eq!(controller.state().image().src(), PLACEHOLDER_SRC);

        controller.complete_submission(&ticket, generated("iVBORw0KGgo=", "42"));

        let history = controller.state().history();
        assert_eq!(history.len(), 1);
        let entry = history.get(ticket.entry).unwrap();
        assert_eq!(entry.prompt_id().map(PromptId::as_str), Some("42"));
        assert_eq!(
            controller.state().image().src(),
            "data:image/png;base64,iVBORw0KGgo="
        );
        assert_eq!(controller.state().image().alt(), "Generated Image");
    }

    #[test]
    fn test_server_error_rolls_back_entry() {
        let mut controller = UiController::default();
        let ticket = controller.submit_prompt("x").request.unwrap();

        let changes = controller.complete_submission(
            &ticket,
            Err(GenerationError::application("quota exceeded")),
        );

        assert!(controller.state().history().is_empty());
        assert_eq!(controller.state().image(), &ImageDisplay::Generating);
        assert_eq!(
            changes,
            vec![
                StateChange::error_alert("quota exceeded"),
                StateChange::EntryRemoved(ticket.entry),
            ]
        );
    }

    #[test]
    fn test_transport_error_rolls_back_with_generic_alert() {
        let mut controller = UiController::default();
        let ticket = controller.submit_prompt("x").request.unwrap();

        controller.complete_submission(&ticket, Err(GenerationError::transport("reset")));

        assert!(controller.state().history().is_empty());
        assert_eq!(
            controller
                .state()
                .alerts()
                .current_notification()
                .unwrap()
                .message,
            "An error occurred while generating the image."
        );
    }

    #[test]
    fn test_failed_generation_keeps_other_entries() {
        let mut controller = UiController::default();
        let first = controller.submit_prompt("first").request.unwrap();
        controller.complete_submission(&first, generated("iVBORw0KGgo=", "1"));
        let second = controller.submit_prompt("second").request.unwrap();

        controller.complete_submission(&second, Err(GenerationError::application("nope")));

        let history = controller.state().history();
        assert_eq!(history.len(), 1);
        assert_eq!(history.get_index(0).unwrap().key(), first.entry);
    }

    #[test]
    fn test_rapid_submissions_are_independent() {
        let mut controller = UiController::default();
        let first = controller.submit_prompt("same").request.unwrap();
        let second = controller.submit_prompt("same").request.unwrap();

        assert_ne!(first.entry, second.entry);
        assert_eq!(controller.state().history().pending_count(), 2);

        controller.complete_submission(&second, generated("iVBORw0KGgo=", "2"));
        controller.complete_submission(&first, generated("R0lGODlh", "1"));

        let history = controller.state().history();
        assert_eq!(history.pending_count(), 0);
        assert_eq!(
            history.get(first.entry).unwrap().prompt_id().unwrap().as_str(),
            "1"
        );
    }

    #[test]
    fn test_latest_wins_discards_stale_image() {
        let mut controller = controller(OrderingPolicy::LatestWins);
        let first = controller.submit_prompt("first").request.unwrap();
        let second = controller.submit_prompt("second").request.unwrap();

        controller.complete_submission(&second, generated("iVBORw0KGgo=", "2"));
        controller.complete_submission(&first, generated("R0lGODlh", "1"));

        assert_eq!(
            controller.state().image().payload().unwrap().encoded(),
            "iVBORw0KGgo="
        );
    }

    #[test]
    fn test_arrival_order_applies_last_response() {
        let mut controller = controller(OrderingPolicy::ArrivalOrder);
        let first = controller.submit_prompt("first").request.unwrap();
        let second = controller.submit_prompt("second").request.unwrap();

        controller.complete_submission(&second, generated("iVBORw0KGgo=", "2"));
        controller.complete_submission(&first, generated("R0lGODlh", "1"));

        assert_eq!(
            controller.state().image().payload().unwrap().encoded(),
            "R0lGODlh"
        );
    }

    #[test]
    fn test_stale_failure_still_rolls_back_under_latest_wins() {
        let mut controller = controller(OrderingPolicy::LatestWins);
        let first = controller.submit_prompt("A").request.unwrap();
        let second = controller.submit_prompt("B").request.unwrap();

        controller.complete_submission(
            &first,
            Err(GenerationError::application("quota exceeded")),
        );

        let history = controller.state().history();
        assert_eq!(history.len(), 1);
        assert_eq!(history.get_index(0).unwrap().key(), second.entry);
        assert!(history.get(first.entry).is_none());
        assert_eq!(
            controller
                .state()
                .alerts()
                .current_notification()
                .unwrap()
                .message,
            "quota exceeded"
        );
        assert_eq!(controller.state().image(), &ImageDisplay::Generating);
    }

    #[test]
    fn test_undecodable_image_keeps_entry() {
        let mut controller = UiController::default();
        let ticket = controller.submit_prompt("x").request.unwrap();

        controller.complete_submission(&ticket, generated("???", "42"));

        let history = controller.state().history();
        assert_eq!(history.len(), 1);
        assert_eq!(
            history.get(ticket.entry).unwrap().prompt_id().map(PromptId::as_str),
            Some("42")
        );
        assert!(controller.state().alerts().current_notification().is_none());
        assert_eq!(
            controller.state().image().payload().unwrap().encoded(),
            "???"
        );
    }

    #[test]
    fn test_select_identified_entry_fetches_its_id() {
        let mut controller = UiController::default();
        let ticket = controller.submit_prompt("A cat\nin a hat").request.unwrap();
        controller.complete_submission(&ticket, generated("iVBORw0KGgo=", "42"));
        controller.state_mut().sync_prompt_input("something else");

        let dispatch = controller.select_history_entry(ticket.entry);

        let fetch = dispatch.request.unwrap();
        assert_eq!(fetch.prompt_id.as_str(), "42");
        assert_eq!(controller.state().prompt_input(), "A cat\nin a hat");
        assert_eq!(controller.state().image(), &ImageDisplay::Loading);

        controller.complete_fetch(&fetch, Ok(payload("R0lGODlh")));
        assert_eq!(controller.state().image().alt(), "Generated Image");
    }

    #[test]
    fn test_select_pending_entry_clears_without_request() {
        let mut controller = UiController::default();
        let ticket = controller.submit_prompt("still going").request.unwrap();
        controller.state_mut().sync_prompt_input("");

        let dispatch = controller.select_history_entry(ticket.entry);

        assert!(dispatch.request.is_none());
        assert_eq!(controller.state().prompt_input(), "still going");
        assert_eq!(controller.state().image().src(), "");
        assert_eq!(controller.state().image().alt(), ALT_NOT_YET_GENERATED);
    }

    #[test]
    fn test_selecting_pending_entry_supersedes_generation_image() {
        let mut controller = controller(OrderingPolicy::LatestWins);
        let ticket = controller.submit_prompt("slow").request.unwrap();
        controller.select_history_entry(ticket.entry);

        controller.complete_submission(&ticket, generated("iVBORw0KGgo=", "9"));

        assert_eq!(controller.state().image(), &ImageDisplay::not_yet_generated());
        assert!(!controller.state().history().get(ticket.entry).unwrap().is_pending());
    }

    #[test_case(Err(GenerationError::NotFound { prompt_id: "42".into() }), "Image not found for this prompt." ; "not_found")]
    #[test_case(Err(GenerationError::transport("timeout")), "Error loading image." ; "transport")]
    fn test_fetch_failures_only_touch_image(
        result: Result<ImagePayload, GenerationError>,
        expected_alt: &str,
    ) {
        let mut controller = UiController::default();
        let ticket = controller.submit_prompt("p").request.unwrap();
        controller.complete_submission(&ticket, generated("iVBORw0KGgo=", "42"));
        let fetch = controller.select_history_entry(ticket.entry).request.unwrap();

        controller.complete_fetch(&fetch, result);

        assert_eq!(controller.state().image().alt(), expected_alt);
        assert_eq!(controller.state().history().len(), 1);
        assert!(!controller.state().alerts().has_notifications());
    }

    #[test]
    fn test_stale_fetch_is_discarded() {
        let mut controller = controller(OrderingPolicy::LatestWins);
        let ticket = controller.submit_prompt("p").request.unwrap();
        controller.complete_submission(&ticket, generated("iVBORw0KGgo=", "42"));
        let stale = controller.select_history_entry(ticket.entry).request.unwrap();
        let _fresh = controller.select_history_entry(ticket.entry).request.unwrap();

        let changes = controller.complete_fetch(&stale, Ok(payload("R0lGODlh")));

        assert!(changes.is_empty());
        assert_eq!(controller.state().image(), &ImageDisplay::Loading);
    }

    #[test]
    fn test_select_out_of_range_index() {
        let mut controller = UiController::default();
        let dispatch = controller.select_history_index(3);
        assert!(dispatch.changes.is_empty());
        assert!(dispatch.request.is_none());
    }
}
