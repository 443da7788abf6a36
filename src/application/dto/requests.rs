//! Tickets tying an in-flight request back to the action that issued it.

use crate::domain::RequestToken;
use crate::domain::entities::{EntryKey, Prompt, PromptId};

/// Issued when a prompt submission passes validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    /// Optimistic entry created for this submission.
    pub entry: EntryKey,
    pub token: RequestToken,
    pub prompt: Prompt,
}

/// Issued when selecting an identified history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub entry: EntryKey,
    pub token: RequestToken,
    pub prompt_id: PromptId,
}

/// Result of an action handler: the changes it applied and the request, if
/// any, the caller must now perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch<T> {
    pub changes: Vec<super::StateChange>,
    pub request: Option<T>,
}

impl<T> Dispatch<T> {
    #[must_use]
    pub const fn none() -> Self {
        Self {
            changes: Vec::new(),
            request: None,
        }
    }

    #[must_use]
    pub fn local(changes: Vec<super::StateChange>) -> Self {
        Self {
            changes,
            request: None,
        }
    }
}
