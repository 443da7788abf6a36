//! Prompt text and server-assigned prompt identifiers.

use serde::{Deserialize, Serialize};

use crate::domain::errors::GenerationError;

/// Alert text shown when the prompt field is submitted empty.
pub const EMPTY_PROMPT_MESSAGE: &str = "Please enter a prompt.";

/// Identifier the backend assigns to a generated image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PromptId(String);

impl PromptId {
    /// Creates a prompt identifier. Returns `None` when the value is blank.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Returns the identifier as sent by the server.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PromptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated, non-blank prompt text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    text: String,
}

impl Prompt {
    /// Validates raw input from the prompt field.
    ///
    /// The full text is kept verbatim, including surrounding whitespace.
    ///
    /// # Errors
    /// Returns [`GenerationError::Validation`] when the text is empty or
    /// whitespace only.
    pub fn new(text: impl Into<String>) -> Result<Self, GenerationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(GenerationError::validation(EMPTY_PROMPT_MESSAGE));
        }
        Ok(Self { text })
    }

    /// Returns the full prompt text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the first line, used as the history label.
    #[must_use]
    pub fn first_line(&self) -> &str {
        first_line(&self.text)
    }
}

/// Returns everything before the first `\n`.
#[must_use]
pub fn first_line(text: &str) -> &str {
    text.split('\n').next().unwrap_or_default()
}
