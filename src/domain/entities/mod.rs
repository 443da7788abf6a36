//! Domain entities.

mod history;
mod image;
mod prompt;

pub use history::{EntryKey, History, HistoryEntry};
pub use self::image::{
    ALT_GENERATED, ALT_GENERATING, ALT_LOAD_FAILED, ALT_LOADING, ALT_NOT_FOUND,
    ALT_NOT_YET_GENERATED, ImageDisplay, ImageFault, ImagePayload, InvalidPayload, PLACEHOLDER_SRC,
};
pub use prompt::{EMPTY_PROMPT_MESSAGE, Prompt, PromptId, first_line};
