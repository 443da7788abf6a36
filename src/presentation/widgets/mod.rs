mod footer_bar;
mod history_list;
mod image_view;
mod prompt_editor;

pub use footer_bar::{FocusContext, FooterBar, FooterBarStyle, KeyHint};
pub use history_list::{HistoryList, HistoryListState};
pub use image_view::{ImageView, ImageViewState, detect_picker};
pub use prompt_editor::{PromptEditor, PromptEditorState, PromptEditorStyle};
