//! Use case implementations.

mod fetch_image_use_case;
mod login_use_case;
mod save_image_use_case;
mod submit_prompt_use_case;

pub use fetch_image_use_case::FetchImageUseCase;
pub use login_use_case::LoginUseCase;
pub use save_image_use_case::{SaveImageError, SaveImageUseCase};
pub use submit_prompt_use_case::SubmitPromptUseCase;
