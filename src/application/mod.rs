//! Application layer with the UI controller, use cases and DTOs.

/// Data transfer objects.
pub mod dto;
/// Controller and state services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{Dispatch, FetchTicket, LoginRequest, PasswordSource, StateChange, SubmitTicket};
pub use services::{UiController, UiState};
pub use use_cases::{FetchImageUseCase, LoginUseCase, SaveImageUseCase, SubmitPromptUseCase};
