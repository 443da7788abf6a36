//! Data transfer objects.

mod auth_dto;
mod requests;
mod state_change;

pub use auth_dto::{LoginRequest, PasswordSource};
pub use requests::{Dispatch, FetchTicket, SubmitTicket};
pub use state_change::StateChange;
