//! Domain error types.

mod auth_error;
mod generation_error;

pub use auth_error::AuthError;
pub use generation_error::GenerationError;
