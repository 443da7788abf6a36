//! Application services.

mod controller;
mod notification_manager;
mod ui_state;

pub use controller::UiController;
pub use notification_manager::NotificationManager;
pub use ui_state::UiState;
