//! UI screens.

mod app;
mod main_screen;
mod notification_popup;

pub use app::App;
pub use main_screen::{MainScreen, MainScreenState, ScreenAction};
pub use notification_popup::NotificationPopup;
