//! Presentation layer with UI components and event handling.

/// Event handling.
pub mod events;
/// One-shot mode.
pub mod headless;
/// UI screens.
pub mod ui;
/// Reusable widgets.
pub mod widgets;

pub use headless::{HeadlessError, OneShotOutcome, generate_once};
pub use ui::App;
