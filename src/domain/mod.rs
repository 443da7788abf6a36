//! Domain layer with core entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// User-facing alerts.
pub mod notification;
/// Port definitions.
pub mod ports;
/// Request ordering.
pub mod request_sequence;
/// Serde utilities.
pub mod serde_utils;

pub use entities::{EntryKey, History, HistoryEntry, ImageDisplay, Prompt, PromptId};
pub use errors::{AuthError, GenerationError};
pub use notification::{Notification, NotificationLevel};
pub use ports::{ImageApiPort, SessionPort};
pub use request_sequence::{OrderingPolicy, RequestSequence, RequestToken};
