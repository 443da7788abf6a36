//! Infrastructure layer with external service adapters.

/// Generation backend client.
pub mod backend;
/// Application configuration.
pub mod config;
/// Image decoding.
pub mod image;

pub use backend::HttpImageApi;
pub use config::{AppConfig, CliArgs, LogLevel, StorageManager};
pub use self::image::{DecodeError, decode_payload, decode_payload_async};
