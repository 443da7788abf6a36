//! Application configuration.

use crate::domain::OrderingPolicy;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub(crate) const APP_NAME: &str = "genview";
pub(crate) const APP_QUALIFIER: &str = "com";
pub(crate) const APP_ORGANIZATION: &str = "genview";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, read from `config.toml` and overridden by CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Base URL of the generation backend.
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Whether superseded responses may still replace the image.
    #[serde(default)]
    pub ordering: OrderingPolicy,

    /// Directory for saved images. Defaults to the platform data dir.
    #[serde(default)]
    pub save_dir: Option<PathBuf>,

    /// UI configuration.
    #[serde(default)]
    pub ui: UiConfig,

    /// Backend session login.
    #[serde(default)]
    pub auth: AuthConfig,
}

/// UI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Alert duration in seconds.
    #[serde(default = "default_notification_duration")]
    pub notification_duration: u64,

    /// Render image pixels; when false only the alt text is shown.
    #[serde(default = "default_true")]
    pub image_preview: bool,

    /// Show submission time next to history entries.
    #[serde(default = "default_true")]
    pub show_timestamps: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notification_duration: default_notification_duration(),
            image_preview: true,
            show_timestamps: true,
        }
    }
}

/// Login configuration. The password is never stored here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Username for `POST /login`. No login is attempted when unset.
    #[serde(default)]
    pub username: Option<String>,
}

fn default_server_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

const fn default_request_timeout() -> u64 {
    120
}

const fn default_true() -> bool {
    true
}

const fn default_notification_duration() -> u64 {
    5
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(server_url) = &args.server_url {
            self.server_url.clone_from(server_url);
        }
        if let Some(timeout) = args.timeout {
            self.request_timeout_secs = timeout;
        }
        if let Some(ordering) = args.ordering {
            self.ordering = ordering;
        }
        if let Some(save_dir) = &args.save_dir {
            self.save_dir = Some(save_dir.clone());
        }
        if let Some(username) = &args.username {
            self.auth.username = Some(username.clone());
        }
        if let Some(image_preview) = args.image_preview {
            self.ui.image_preview = image_preview;
        }
        if let Some(notification_duration) = args.notification_duration {
            self.ui.notification_duration = notification_duration;
        }
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("genview.log"))
    }

    /// Returns default directory for saved images.
    #[must_use]
    pub fn default_save_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("images"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }

    /// Returns effective save directory, falling back to the working directory.
    #[must_use]
    pub fn effective_save_dir(&self) -> PathBuf {
        self.save_dir
            .clone()
            .or_else(Self::default_save_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Per-request timeout. A zero in the file is raised to one second.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        if self.request_timeout_secs == 0 {
            Duration::from_secs(1)
        } else {
            Duration::from_secs(self.request_timeout_secs)
        }
    }

    #[must_use]
    pub const fn notification_duration(&self) -> Duration {
        Duration::from_secs(self.ui.notification_duration)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            server_url: default_server_url(),
            request_timeout_secs: default_request_timeout(),
            ordering: OrderingPolicy::default(),
            save_dir: None,
            ui: UiConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}
