use super::app_config::LogLevel;
use crate::domain::OrderingPolicy;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "genview",
    version,
    about = "A terminal client for prompt-driven image generation",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Base URL of the generation backend.
    #[arg(short, long, value_name = "URL", env = "GENVIEW_SERVER_URL")]
    pub server_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Response ordering: latest_wins or arrival_order.
    #[arg(long, value_name = "POLICY")]
    pub ordering: Option<OrderingPolicy>,

    /// Directory for saved images.
    #[arg(long, value_name = "DIR")]
    pub save_dir: Option<PathBuf>,

    /// Username for the backend session. The password is read from
    /// `GENVIEW_PASSWORD`.
    #[arg(short, long, env = "GENVIEW_USERNAME")]
    pub username: Option<String>,

    /// Render image pixels in the terminal.
    #[arg(long)]
    pub image_preview: Option<bool>,

    /// Alert duration in seconds.
    #[arg(long)]
    pub notification_duration: Option<u64>,

    /// Generate one image for this prompt and exit instead of starting the UI.
    #[arg(short, long, value_name = "TEXT")]
    pub prompt: Option<String>,

    /// Where to write the image produced by `--prompt`.
    #[arg(short, long, value_name = "PATH", requires = "prompt")]
    pub output: Option<PathBuf>,
}
