use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use genview::application::{LoginRequest, LoginUseCase, PasswordSource};
use genview::domain::ports::Credentials;
use genview::infrastructure::{AppConfig, CliArgs, HttpImageApi, StorageManager};
use genview::presentation::widgets::detect_picker;
use genview::presentation::{App, generate_once};

const PASSWORD_ENV: &str = "GENVIEW_PASSWORD";

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

async fn login(api: Arc<HttpImageApi>, username: &str) -> Result<()> {
    let password = std::env::var(PASSWORD_ENV).unwrap_or_default();
    let request = LoginRequest::new(
        Credentials::new(username, password),
        PasswordSource::Environment,
    );
    LoginUseCase::new(api).execute(request).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        eprintln!("Ignoring unreadable .env file: {e}");
    }

    let args = CliArgs::parse();
    let config = load_config(&args)?;
    init_logging(&config)?;

    info!(
        version = genview::VERSION,
        server = %config.server_url,
        "Starting {}",
        genview::NAME
    );

    let api = Arc::new(HttpImageApi::new(
        &config.server_url,
        config.request_timeout(),
    )?);

    if let Some(username) = config.auth.username.as_deref() {
        login(api.clone(), username).await?;
    } else {
        warn!("No username configured, requests are sent without a session");
    }

    if let Some(prompt) = args.prompt.as_deref() {
        let outcome = generate_once(api, &config, prompt, args.output.as_deref()).await?;
        println!("{}", outcome.prompt_id);
        if let Some(path) = outcome.saved_to {
            println!("{}", path.display());
        }
        return Ok(());
    }

    let mut terminal = ratatui::init();
    let picker = config.ui.image_preview.then(detect_picker);

    let app = App::new(api, &config, picker);
    let result = app.run(&mut terminal).await;

    ratatui::restore();

    result
}
