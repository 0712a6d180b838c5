use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use votebooth::application::BallotSession;
use votebooth::domain::entities::AdminSecret;
use votebooth::infrastructure::credentials::ConfiguredCredential;
use votebooth::infrastructure::{
    AppConfig, CliArgs, DesktopFeedbackService, JsonBallotStore, StorageManager,
};
use votebooth::presentation::App;

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

fn create_app() -> Result<App> {
    let args = CliArgs::parse();

    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);

    init_logging(&config)?;
    info!(version = votebooth::VERSION, "Starting Votebooth");

    let store = Arc::new(match config.data_dir.clone() {
        Some(dir) => JsonBallotStore::with_dir(dir),
        None => JsonBallotStore::new()?,
    });
    let feedback = Arc::new(DesktopFeedbackService::new(
        config.enable_bell,
        config.enable_desktop_notifications,
    ));
    let credentials = Arc::new(ConfiguredCredential::new(AdminSecret::new(
        config.admin_password.clone(),
    )));

    let session = BallotSession::new(
        store,
        feedback,
        credentials,
        Duration::from_millis(config.reset_delay_ms),
    );

    Ok(App::new(session))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    color_eyre::install()?;

    let app = create_app()?;

    let mut terminal = ratatui::init();

    let result = app.run(&mut terminal).await;

    ratatui::restore();

    result
}
