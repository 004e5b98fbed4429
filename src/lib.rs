pub mod chat;
pub mod config;
pub mod console;
pub mod dashboard;
pub mod db;
pub mod intent;
pub mod models;
pub mod render;
pub mod risk;

use std::path::Path;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    DataSource(#[from] db::DataSourceError),

    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

pub fn run() -> Result<(), StartupError> {
    // Logs go to stderr so the console transcript stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let path = config::warehouse_path()?;
    let conn = db::open_warehouse(&path)?;

    let mut dashboard =
        dashboard::DashboardController::new(&conn, chat::DashboardSession::start());
    let stdin = std::io::stdin();
    console::run_console(
        &mut dashboard,
        stdin.lock(),
        std::io::stdout().lock(),
        Path::new("."),
    )?;
    dashboard.finish();
    Ok(())
}
