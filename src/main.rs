use std::path::Path;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database};
use tokio::net::TcpListener;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

use fyyur::{
    config::{Config, LogFormat},
    create_router,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(config.log_format, config.log_file.as_deref())?;

    tracing::info!("Starting Fyyur...");
    tracing::info!(
        "Configuration loaded (unmatched genres: {})",
        config.unmatched_genres.as_str()
    );

    // Connect to database
    let mut options = ConnectOptions::new(config.database_url.clone());
    options.sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .context("failed to connect to the database")?;
    tracing::info!("Connected to database");

    if config.run_migrations {
        migration::Migrator::up(&db, None).await?;
        tracing::info!("Database migrations completed");
    }

    let addr = format!("{}:{}", config.server_host, config.server_port);
    let state = AppState::new(db.clone(), config);
    let app = create_router(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped, closing database connections");
    db.close().await?;

    Ok(())
}

fn init_tracing(format: LogFormat, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fyyur=debug,tower_http=debug".into());

    // Plain-text sink at info and above, no colors
    let file_layer = match log_file {
        Some(path) => Some(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_writer(file_appender(path)?)
                .with_filter(LevelFilter::INFO),
        ),
        None => None,
    };

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
    }

    Ok(())
}

fn file_appender(path: &Path) -> Result<RollingFileAppender> {
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("LOG_FILE {} has no file name", path.display()))?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(directory)
        .with_context(|| format!("failed to open log file {}", path.display()))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
    }
    tracing::info!("Shutdown signal received");
}
