//! SmartAttend - Schedule service
//!
//! Serves weekly schedule views and day-count policy checks to the
//! SmartAttend web front end.

use anyhow::{Context, Result};
use smartattend::{api, Config, Database};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    if std::path::Path::new(".env").exists() {
        dotenvy::dotenv()?;
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("SmartAttend schedule service starting...");

    // Load configuration
    let config = Config::load()?;
    info!("Configuration loaded");
    info!("Course palette: {} colors", config.schedule.palette.len());
    let day_edits = if config.schedule.allow_day_edit {
        "allowed"
    } else {
        "locked"
    };
    info!("Day edits on existing schedules: {}", day_edits);
    info!("Default days per week: {}", config.schedule.default_days_per_week);

    // Initialize database
    let db = Database::new(&config.database.path).await?;
    db.migrate().await?;
    info!("Database initialized at {}", config.database.path);

    let server = api::start_server(config, db).await?;

    tokio::select! {
        result = server => {
            result.context("API server task failed")??;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received shutdown signal");
        }
    }

    info!("SmartAttend shutting down");

    Ok(())
}
