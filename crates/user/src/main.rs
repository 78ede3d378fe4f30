use anyhow::{Context, Result};
use dotenv::dotenv;
use shared::{
    config::{Config, ConnectionManager},
    utils::Logger,
};
use tracing::info;
use user::{handler::AppRouter, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let _logger = Logger::new("user", config.is_dev, config.log_dir.as_deref());

    let db_pool = ConnectionManager::new_pool(
        &config.database_url,
        config.run_migrations,
        config.max_connections,
    )
    .await
    .context("Failed to initialize database pool")?;

    let state = AppState::new(db_pool.clone())
        .await
        .context("Failed to create AppState")?;

    AppRouter::serve(config.port, state)
        .await
        .context("Failed to start server")?;

    info!("🛑 Closing database pool...");
    db_pool.close().await;

    info!("✅ User service shutdown complete.");
    Ok(())
}
