use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use kingstone_books::config::Config;
use kingstone_books::storage::{SqliteStorage, Storage};
use kingstone_books::utils::http::create_client;
use kingstone_books::web::{self, WebState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kingstone_books=info".parse()?),
        )
        .init();

    info!("Starting Kingstone book scraper (web UI)");

    let config = Arc::new(Config::load());

    let storage: Arc<dyn Storage> = Arc::new(SqliteStorage::open(&config.db_path)?);
    storage.migrate().await?;

    let client = create_client(&config.user_agent)?;

    let app = web::router(WebState {
        storage,
        client,
        config: config.clone(),
    });

    info!("Listening on {}", config.web_addr);
    let listener = tokio::net::TcpListener::bind(&config.web_addr)
        .await
        .context("Failed to bind web address")?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
