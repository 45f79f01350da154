use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use kingstone_books::api::{self, ApiState};
use kingstone_books::config::Config;
use kingstone_books::utils::http::create_client;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kingstone_books=info".parse()?),
        )
        .init();

    info!("Starting Kingstone book scraper (JSON API)");

    let config = Arc::new(Config::load());
    let client = create_client(&config.user_agent)?;

    let app = api::router(ApiState {
        client,
        config: config.clone(),
    });

    info!("Listening on {}", config.api_addr);
    let listener = tokio::net::TcpListener::bind(&config.api_addr)
        .await
        .context("Failed to bind API address")?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
