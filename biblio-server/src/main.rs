//! Biblio Server - REST API for book metadata enrichment

use anyhow::{Context, Result};
use biblio_server::{routes, state};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "biblio_server=debug,biblio_core=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Create application state
    let state = state::AppState::new().await?;

    // Build router
    let app = routes::create_router(state);

    // Start server
    let addr: SocketAddr = std::env::var("BIBLIO_BIND_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()
        .context("BIBLIO_BIND_ADDR is not a valid socket address")?;
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
