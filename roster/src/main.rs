use anyhow::{Context, Result};
use axum::serve;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use duty_roster::backend::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let app_state = initialize_backend().await?;

    let addr: SocketAddr = app_state
        .config
        .server_address
        .parse()
        .with_context(|| format!("Invalid server_address '{}'", app_state.config.server_address))?;

    let router = create_router(app_state);

    info!("🌐 Starting duty roster REST API at {}", addr);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    serve(listener, router).await?;

    Ok(())
}
