mod singleton;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use datebook_core::config::{DatebookConfig, StoreKind};
use datebook_server::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = DatebookConfig::load().context("Failed to load configuration")?;

    // Two servers writing one directory could race on filenames
    let _lock = match config.store {
        StoreKind::Dir => Some(singleton::acquire_lock(&config.data_path())?),
        StoreKind::Memory => None,
    };

    let state = AppState::from_config(&config).context("Failed to open event store")?;
    let app = datebook_server::app(state);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(%addr, store = ?config.store, data_dir = %config.data_path().display(), "datebook-server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
