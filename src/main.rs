mod routes;
mod singleton;
mod state;

use anyhow::Result;
use timeline_core::{ServerConfig, TimelineStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::load()?;
    let data_dir = config.data_path();

    // Ensure only one instance writes to this data directory
    let _lock = singleton::acquire_lock(&data_dir)?;

    let state = AppState::new(TimelineStore::new(&data_dir));
    let app = routes::app(state, config.static_path());

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!(
        addr = %listener.local_addr()?,
        data_dir = %data_dir.display(),
        "timeline-server listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
