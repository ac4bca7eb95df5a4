use axum::Router;
use tracing::{info, Level};

mod models;
mod routes;
mod state;
mod utils;

use crate::state::app_state::AppState;
use crate::utils::conf_helper::{config_path, init_config_and_bind};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    // === CONFIG + LISTENER ===
    let path = config_path();
    let (listener, config) = init_config_and_bind(&path)
        .await
        .map_err(|e| anyhow::anyhow!("init failed ({path}): {e}"))?;

    info!(
        "{} initialized on {}:{}",
        config.name,
        config.connection.ip,
        config.connection.port
    );

    let state = AppState::new(config);

    let app = Router::new()
        .merge(routes::info_routes::health_routes(state.clone()))
        .merge(routes::twin_routes::twin_routes(state));

    axum::serve(listener, app).await?;

    Ok(())
}
