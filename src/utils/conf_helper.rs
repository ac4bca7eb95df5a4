use std::env;
use tokio::fs;
use tokio::net::TcpListener;
use tracing::info;

use crate::models::service_model::ServiceConfig;

pub const DEFAULT_CONFIG_PATH: &str = "twin.json";
pub const CONFIG_PATH_ENV: &str = "POWER_TWIN_CONFIG";

pub fn config_path() -> String {
    env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

pub async fn load_config(file_path: &str) -> Result<ServiceConfig, String> {
    let data = fs::read_to_string(file_path)
        .await
        .map_err(|e| format!("File read Error: {e} {file_path}"))?;

    serde_json::from_str(&data).map_err(|e| format!("JSON Parse Error: {e}"))
}

/// Loads the config and binds the listener. Port 0 picks a free port, which is
/// written back into the returned config.
pub async fn init_config_and_bind(file_path: &str) -> Result<(TcpListener, ServiceConfig), String> {
    let mut config = load_config(file_path).await?;

    let bind_addr = format!("{}:{}", config.connection.ip, config.connection.port);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| format!("Bind failed: {e}"))?;

    let actual_port = listener
        .local_addr()
        .map_err(|e| format!("Addr error: {e}"))?
        .port();

    config.connection.port = actual_port;

    info!("Config initialized with dynamic port: {}", actual_port);

    Ok((listener, config))
}
