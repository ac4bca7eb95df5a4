use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use serde::Serialize;
use tracing::debug;

use crate::state::app_state::AppState;
use power_twin::core::constants::{RAYS_PER_SOLAR, SOLAR_KWH, TWIN_VERSION};

pub fn health_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/info", get(info_check))
        .route("/constants", get(constants))
        .with_state(state)
}

pub async fn info_check(State(state): State<AppState>) -> Response {
    debug!("{} requested", state.config.name);
    Json(state.config.as_ref().clone()).into_response()
}

async fn health_check() -> Response {
    Json(HealthStatus {
        status: "ok".to_owned(),
    })
    .into_response()
}

pub async fn constants() -> Json<UnitConstants> {
    Json(UnitConstants {
        solar_kwh: SOLAR_KWH,
        rays_per_solar: RAYS_PER_SOLAR,
        description: "1 Solar = 4,913 kWh of renewable energy. 1 Solar = 10,000 Solar Rays.",
        version: TWIN_VERSION,
    })
}

#[derive(Serialize)]
pub struct HealthStatus {
    status: String,
}

#[derive(Serialize, Debug)]
pub struct UnitConstants {
    pub solar_kwh: f64,
    pub rays_per_solar: f64,
    pub description: &'static str,
    pub version: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_constants_payload() {
        let Json(payload) = constants().await;
        assert_eq!(payload.solar_kwh, 4913.0);
        assert_eq!(payload.rays_per_solar, 10000.0);
        assert_eq!(payload.version, "tcs-power-twin-v1");
    }
}
