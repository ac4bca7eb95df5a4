use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::state::app_state::AppState;
use power_twin::{parse_metadata, PowerSample, PowerTrace, PowerTwin, TwinBuilder, TwinError};

// Room for the JSON envelope around the trace text
const BODY_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(Deserialize, Debug)]
pub struct AnalyzeRequest {
    pub csv: String,
    pub trace_file: Option<String>,
    pub chip_id: Option<String>,
    pub workload_id: Option<String>,
    #[serde(default)]
    pub meta: Vec<String>,
}

#[derive(Deserialize, Debug)]
pub struct CalculateRequest {
    pub samples: Vec<PowerSample>,
    pub chip_id: Option<String>,
    pub workload_id: Option<String>,
    #[serde(default)]
    pub meta: Vec<String>,
}

#[derive(Serialize, Debug)]
pub struct TwinResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_twin: Option<PowerTwin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TwinResponse {
    fn ok(power_twin: PowerTwin) -> Response {
        Json(Self {
            success: true,
            power_twin: Some(power_twin),
            error: None,
        })
        .into_response()
    }

    fn failed(status: StatusCode, message: String) -> Response {
        (
            status,
            Json(Self {
                success: false,
                power_twin: None,
                error: Some(message),
            }),
        )
            .into_response()
    }
}

/// =======================
/// ROUTER
/// =======================

pub fn twin_routes(state: AppState) -> Router {
    let body_limit = state.config.limits.max_trace_bytes + BODY_OVERHEAD_BYTES;

    Router::new()
        .route("/analyze", post(analyze))
        .route("/calculate", post(calculate))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// =======================
/// HANDLERS
/// =======================

fn builder_for(state: &AppState, chip_id: Option<String>, workload_id: Option<String>, meta: &[String]) -> TwinBuilder {
    let defaults = &state.config.defaults;
    let chip_id = chip_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| defaults.chip_id.clone());
    let workload_id = workload_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| defaults.workload_id.clone());

    TwinBuilder::new(chip_id, workload_id).metadata(parse_metadata(meta))
}

fn reject(err: TwinError) -> Response {
    if err.is_input_error() {
        warn!("[Power Twin] {:?} error: {}", err.kind(), err);
    } else {
        error!("[Power Twin] {:?} error: {}", err.kind(), err);
    }
    TwinResponse::failed(StatusCode::BAD_REQUEST, err.to_string())
}

/// Oversized or malformed bodies get the same envelope as pipeline failures.
fn reject_body(rejection: JsonRejection) -> Response {
    warn!("[Power Twin] request body rejected: {}", rejection.body_text());
    TwinResponse::failed(rejection.status(), rejection.body_text())
}

pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return reject_body(rejection),
    };

    let max_bytes = state.config.limits.max_trace_bytes;
    if request.csv.len() > max_bytes {
        error!("Trace rejected: {} bytes exceeds {}", request.csv.len(), max_bytes);
        return TwinResponse::failed(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!("Trace exceeds {} bytes", max_bytes),
        );
    }

    let trace_file = request.trace_file.as_deref().unwrap_or("upload.csv");
    debug!("Analyzing trace {} ({} bytes)", trace_file, request.csv.len());

    let trace = match PowerTrace::from_csv_str(&request.csv, trace_file) {
        Ok(trace) => trace,
        Err(e) => return reject(e),
    };

    let builder = builder_for(&state, request.chip_id, request.workload_id, &request.meta);
    match builder.build_trace(&trace) {
        Ok(twin) => {
            info!("Power twin built: {} samples from {}", twin.profile.samples, twin.source.trace_file);
            TwinResponse::ok(twin)
        }
        Err(e) => reject(e),
    }
}

/// Samples are taken as given, without sorting.
pub async fn calculate(
    State(state): State<AppState>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return reject_body(rejection),
    };

    if request.samples.len() < 2 {
        return TwinResponse::failed(
            StatusCode::BAD_REQUEST,
            "Must provide at least 2 power samples as array of {time_s, power_w}".to_string(),
        );
    }

    let builder = builder_for(&state, request.chip_id, request.workload_id, &request.meta);
    match builder.build(&request.samples) {
        Ok(twin) => {
            info!("Power twin calculated from {} samples", twin.profile.samples);
            TwinResponse::ok(twin)
        }
        Err(e) => reject(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::service_model::{Connection, Limits, ServiceConfig, TwinDefaults};
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::Request;
    use axum::http::header::CONTENT_TYPE;
    use serde_json::Value;

    fn state(max_trace_bytes: usize) -> AppState {
        AppState::new(ServiceConfig {
            name: "Power Twin".to_string(),
            id: "power-twin".to_string(),
            version: "0.2.0".to_string(),
            description: "test".to_string(),
            connection: Connection {
                ip: "127.0.0.1".to_string(),
                port: 0,
            },
            defaults: TwinDefaults::default(),
            limits: Limits { max_trace_bytes },
        })
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn extract_json<T>(body: String) -> Result<Json<T>, JsonRejection>
    where
        T: serde::de::DeserializeOwned,
    {
        let request = Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        Json::<T>::from_request(request, &()).await
    }

    fn analyze_request(csv: &str) -> AnalyzeRequest {
        AnalyzeRequest {
            csv: csv.to_string(),
            trace_file: Some("run.csv".to_string()),
            chip_id: Some("open-eda-cpu-v1".to_string()),
            workload_id: None,
            meta: vec!["clock_ghz=2.4".to_string()],
        }
    }

    #[tokio::test]
    async fn test_analyze_builds_twin() {
        let request = analyze_request("time_s,power_w\n0.02,90\n0.0,80\n0.01,95\n");
        let response = analyze(State(state(1024)), Ok(Json(request))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        let twin = &body["power_twin"];
        assert_eq!(twin["chip_id"], "open-eda-cpu-v1");
        assert_eq!(twin["workload_id"], "unknown-workload");
        assert_eq!(twin["profile"]["samples"], 3);
        assert_eq!(twin["profile"]["peak_power_w"], 95.0);
        assert_eq!(twin["source"]["trace_file"], "run.csv");
        assert_eq!(twin["metadata"]["clock_ghz"], 2.4);
    }

    #[tokio::test]
    async fn test_analyze_reports_schema_error() {
        let request = analyze_request("t,p\n0,1\n1,2\n");
        let response = analyze(State(state(1024)), Ok(Json(request))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("time_s,power_w"));
        assert!(body.get("power_twin").is_none());
    }

    #[tokio::test]
    async fn test_analyze_enforces_size_limit() {
        let request = analyze_request("time_s,power_w\n0,1\n1,2\n");
        let response = analyze(State(state(8)), Ok(Json(request))).await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_calculate_uses_api_input() {
        let request = CalculateRequest {
            samples: vec![PowerSample::new(0.0, 100.0), PowerSample::new(36.0, 100.0)],
            chip_id: Some(String::new()),
            workload_id: Some("bench".to_string()),
            meta: Vec::new(),
        };
        let response = calculate(State(state(1024)), Ok(Json(request))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let twin = &body["power_twin"];
        assert_eq!(twin["chip_id"], "unknown-chip");
        assert_eq!(twin["source"]["trace_file"], "api-input");
        assert_eq!(twin["energy"]["total_kwh"], 0.001);
    }

    #[tokio::test]
    async fn test_calculate_rejects_unordered_samples() {
        let request = CalculateRequest {
            samples: vec![PowerSample::new(1.0, 5.0), PowerSample::new(0.5, 5.0)],
            chip_id: None,
            workload_id: None,
            meta: Vec::new(),
        };
        let response = calculate(State(state(1024)), Ok(Json(request))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("non-decreasing"));
    }

    #[tokio::test]
    async fn test_calculate_requires_two_samples() {
        let request = CalculateRequest {
            samples: vec![PowerSample::new(0.0, 5.0)],
            chip_id: None,
            workload_id: None,
            meta: Vec::new(),
        };
        let response = calculate(State(state(1024)), Ok(Json(request))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_oversized_body_gets_envelope() {
        // Past axum's default 2 MiB body limit
        let body = format!(r#"{{"csv":"{}"}}"#, "a".repeat(3 * 1024 * 1024));
        let payload = extract_json::<AnalyzeRequest>(body).await;
        assert!(payload.is_err());

        let response = analyze(State(state(1024)), payload).await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_body_gets_envelope() {
        let payload = extract_json::<CalculateRequest>(r#"{"samples": "#.to_string()).await;
        let response = calculate(State(state(1024)), payload).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert!(body.get("power_twin").is_none());
    }
}
