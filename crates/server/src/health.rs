use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

#[derive(Clone)]
pub struct HealthState {
    scoring_url: String,
    action_count: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthCheck {
    pub status: &'static str,
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: HealthCheck,
    pub scoring_endpoint: HealthCheck,
    pub checked_at: String,
}

pub fn router(scoring_url: impl Into<String>, action_count: usize) -> Router {
    Router::new()
        .route("/health", get(health))
        .with_state(HealthState { scoring_url: scoring_url.into(), action_count })
}

/// Reports readiness of this server only. The scoring service is not
/// contacted; submissions already degrade when it is down.
pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let ready = state.action_count > 0;

    let payload = HealthResponse {
        status: if ready { "ready" } else { "degraded" },
        service: HealthCheck {
            status: if ready { "ready" } else { "degraded" },
            detail: format!("{} actions registered", state.action_count),
        },
        scoring_endpoint: HealthCheck { status: "configured", detail: state.scoring_url },
        checked_at: Utc::now().to_rfc3339(),
    };

    let status_code = if ready { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (status_code, Json(payload))
}
