use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::collections::HashMap;

use crate::core::metrics;
use crate::core::state::AppState;
use crate::schemas::{HealthResponse, RootResponse};

pub(crate) async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    let api = state.settings().api();
    Json(RootResponse { message: api.project_name.clone(), version: api.version.clone() })
}

pub(crate) async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    let mut components = HashMap::new();

    let (status, code) = match state.store().ping().await {
        Ok(()) => {
            components.insert("database".to_string(), "healthy".to_string());
            ("healthy", StatusCode::OK)
        }
        Err(err) => {
            tracing::warn!(error = %err, "Health check failed");
            components.insert("database".to_string(), format!("unhealthy: {err}"));
            ("unhealthy", StatusCode::SERVICE_UNAVAILABLE)
        }
    };

    let body = HealthResponse {
        service: "assessment-engine".to_string(),
        status: status.to_string(),
        components,
    };
    (code, Json(body))
}

pub(crate) async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    if !state.settings().telemetry().prometheus_enabled {
        return StatusCode::NOT_FOUND.into_response();
    }

    match metrics::render() {
        Some(body) => ([(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
            .into_response(),
        None => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}
