use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

use crate::http::AppState;

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Ping the active user-store backend.
#[tracing::instrument(name = "Health check", skip_all)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match state.probe.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "OK".to_owned(),
                error: None,
            }),
        ),
        Err(error) => {
            tracing::error!(%error, "Health check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthResponse {
                    status: "DOWN".to_owned(),
                    error: Some(error),
                }),
            )
        }
    }
}
