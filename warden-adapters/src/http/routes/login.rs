use axum::{Json, extract::State, response::IntoResponse};
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use warden_core::{RawPassword, Username};

use super::error::ApiError;
use crate::http::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: Secret<String>,
}

#[derive(Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let username = Username::try_from(request.username)?;
    let password = RawPassword::try_from(request.password)?;

    let (token, _claims) = state.auth.login(username, password).await?;

    Ok(Json(LoginResponse {
        message: "Authentication successful.".to_owned(),
        token,
    }))
}
