use axum::{Json, extract::State, response::IntoResponse};
use secrecy::Secret;
use serde::Deserialize;
use warden_core::{RawPassword, Username};

use super::{error::ApiError, success_message};
use crate::http::AppState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: Secret<String>,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let username = Username::try_from(request.username)?;
    let password = RawPassword::try_from(request.password)?;

    state.auth.register(username, password).await?;

    Ok(success_message("User registered successfully."))
}
