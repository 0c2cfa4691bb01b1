use axum::{extract::State, http::HeaderMap, response::IntoResponse};

use super::{error::ApiError, success_message};
use crate::http::{AppState, middleware::bearer_token};

/// Revoke the presented token's session.
///
/// The token only has to carry a valid signature and be unexpired; whether a
/// session still exists does not matter, so logging out twice succeeds.
#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let token = bearer_token(&headers)?;
    let claims = state.tokens.verify(token)?;

    state.auth.logout(&claims).await?;

    Ok(success_message("Logout successful."))
}
