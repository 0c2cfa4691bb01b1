use axum::{Extension, response::IntoResponse};
use warden_core::Claims;

use super::success_message;

/// Example protected operation. The access guard has already verified the
/// token and its live session; the claims arrive through request extensions.
#[tracing::instrument(name = "Protected", skip_all)]
pub async fn protected(Extension(claims): Extension<Claims>) -> impl IntoResponse {
    tracing::info!(username = %claims.username, "User accessed the protected endpoint");
    success_message(&format!(
        "Hello {}, you have accessed a protected endpoint!",
        claims.username
    ))
}
