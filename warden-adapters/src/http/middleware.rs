//! The access guard applied in front of protected operations.
//!
//! A bearer token is honored only when its signature and expiry check out
//! AND the live session record for its identity claim holds that exact
//! token. A token whose session was deleted (logout) or overwritten
//! (re-login) is rejected before its stated expiry. Read access never
//! mutates session state.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

use super::AppState;
use crate::http::routes::ApiError;

const BEARER_PREFIX: &str = "Bearer ";

/// Pull the token out of an `Authorization: Bearer <token>` header.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .ok_or_else(|| {
            tracing::warn!("Missing or invalid authorization header");
            ApiError::MissingCredentials
        })
}

#[tracing::instrument(name = "Access guard", skip_all)]
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())?.to_owned();

    let claims = state.tokens.verify(&token)?;

    let stored = state.sessions.get(&claims.sub).await.map_err(|e| {
        tracing::error!(error = %e, "Session lookup failed");
        ApiError::Internal
    })?;

    match stored {
        Some(session_token) if session_token == token => {}
        _ => {
            tracing::warn!(
                identity = %claims.sub,
                "Session token mismatch or expired"
            );
            return Err(ApiError::SessionInvalid);
        }
    }

    // Hand the verified claims to the downstream handler.
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn extracts_a_well_formed_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn missing_header_is_missing_credentials() {
        let headers = HeaderMap::new();
        assert!(matches!(
            bearer_token(&headers),
            Err(ApiError::MissingCredentials)
        ));
    }

    #[test]
    fn non_bearer_scheme_is_missing_credentials() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert!(matches!(
            bearer_token(&headers),
            Err(ApiError::MissingCredentials)
        ));
    }
}
