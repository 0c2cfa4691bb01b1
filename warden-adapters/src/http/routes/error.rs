use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use warden_application::{LoginError, LogoutError, RegisterError};
use warden_core::{PolicyRule, RawPasswordError, TokenError, UsernameError};

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input")]
    InvalidInput(String),

    #[error("Password does not meet complexity requirements.")]
    WeakPassword(Vec<PolicyRule>),

    #[error("Username already exists.")]
    UsernameTaken,

    #[error("Authentication failed.")]
    AuthenticationFailed,

    #[error("Missing or invalid authorization header.")]
    MissingCredentials,

    #[error("Invalid token.")]
    InvalidToken,

    #[error("Invalid or expired session.")]
    SessionInvalid,

    #[error("Internal server error.")]
    Internal,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, details) = match &self {
            ApiError::InvalidInput(detail) => (StatusCode::BAD_REQUEST, Some(vec![detail.clone()])),

            ApiError::WeakPassword(rules) => (
                StatusCode::BAD_REQUEST,
                Some(rules.iter().map(|rule| rule.message().to_owned()).collect()),
            ),

            ApiError::UsernameTaken => (StatusCode::BAD_REQUEST, None),

            ApiError::AuthenticationFailed
            | ApiError::MissingCredentials
            | ApiError::InvalidToken
            | ApiError::SessionInvalid => (StatusCode::UNAUTHORIZED, None),

            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, None),
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
            details,
        });

        (status_code, body).into_response()
    }
}

impl From<UsernameError> for ApiError {
    fn from(error: UsernameError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<RawPasswordError> for ApiError {
    fn from(error: RawPasswordError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<RegisterError> for ApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::WeakPassword(rules) => ApiError::WeakPassword(rules),
            RegisterError::UsernameTaken => ApiError::UsernameTaken,
            RegisterError::UserStore(e) => {
                tracing::error!(error = %e, "Registration failed in the user store");
                ApiError::Internal
            }
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::AuthenticationFailed => ApiError::AuthenticationFailed,
            LoginError::UserStore(e) => {
                tracing::error!(error = %e, "Login failed in the user store");
                ApiError::Internal
            }
            LoginError::SessionStore(e) => {
                tracing::error!(error = %e, "Login failed storing the session");
                ApiError::Internal
            }
            LoginError::Token(e) => {
                tracing::error!(error = %e, "Login failed issuing a token");
                ApiError::Internal
            }
            LoginError::Hashing(e) => {
                tracing::error!(error = %e, "Login failed verifying credentials");
                ApiError::Internal
            }
        }
    }
}

impl From<LogoutError> for ApiError {
    fn from(error: LogoutError) -> Self {
        match error {
            LogoutError::SessionStore(e) => {
                tracing::error!(error = %e, "Logout failed deleting the session");
                ApiError::Internal
            }
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        // Expiry and bad signatures look identical to clients; the log line
        // keeps them apart.
        match error {
            TokenError::Expired => {
                tracing::warn!("Rejected expired token");
                ApiError::InvalidToken
            }
            TokenError::InvalidSignature(reason) => {
                tracing::warn!(%reason, "Rejected token with invalid signature");
                ApiError::InvalidToken
            }
            TokenError::Issuance(e) => {
                tracing::error!(error = %e, "Token issuance failed");
                ApiError::Internal
            }
        }
    }
}
