use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{claims::Claims, user::User};

// TokenAuthority port trait and errors
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,
    #[error("Invalid token: {0}")]
    InvalidSignature(String),
    #[error("Token issuance failed: {0}")]
    Issuance(String),
}

/// Issues and verifies signed, time-limited bearer tokens.
///
/// Verification rejects tampered payloads and expired tokens distinctly;
/// both surface as "invalid token" to clients, but the distinction matters
/// for logging.
pub trait TokenAuthority: Send + Sync {
    /// Sign a token carrying the user's identity claims.
    fn issue(&self, user: &User) -> Result<(String, Claims), TokenError>;

    /// Check signature and expiry, returning the embedded claims.
    fn verify(&self, token: &str) -> Result<Claims, TokenError>;
}

/// Connectivity probe for the active store backend, surfaced by the health
/// endpoint.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn ping(&self) -> Result<(), String>;
}
