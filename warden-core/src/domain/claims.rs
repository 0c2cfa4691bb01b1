use serde::{Deserialize, Serialize};

use super::{identity::Identity, user::User};

/// Claim set carried by a signed bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Normalized identity of the authenticated user.
    pub sub: Identity,
    pub username: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

impl Claims {
    pub fn for_user(user: &User, issued_at: i64, ttl_seconds: i64) -> Self {
        Self {
            sub: user.identity(),
            username: user.username().as_str().to_owned(),
            iat: issued_at,
            exp: issued_at + ttl_seconds,
        }
    }
}
