use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    identity::Identity, password::RawPassword, user::User, username::Username,
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserAlreadyExists, Self::UserAlreadyExists)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Polymorphic user store: one contract, two interchangeable backends
/// (relational and key-value), selected once at startup.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_by_username(&self, username: &Username)
    -> Result<Option<User>, UserStoreError>;

    /// Persist a new user. The raw password is hashed inside the store;
    /// callers never pass pre-hashed values. Uniqueness is enforced by the
    /// storage layer itself (unique constraint or conditional put), so a
    /// duplicate insert fails with [`UserStoreError::UserAlreadyExists`]
    /// even under concurrent registration.
    async fn create(
        &self,
        username: Username,
        password: RawPassword,
    ) -> Result<User, UserStoreError>;
}

// SessionStore port trait and errors
#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("Session store error: {0}")]
    Unavailable(String),
}

/// Expiring key-value record of the one current session per identity.
///
/// TTL is enforced passively by the backing store; an expired record simply
/// stops being returned by `get`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Record `token` as the current session for `identity`, overwriting any
    /// previous record.
    async fn set(
        &self,
        identity: &Identity,
        token: &str,
        ttl_seconds: u64,
    ) -> Result<(), SessionStoreError>;

    async fn get(&self, identity: &Identity) -> Result<Option<String>, SessionStoreError>;

    /// Delete the session for `identity`. Deleting a nonexistent session is
    /// not an error.
    async fn delete(&self, identity: &Identity) -> Result<(), SessionStoreError>;
}
