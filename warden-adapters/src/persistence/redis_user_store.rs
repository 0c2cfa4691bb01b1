//! Key-value user store.
//!
//! The full user record lives as serialized JSON under `user:<username>`;
//! lookups are direct key reads and there is no numeric id. `SET NX` makes
//! the insert conditional, so duplicate registration loses the race at the
//! store instead of slipping past an application-level check.

use async_trait::async_trait;
use chrono::Utc;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use warden_core::{
    HealthProbe, RawPassword, User, UserStore, UserStoreError, Username,
    hashing::compute_password_hash,
};

// Key prefix to prevent collisions with session records.
const USER_KEY_PREFIX: &str = "user:";

fn user_key(username: &Username) -> String {
    format!("{}{}", USER_KEY_PREFIX, username.as_str())
}

#[derive(Clone)]
pub struct RedisUserStore {
    conn: MultiplexedConnection,
}

impl RedisUserStore {
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl UserStore for RedisUserStore {
    #[tracing::instrument(name = "Retrieving user from Redis", skip_all)]
    async fn get_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserStoreError> {
        let mut conn = self.conn.clone();

        let value: Option<String> = conn
            .get(user_key(username))
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        value
            .map(|json| {
                serde_json::from_str(&json)
                    .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))
            })
            .transpose()
    }

    #[tracing::instrument(name = "Adding user to Redis", skip_all)]
    async fn create(
        &self,
        username: Username,
        password: RawPassword,
    ) -> Result<User, UserStoreError> {
        let password_hash = compute_password_hash(password)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        let user = User::new(username.clone(), password_hash, None, Utc::now());
        let json = serde_json::to_string(&user)
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        let mut conn = self.conn.clone();
        let created: bool = conn
            .set_nx(user_key(&username), json)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        if !created {
            return Err(UserStoreError::UserAlreadyExists);
        }

        Ok(user)
    }
}

#[async_trait]
impl HealthProbe for RedisUserStore {
    async fn ping(&self) -> Result<(), String> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| e.to_string())?;
        Ok(())
    }
}
