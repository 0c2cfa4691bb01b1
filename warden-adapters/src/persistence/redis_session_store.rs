//! Redis-backed session store. TTL enforcement is the store's own `SET EX`
//! expiry; nothing sweeps sessions from our side.

use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use warden_core::{Identity, SessionStore, SessionStoreError};

// Key prefix to prevent collisions with user records.
const SESSION_KEY_PREFIX: &str = "session:";

fn session_key(identity: &Identity) -> String {
    format!("{}{}", SESSION_KEY_PREFIX, identity.as_str())
}

#[derive(Clone)]
pub struct RedisSessionStore {
    conn: MultiplexedConnection,
}

impl RedisSessionStore {
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    #[tracing::instrument(name = "Writing session to Redis", skip(self, token))]
    async fn set(
        &self,
        identity: &Identity,
        token: &str,
        ttl_seconds: u64,
    ) -> Result<(), SessionStoreError> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(session_key(identity), token, ttl_seconds)
            .await
            .map_err(|e| SessionStoreError::Unavailable(e.to_string()))?;
        Ok(())
    }

    #[tracing::instrument(name = "Reading session from Redis", skip(self))]
    async fn get(&self, identity: &Identity) -> Result<Option<String>, SessionStoreError> {
        let mut conn = self.conn.clone();
        conn.get(session_key(identity))
            .await
            .map_err(|e| SessionStoreError::Unavailable(e.to_string()))
    }

    #[tracing::instrument(name = "Deleting session from Redis", skip(self))]
    async fn delete(&self, identity: &Identity) -> Result<(), SessionStoreError> {
        let mut conn = self.conn.clone();
        let _: () = conn
            .del(session_key(identity))
            .await
            .map_err(|e| SessionStoreError::Unavailable(e.to_string()))?;
        Ok(())
    }
}
