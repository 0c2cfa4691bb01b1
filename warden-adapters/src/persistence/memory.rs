//! In-process stores for tests and local development. Same contracts as the
//! real backends: conditional insert on the user store, passive TTL expiry
//! on the session store.

use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use warden_core::{
    HealthProbe, Identity, RawPassword, SessionStore, SessionStoreError, User, UserStore,
    UserStoreError, Username, hashing::compute_password_hash,
};

#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Username, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserStoreError> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn create(
        &self,
        username: Username,
        password: RawPassword,
    ) -> Result<User, UserStoreError> {
        let password_hash = compute_password_hash(password)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;
        let user = User::new(username.clone(), password_hash, None, Utc::now());

        // Insert-if-absent under one write lock, like the key-value store's
        // SET NX.
        let mut users = self.users.write().await;
        if users.contains_key(&username) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        users.insert(username, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl HealthProbe for MemoryUserStore {
    async fn ping(&self) -> Result<(), String> {
        Ok(())
    }
}

struct SessionRecord {
    token: String,
    expires_at: Instant,
}

#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<Identity, SessionRecord>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn set(
        &self,
        identity: &Identity,
        token: &str,
        ttl_seconds: u64,
    ) -> Result<(), SessionStoreError> {
        let record = SessionRecord {
            token: token.to_owned(),
            expires_at: Instant::now() + Duration::from_secs(ttl_seconds),
        };
        self.sessions.write().await.insert(identity.clone(), record);
        Ok(())
    }

    async fn get(&self, identity: &Identity) -> Result<Option<String>, SessionStoreError> {
        let sessions = self.sessions.read().await;
        Ok(sessions
            .get(identity)
            .filter(|record| record.expires_at > Instant::now())
            .map(|record| record.token.clone()))
    }

    async fn delete(&self, identity: &Identity) -> Result<(), SessionStoreError> {
        self.sessions.write().await.remove(identity);
        Ok(())
    }
}
