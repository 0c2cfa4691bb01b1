//! The register/login/logout state machine.
//!
//! Stateless per request; the state that matters is the session record.
//! Stores, token authority, and session TTL are injected once at startup.

use std::sync::Arc;

use warden_core::{
    Claims, PasswordPolicy, PolicyRule, RawPassword, SessionStore, SessionStoreError,
    TokenAuthority, TokenError, UserStore, UserStoreError, Username,
    hashing::{self, FALLBACK_PASSWORD_HASH, HashingError},
};

/// Errors from the register operation
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("Password does not meet complexity requirements.")]
    WeakPassword(Vec<PolicyRule>),
    #[error("Username already exists.")]
    UsernameTaken,
    #[error("User store error: {0}")]
    UserStore(UserStoreError),
}

/// Errors from the login operation
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Authentication failed.")]
    AuthenticationFailed,
    #[error("User store error: {0}")]
    UserStore(#[from] UserStoreError),
    #[error("Session store error: {0}")]
    SessionStore(#[from] SessionStoreError),
    #[error("Token error: {0}")]
    Token(#[from] TokenError),
    #[error("Hashing error: {0}")]
    Hashing(#[from] HashingError),
}

/// Errors from the logout operation
#[derive(Debug, thiserror::Error)]
pub enum LogoutError {
    #[error("Session store error: {0}")]
    SessionStore(#[from] SessionStoreError),
}

pub struct AuthService {
    user_store: Arc<dyn UserStore>,
    session_store: Arc<dyn SessionStore>,
    tokens: Arc<dyn TokenAuthority>,
    policy: PasswordPolicy,
    session_ttl_seconds: u64,
}

impl AuthService {
    pub fn new(
        user_store: Arc<dyn UserStore>,
        session_store: Arc<dyn SessionStore>,
        tokens: Arc<dyn TokenAuthority>,
        session_ttl_seconds: u64,
    ) -> Self {
        Self {
            user_store,
            session_store,
            tokens,
            policy: PasswordPolicy,
            session_ttl_seconds,
        }
    }

    /// Register a new user. No token is issued.
    ///
    /// Uniqueness is enforced by the store itself, so concurrent
    /// registrations of the same username resolve to exactly one user.
    #[tracing::instrument(name = "AuthService::register", skip(self, password))]
    pub async fn register(
        &self,
        username: Username,
        password: RawPassword,
    ) -> Result<(), RegisterError> {
        let violations = self.policy.validate(&password);
        if !violations.is_empty() {
            tracing::warn!(
                username = %username,
                ?violations,
                "Password complexity validation failed"
            );
            return Err(RegisterError::WeakPassword(violations));
        }

        match self.user_store.create(username.clone(), password).await {
            Ok(_) => {
                tracing::info!(username = %username, "User registered successfully");
                Ok(())
            }
            Err(UserStoreError::UserAlreadyExists) => {
                tracing::warn!(username = %username, "Attempt to register an existing username");
                Err(RegisterError::UsernameTaken)
            }
            Err(e) => Err(RegisterError::UserStore(e)),
        }
    }

    /// Authenticate a user and issue a bearer token.
    ///
    /// Writes the session record last-writer-wins: a second login silently
    /// invalidates the token from the first. Unknown usernames and wrong
    /// passwords are indistinguishable in the result; the not-found path
    /// burns a verification against a fallback hash so it is not a cheaper
    /// timing oracle.
    #[tracing::instrument(name = "AuthService::login", skip(self, password))]
    pub async fn login(
        &self,
        username: Username,
        password: RawPassword,
    ) -> Result<(String, Claims), LoginError> {
        let user = match self.user_store.get_by_username(&username).await? {
            Some(user) => user,
            None => {
                let _ = hashing::verify_password_hash(FALLBACK_PASSWORD_HASH.clone(), password)
                    .await;
                tracing::warn!(username = %username, "Login attempt for non-existent username");
                return Err(LoginError::AuthenticationFailed);
            }
        };

        let valid =
            hashing::verify_password_hash(user.password_hash().to_owned(), password).await?;
        if !valid {
            tracing::warn!(username = %username, "Invalid password attempt");
            return Err(LoginError::AuthenticationFailed);
        }

        let (token, claims) = self.tokens.issue(&user)?;

        self.session_store
            .set(&claims.sub, &token, self.session_ttl_seconds)
            .await?;

        tracing::info!(username = %username, "User logged in successfully");
        Ok((token, claims))
    }

    /// Revoke the session behind an already-verified token. Idempotent:
    /// deleting a session that does not exist succeeds.
    #[tracing::instrument(name = "AuthService::logout", skip(self))]
    pub async fn logout(&self, claims: &Claims) -> Result<(), LogoutError> {
        self.session_store.delete(&claims.sub).await?;
        tracing::info!(username = %claims.username, "User logged out successfully");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::Utc;
    use secrecy::Secret;
    use tokio::sync::RwLock;
    use warden_core::{Identity, User, hashing::compute_password_hash};

    use super::*;

    #[derive(Default)]
    struct MockUserStore {
        users: RwLock<HashMap<Username, User>>,
    }

    #[async_trait::async_trait]
    impl UserStore for MockUserStore {
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
            let hash = compute_password_hash(password)
                .await
                .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;
            let user = User::new(username.clone(), hash, None, Utc::now());

            let mut users = self.users.write().await;
            if users.contains_key(&username) {
                return Err(UserStoreError::UserAlreadyExists);
            }
            users.insert(username, user.clone());
            Ok(user)
        }
    }

    #[derive(Default)]
    struct MockSessionStore {
        sessions: RwLock<HashMap<Identity, String>>,
    }

    #[async_trait::async_trait]
    impl SessionStore for MockSessionStore {
        async fn set(
            &self,
            identity: &Identity,
            token: &str,
            _ttl_seconds: u64,
        ) -> Result<(), SessionStoreError> {
            self.sessions
                .write()
                .await
                .insert(identity.clone(), token.to_owned());
            Ok(())
        }

        async fn get(&self, identity: &Identity) -> Result<Option<String>, SessionStoreError> {
            Ok(self.sessions.read().await.get(identity).cloned())
        }

        async fn delete(&self, identity: &Identity) -> Result<(), SessionStoreError> {
            self.sessions.write().await.remove(identity);
            Ok(())
        }
    }

    /// Token authority whose "signature" is just the serialized claims.
    struct PlainTokenAuthority;

    impl TokenAuthority for PlainTokenAuthority {
        fn issue(&self, user: &User) -> Result<(String, Claims), TokenError> {
            let claims = Claims::for_user(user, Utc::now().timestamp(), 3600);
            let token = serde_json::to_string(&claims)
                .map_err(|e| TokenError::Issuance(e.to_string()))?;
            Ok((token, claims))
        }

        fn verify(&self, token: &str) -> Result<Claims, TokenError> {
            serde_json::from_str(token).map_err(|e| TokenError::InvalidSignature(e.to_string()))
        }
    }

    fn service() -> (AuthService, Arc<MockSessionStore>) {
        let sessions = Arc::new(MockSessionStore::default());
        let service = AuthService::new(
            Arc::new(MockUserStore::default()),
            sessions.clone(),
            Arc::new(PlainTokenAuthority),
            3600,
        );
        (service, sessions)
    }

    fn username(name: &str) -> Username {
        Username::try_from(name.to_string()).unwrap()
    }

    fn password(raw: &str) -> RawPassword {
        RawPassword::try_from(Secret::from(raw.to_string())).unwrap()
    }

    #[tokio::test]
    async fn register_then_login_issues_a_token() {
        let (service, sessions) = service();

        service
            .register(username("alice"), password("Passw0rd1"))
            .await
            .unwrap();

        let (token, claims) = service
            .login(username("alice"), password("Passw0rd1"))
            .await
            .unwrap();

        assert_eq!(claims.username, "alice");
        assert_eq!(sessions.get(&claims.sub).await.unwrap(), Some(token));
    }

    #[tokio::test]
    async fn register_rejects_weak_passwords_with_all_violations() {
        let (service, _) = service();

        let err = service
            .register(username("alice"), password("short"))
            .await
            .unwrap_err();

        match err {
            RegisterError::WeakPassword(rules) => {
                assert!(rules.contains(&PolicyRule::MinLength));
                assert!(rules.contains(&PolicyRule::Uppercase));
                assert!(rules.contains(&PolicyRule::Digit));
            }
            other => panic!("expected WeakPassword, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn duplicate_registration_is_username_taken() {
        let (service, _) = service();

        service
            .register(username("alice"), password("Passw0rd1"))
            .await
            .unwrap();

        let err = service
            .register(username("alice"), password("Other1234"))
            .await
            .unwrap_err();
        assert!(matches!(err, RegisterError::UsernameTaken));
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_fail_identically() {
        let (service, sessions) = service();

        service
            .register(username("alice"), password("Passw0rd1"))
            .await
            .unwrap();

        let wrong = service
            .login(username("alice"), password("Wrong1234"))
            .await
            .unwrap_err();
        let unknown = service
            .login(username("nobody"), password("Passw0rd1"))
            .await
            .unwrap_err();

        assert!(matches!(wrong, LoginError::AuthenticationFailed));
        assert!(matches!(unknown, LoginError::AuthenticationFailed));
        assert!(sessions.sessions.read().await.is_empty());
    }

    #[tokio::test]
    async fn second_login_overwrites_the_first_session() {
        let (service, sessions) = service();

        service
            .register(username("alice"), password("Passw0rd1"))
            .await
            .unwrap();

        let (first, claims) = service
            .login(username("alice"), password("Passw0rd1"))
            .await
            .unwrap();
        let (second, _) = service
            .login(username("alice"), password("Passw0rd1"))
            .await
            .unwrap();

        let stored = sessions.get(&claims.sub).await.unwrap();
        assert_eq!(stored.as_deref(), Some(second.as_str()));
        assert_ne!(stored.as_deref(), Some(first.as_str()));
    }

    #[tokio::test]
    async fn logout_deletes_the_session_and_is_idempotent() {
        let (service, sessions) = service();

        service
            .register(username("alice"), password("Passw0rd1"))
            .await
            .unwrap();
        let (_, claims) = service
            .login(username("alice"), password("Passw0rd1"))
            .await
            .unwrap();

        service.logout(&claims).await.unwrap();
        assert_eq!(sessions.get(&claims.sub).await.unwrap(), None);

        // A second logout for the same identity still succeeds.
        service.logout(&claims).await.unwrap();
    }
}
