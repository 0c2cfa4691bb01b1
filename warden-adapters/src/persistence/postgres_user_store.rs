//! Relational user store.
//!
//! Uniqueness is guaranteed by the UNIQUE constraint on `users.username`;
//! a violating insert maps to `UserAlreadyExists` instead of being guarded
//! by a racy pre-check.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use warden_core::{
    HealthProbe, RawPassword, User, UserStore, UserStoreError, Username,
    hashing::compute_password_hash,
};

pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserStoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let username = Username::try_from(row.username)
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;
        Ok(User::new(
            username,
            row.password_hash,
            Some(row.id),
            row.created_at,
        ))
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip_all)]
    async fn get_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserStoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT id, username, password_hash, created_at
                FROM users
                WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        row.map(User::try_from).transpose()
    }

    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn create(
        &self,
        username: Username,
        password: RawPassword,
    ) -> Result<User, UserStoreError> {
        let password_hash = compute_password_hash(password)
            .await
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
                INSERT INTO users (username, password_hash)
                VALUES ($1, $2)
                RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(username.as_str())
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.constraint().is_some() {
                    return UserStoreError::UserAlreadyExists;
                }
            }
            UserStoreError::UnexpectedError(e.to_string())
        })?;

        User::try_from(row)
    }
}

#[async_trait]
impl HealthProbe for PostgresUserStore {
    async fn ping(&self) -> Result<(), String> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}
