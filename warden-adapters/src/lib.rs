pub mod auth;
pub mod config;
pub mod http;
pub mod persistence;

pub use auth::jwt::{JwtConfig, JwtTokenAuthority};
pub use config::{DataStore, Settings, SettingsError};
pub use http::{AppState, router};
pub use persistence::{
    memory::{MemorySessionStore, MemoryUserStore},
    postgres_user_store::PostgresUserStore,
    redis_session_store::RedisSessionStore,
    redis_user_store::RedisUserStore,
};
