pub mod env {
    pub const JWT_SECRET_ENV_VAR: &str = "JWT_SECRET";
    pub const DATASTORE_ENV_VAR: &str = "DATASTORE";
    pub const PORT_ENV_VAR: &str = "PORT";
    pub const PG_HOST_ENV_VAR: &str = "PGHOST";
    pub const PG_PORT_ENV_VAR: &str = "PGPORT";
    pub const PG_USER_ENV_VAR: &str = "PGUSER";
    pub const PG_PASSWORD_ENV_VAR: &str = "PGPASSWORD";
    pub const PG_DATABASE_ENV_VAR: &str = "PGDATABASE";
    pub const REDIS_HOST_ENV_VAR: &str = "REDIS_HOST";
    pub const REDIS_PORT_ENV_VAR: &str = "REDIS_PORT";
}

/// Tokens and their sessions share one fixed lifetime.
pub const TOKEN_TTL_SECONDS: i64 = 3600;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PG_HOST: &str = "localhost";
pub const DEFAULT_PG_PORT: u16 = 5432;
pub const DEFAULT_PG_USER: &str = "postgres";
pub const DEFAULT_PG_PASSWORD: &str = "postgres";
pub const DEFAULT_PG_DATABASE: &str = "authdb";
pub const DEFAULT_REDIS_HOST: &str = "localhost";
pub const DEFAULT_REDIS_PORT: u16 = 6379;
