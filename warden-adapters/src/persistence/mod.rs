pub mod memory;
pub mod postgres_user_store;
pub mod redis_session_store;
pub mod redis_user_store;
