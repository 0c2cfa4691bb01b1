pub mod claims;
pub mod identity;
pub mod password;
pub mod user;
pub mod username;
