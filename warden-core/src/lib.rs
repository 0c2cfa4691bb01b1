pub mod domain;
pub mod hashing;
pub mod policy;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    claims::Claims,
    identity::Identity,
    password::{RawPassword, RawPasswordError},
    user::User,
    username::{Username, UsernameError},
};

pub use policy::{PasswordPolicy, PolicyRule};

pub use ports::{
    repositories::{SessionStore, SessionStoreError, UserStore, UserStoreError},
    services::{HealthProbe, TokenAuthority, TokenError},
};
