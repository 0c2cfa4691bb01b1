use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RawPasswordError {
    #[error("Password is required")]
    Empty,
}

/// A raw, not-yet-hashed password as submitted by a client.
///
/// Wrapped in [`Secret`] so it never appears in debug output or logs. Only
/// the shape check (non-empty) lives here; complexity rules are the
/// [`PasswordPolicy`](crate::policy::PasswordPolicy)'s concern.
#[derive(Clone)]
pub struct RawPassword(Secret<String>);

impl RawPassword {
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl TryFrom<Secret<String>> for RawPassword {
    type Error = RawPasswordError;

    fn try_from(value: Secret<String>) -> Result<Self, Self::Error> {
        if value.expose_secret().trim().is_empty() {
            return Err(RawPasswordError::Empty);
        }
        Ok(RawPassword(value))
    }
}
