use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum UsernameError {
    #[error("Username is required")]
    Empty,
}

/// A validated username. Case-sensitive, immutable, never empty.
///
/// Surrounding whitespace is trimmed before validation, matching the shape
/// checks applied at the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = UsernameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(UsernameError::Empty);
        }
        Ok(Username(trimmed.to_owned()))
    }
}

impl From<Username> for String {
    fn from(username: Username) -> Self {
        username.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_and_trims_valid_usernames() {
        let username = Username::try_from("  alice  ".to_string()).unwrap();
        assert_eq!(username.as_str(), "alice");
    }

    #[test]
    fn rejects_empty_and_whitespace_only() {
        assert_eq!(
            Username::try_from(String::new()),
            Err(UsernameError::Empty)
        );
        assert_eq!(
            Username::try_from("   ".to_string()),
            Err(UsernameError::Empty)
        );
    }

    #[test]
    fn usernames_are_case_sensitive() {
        let lower = Username::try_from("alice".to_string()).unwrap();
        let upper = Username::try_from("Alice".to_string()).unwrap();
        assert_ne!(lower, upper);
    }
}
