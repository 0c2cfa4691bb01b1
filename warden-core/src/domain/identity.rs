use std::fmt;

use serde::{Deserialize, Serialize};

use super::username::Username;

/// Normalized user identity shared by both store variants.
///
/// The relational store renders its numeric row id, the key-value store uses
/// the username itself. Session keys and token `sub` claims are derived from
/// this type so neither side needs to know which backend is active.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<i64> for Identity {
    fn from(id: i64) -> Self {
        Identity(id.to_string())
    }
}

impl From<&Username> for Identity {
    fn from(username: &Username) -> Self {
        Identity(username.as_str().to_owned())
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
