use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{identity::Identity, username::Username};

/// A persisted identity record.
///
/// `password_hash` is the salted one-way hash, never the raw password. `id`
/// is present for the relational variant only; the key-value variant
/// synthesizes its identity from the username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    username: Username,
    password_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    created_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        username: Username,
        password_hash: String,
        id: Option<i64>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            username,
            password_hash,
            id,
            created_at,
        }
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// The normalized identity: numeric id when the backend provides one,
    /// otherwise the username.
    pub fn identity(&self) -> Identity {
        match self.id {
            Some(id) => Identity::from(id),
            None => Identity::from(&self.username),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: Option<i64>) -> User {
        let username = Username::try_from("alice".to_string()).unwrap();
        User::new(username, "$argon2id$stub".to_string(), id, Utc::now())
    }

    #[test]
    fn relational_identity_is_the_numeric_id() {
        assert_eq!(user(Some(42)).identity().as_str(), "42");
    }

    #[test]
    fn key_value_identity_is_the_username() {
        assert_eq!(user(None).identity().as_str(), "alice");
    }
}
