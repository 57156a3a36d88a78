//! Local user identifiers

use std::fmt;

use serde::{Deserialize, Serialize};

use super::store::StoreError;

/// Locally issued user id, safe to embed in storage keys
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Accepts non-empty ids made of ASCII letters, digits, `-` and `_`
    pub fn new(id: impl Into<String>) -> Result<Self, StoreError> {
        let id = id.into();
        let valid = !id.is_empty()
            && id.len() <= 64
            && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid {
            Ok(Self(id))
        } else {
            Err(StoreError::InvalidUserId(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Storage key for one of this user's records, e.g. `user_42_profile`
    pub fn key(&self, record: &str) -> String {
        format!("user_{}_{}", self.0, record)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UserId {
    type Error = StoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}
