//! Signed-in user model for the login gate.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
/// Identifier of a signed-in user.
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user-{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// The user owning the current desktop session.
pub struct User {
    /// Session-unique id.
    pub id: UserId,
    /// Display name entered at the login gate.
    pub username: String,
    /// Sign-in time in unix milliseconds.
    pub created_ms: u64,
}

/// Normalizes a login name, returning `None` when nothing usable remains.
pub fn normalize_username(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
