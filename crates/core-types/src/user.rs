use serde::{Deserialize, Serialize};

/// A single row of the leaderboard.
///
/// The email is the natural key of a user. Uniqueness is enforced by the
/// store, not by this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Display name shown on the leaderboard.
    pub name: String,
    pub email: String,
    pub high_score: i64,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>, high_score: i64) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            high_score,
        }
    }
}
