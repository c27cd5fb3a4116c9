use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User account. Created in the non-activated state by signup and flipped to
/// activated exactly once, by a successful verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique ID
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address, unique, stored trimmed and lowercased
    pub email: String,
    /// Password hash, plaintext is never stored
    pub password_hash: String,
    /// Email verification state
    pub activated: bool,
    /// Account creation time
    pub created_at: DateTime<Utc>,
    /// Update time
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Create a new pending account
    pub fn new(name: &str, email: &str, password_hash: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            activated: false,
            created_at: now,
            updated_at: now,
        }
    }
}
