use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::constants::OTP_TTL_MINUTES;

/// Persisted form of an issued verification code. Only the hash is stored;
/// the plaintext code exists just long enough to be mailed out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationRecord {
    /// Record unique identifier
    pub id: String,

    /// Owning account id
    pub account_id: String,

    /// One-way hash of the 6-digit code
    pub code_hash: String,

    /// When the record was created
    pub created_at: DateTime<Utc>,

    /// When the code stops being valid
    pub expires_at: DateTime<Utc>,
}

impl VerificationRecord {
    /// Create a record with the standard 10-minute validity window
    pub fn new(account_id: &str, code_hash: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            account_id: account_id.to_string(),
            code_hash: code_hash.to_string(),
            created_at: now,
            expires_at: now + Duration::minutes(OTP_TTL_MINUTES),
        }
    }

    /// Whether the record is past its validity window at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
