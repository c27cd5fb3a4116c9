use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::error::{AuthError, Result};
use crate::models::VerificationRecord;
use crate::storage::Storage;
use crate::utils::crypto::{generate_otp_code, hash_secret, verify_secret};

/// Owns the lifecycle of one-time verification codes: issue, lookup,
/// expiry checking and single-use consumption.
#[derive(Clone)]
pub struct OtpService {
    storage: Arc<dyn Storage>,
}

impl OtpService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Generate a fresh 6-digit code for the account and persist its hash.
    ///
    /// Returns the plaintext code for delivery alongside the stored record.
    /// Repeated calls stack records; only the newest one is authoritative.
    pub async fn issue(&self, account_id: &str) -> Result<(String, VerificationRecord)> {
        let code = generate_otp_code();
        let code_hash = hash_secret(&code)?;
        let record = VerificationRecord::new(account_id, &code_hash);

        self.storage.create_verification(&record).await?;
        debug!(
            "Issued verification record {} for account {}",
            record.id, account_id
        );

        Ok((code, record))
    }

    /// Most recently created record for the account, if any
    pub async fn latest_for(&self, account_id: &str) -> Result<Option<VerificationRecord>> {
        Ok(self.storage.latest_verification_for(account_id).await?)
    }

    /// Check a submitted code against the newest record for the account.
    ///
    /// An expired record is deleted on sight. A wrong code leaves the
    /// record in place so the caller can retry before the window closes.
    pub async fn validate(&self, account_id: &str, code: &str) -> Result<VerificationRecord> {
        let record = self
            .storage
            .latest_verification_for(account_id)
            .await?
            .ok_or(AuthError::NoRecordFound)?;

        if record.is_expired_at(Utc::now()) {
            self.storage.delete_verification(&record.id).await?;
            debug!(
                "Removed expired verification record {} for account {}",
                record.id, account_id
            );
            return Err(AuthError::OtpExpired);
        }

        if !verify_secret(code, &record.code_hash)? {
            return Err(AuthError::InvalidOtp);
        }

        Ok(record)
    }

    /// Consume a validated record. The conditional delete underneath makes
    /// this atomic: exactly one concurrent caller sees `true`.
    pub async fn consume(&self, record_id: &str) -> Result<bool> {
        Ok(self.storage.delete_verification(record_id).await?)
    }

    /// Drop every record belonging to the account, returning how many went
    pub async fn purge_all(&self, account_id: &str) -> Result<u64> {
        Ok(self.storage.purge_verifications(account_id).await?)
    }
}
