use crate::models::verification::VerificationRecord;
use crate::storage::mysql::MySqlStorage;
use crate::storage::{Result, StorageError};
use crate::utils::time::{datetime_to_millis, millis_to_datetime};

type VerificationRow = (String, String, String, i64, i64);

fn record_from_row(row: VerificationRow) -> VerificationRecord {
    let (id, account_id, code_hash, created_at, expires_at) = row;
    VerificationRecord {
        id,
        account_id,
        code_hash,
        created_at: millis_to_datetime(created_at),
        expires_at: millis_to_datetime(expires_at),
    }
}

/// MySQL verification record operations
pub trait MySqlVerificationExt {
    /// Insert a verification record
    async fn create_verification(&self, record: &VerificationRecord) -> Result<()>;

    /// Most recently created record for an account
    async fn latest_verification_for(
        &self,
        account_id: &str,
    ) -> Result<Option<VerificationRecord>>;

    /// Conditional delete by record id, true iff a row was removed
    async fn delete_verification(&self, record_id: &str) -> Result<bool>;

    /// Remove all records for an account, returning how many went away
    async fn purge_verifications(&self, account_id: &str) -> Result<u64>;
}

impl MySqlVerificationExt for MySqlStorage {
    async fn create_verification(&self, record: &VerificationRecord) -> Result<()> {
        sqlx::query(
            r#"INSERT INTO verifications (
                id, account_id, code_hash, created_at, expires_at
              ) VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(&record.id)
        .bind(&record.account_id)
        .bind(&record.code_hash)
        .bind(datetime_to_millis(&record.created_at))
        .bind(datetime_to_millis(&record.expires_at))
        .execute(self.pool())
        .await
        .map_err(|e| StorageError::Database(format!("Failed to insert verification: {}", e)))?;

        Ok(())
    }

    async fn latest_verification_for(
        &self,
        account_id: &str,
    ) -> Result<Option<VerificationRecord>> {
        let row: Option<VerificationRow> = sqlx::query_as(
            r#"SELECT id, account_id, code_hash, created_at, expires_at
               FROM verifications
               WHERE account_id = ?
               ORDER BY created_at DESC
               LIMIT 1"#,
        )
        .bind(account_id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| StorageError::Database(format!("Failed to query verification: {}", e)))?;

        Ok(row.map(record_from_row))
    }

    async fn delete_verification(&self, record_id: &str) -> Result<bool> {
        let result = sqlx::query(r#"DELETE FROM verifications WHERE id = ?"#)
            .bind(record_id)
            .execute(self.pool())
            .await
            .map_err(|e| StorageError::Database(format!("Failed to delete verification: {}", e)))?;

        // at most one row matches the primary key; exactly one concurrent
        // caller observes rows_affected == 1
        Ok(result.rows_affected() == 1)
    }

    async fn purge_verifications(&self, account_id: &str) -> Result<u64> {
        let result = sqlx::query(r#"DELETE FROM verifications WHERE account_id = ?"#)
            .bind(account_id)
            .execute(self.pool())
            .await
            .map_err(|e| StorageError::Database(format!("Failed to purge verifications: {}", e)))?;

        Ok(result.rows_affected())
    }
}
