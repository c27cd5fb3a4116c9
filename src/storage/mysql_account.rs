use crate::models::account::Account;
use crate::storage::mysql::MySqlStorage;
use crate::storage::{Result, StorageError};
use crate::utils::time::{datetime_to_millis, millis_to_datetime};

type AccountRow = (String, String, String, String, bool, i64, i64);

fn account_from_row(row: AccountRow) -> Account {
    let (id, name, email, password_hash, activated, created_at, updated_at) = row;
    Account {
        id,
        name,
        email,
        password_hash,
        activated,
        created_at: millis_to_datetime(created_at),
        updated_at: millis_to_datetime(updated_at),
    }
}

/// MySQL account operations
pub trait MySqlAccountExt {
    /// Insert a new account
    async fn create_account(&self, account: &Account) -> Result<()>;

    /// Look up an account by id
    async fn get_account_by_id(&self, id: &str) -> Result<Option<Account>>;

    /// Look up an account by email
    async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>>;

    /// Flip the activated flag, false when the account does not exist
    async fn set_account_activated(&self, id: &str, activated: bool) -> Result<bool>;
}

impl MySqlAccountExt for MySqlStorage {
    async fn create_account(&self, account: &Account) -> Result<()> {
        sqlx::query(
            r#"INSERT INTO accounts (
                id, name, email, password_hash, activated, created_at, updated_at
              ) VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&account.id)
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.password_hash)
        .bind(account.activated)
        .bind(datetime_to_millis(&account.created_at))
        .bind(datetime_to_millis(&account.updated_at))
        .execute(self.pool())
        .await
        .map_err(|e| match StorageError::from(e) {
            // keep the duplicate-key signal so a racing signup maps to the
            // right conflict error upstream
            dup @ StorageError::DuplicateEntry(_) => dup,
            other => StorageError::Database(format!("Failed to insert account: {}", other)),
        })?;

        Ok(())
    }

    async fn get_account_by_id(&self, id: &str) -> Result<Option<Account>> {
        let row: Option<AccountRow> = sqlx::query_as(
            r#"SELECT id, name, email, password_hash, activated, created_at, updated_at
               FROM accounts
               WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| StorageError::Database(format!("Failed to query account by id: {}", e)))?;

        Ok(row.map(account_from_row))
    }

    async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        let row: Option<AccountRow> = sqlx::query_as(
            r#"SELECT id, name, email, password_hash, activated, created_at, updated_at
               FROM accounts
               WHERE email = ?"#,
        )
        .bind(email)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| StorageError::Database(format!("Failed to query account by email: {}", e)))?;

        Ok(row.map(account_from_row))
    }

    async fn set_account_activated(&self, id: &str, activated: bool) -> Result<bool> {
        let result = sqlx::query(
            r#"UPDATE accounts SET activated = ?, updated_at = ? WHERE id = ?"#,
        )
        .bind(activated)
        .bind(datetime_to_millis(&chrono::Utc::now()))
        .bind(id)
        .execute(self.pool())
        .await
        .map_err(|e| StorageError::Database(format!("Failed to update account: {}", e)))?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }

        // UPDATE reports only changed rows, so distinguish "no such account"
        // from "flag already had that value"
        let exists: Option<i64> = sqlx::query_scalar(r#"SELECT 1 FROM accounts WHERE id = ?"#)
            .bind(id)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| StorageError::Database(format!("Failed to query account by id: {}", e)))?;

        Ok(exists.is_some())
    }
}
