use async_trait::async_trait;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::time::Duration;
use tracing::info;

use crate::config::settings::DatabaseConfig;
use crate::models::account::Account;
use crate::models::interest::InterestItem;
use crate::models::verification::VerificationRecord;
use crate::storage::{Result, Storage, StorageError};

use crate::storage::mysql_account::MySqlAccountExt;
use crate::storage::mysql_interest::MySqlInterestExt;
use crate::storage::mysql_verification::MySqlVerificationExt;

/// MySQL storage implementation
pub struct MySqlStorage {
    pool: MySqlPool,
}

impl MySqlStorage {
    /// Connect a pool using the given configuration
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(&config.url())
            .await
            .map_err(|e| StorageError::Connection(format!("Failed to connect: {}", e)))?;

        Ok(Self { pool })
    }

    /// Build storage around an existing pool
    pub fn with_pool(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Pool getter for the per-domain extension traits
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Check database connection
    pub async fn check_connection(&self) -> Result<()> {
        let result: Option<i64> = sqlx::query_scalar("SELECT 1")
            .fetch_optional(self.pool())
            .await
            .map_err(|e| StorageError::Database(format!("Failed to execute test query: {}", e)))?;

        if result != Some(1) {
            return Err(StorageError::Database(
                "Database connection check failed".to_string(),
            ));
        }

        Ok(())
    }

    /// Initialize database schema
    pub async fn init_schema(&self) -> Result<()> {
        info!("🔄 Initializing database schema...");

        let create_accounts_table = r"
        CREATE TABLE IF NOT EXISTS accounts (
            id VARCHAR(36) NOT NULL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL,
            password_hash VARCHAR(255) NOT NULL,
            activated BOOLEAN NOT NULL DEFAULT FALSE,
            created_at BIGINT NOT NULL,
            updated_at BIGINT NOT NULL,
            UNIQUE KEY uniq_accounts_email (email)
        )";

        sqlx::query(create_accounts_table)
            .execute(self.pool())
            .await
            .map_err(|e| StorageError::Database(format!("Failed to create accounts table: {}", e)))?;

        info!("✅ accounts table ready");

        let create_verifications_table = r"
        CREATE TABLE IF NOT EXISTS verifications (
            id VARCHAR(36) NOT NULL PRIMARY KEY,
            account_id VARCHAR(36) NOT NULL,
            code_hash VARCHAR(255) NOT NULL,
            created_at BIGINT NOT NULL,
            expires_at BIGINT NOT NULL,
            INDEX idx_verifications_account (account_id)
        )";

        sqlx::query(create_verifications_table)
            .execute(self.pool())
            .await
            .map_err(|e| {
                StorageError::Database(format!("Failed to create verifications table: {}", e))
            })?;

        info!("✅ verifications table ready");

        let create_interests_table = r"
        CREATE TABLE IF NOT EXISTS interests (
            id INT UNSIGNED NOT NULL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            selected BOOLEAN NOT NULL DEFAULT FALSE
        )";

        sqlx::query(create_interests_table)
            .execute(self.pool())
            .await
            .map_err(|e| {
                StorageError::Database(format!("Failed to create interests table: {}", e))
            })?;

        info!("✅ interests table ready");

        Ok(())
    }
}

#[async_trait]
impl Storage for MySqlStorage {
    /// Get the storage instance as Any for downcasting
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    async fn health_check(&self) -> Result<bool> {
        self.check_connection().await?;
        Ok(true)
    }

    async fn close(&self) -> Result<()> {
        self.pool.close().await;
        Ok(())
    }

    async fn create_account(&self, account: &Account) -> Result<()> {
        MySqlAccountExt::create_account(self, account).await
    }

    async fn get_account_by_id(&self, id: &str) -> Result<Option<Account>> {
        MySqlAccountExt::get_account_by_id(self, id).await
    }

    async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        MySqlAccountExt::get_account_by_email(self, email).await
    }

    async fn set_account_activated(&self, id: &str, activated: bool) -> Result<bool> {
        MySqlAccountExt::set_account_activated(self, id, activated).await
    }

    async fn create_verification(&self, record: &VerificationRecord) -> Result<()> {
        MySqlVerificationExt::create_verification(self, record).await
    }

    async fn latest_verification_for(
        &self,
        account_id: &str,
    ) -> Result<Option<VerificationRecord>> {
        MySqlVerificationExt::latest_verification_for(self, account_id).await
    }

    async fn delete_verification(&self, record_id: &str) -> Result<bool> {
        MySqlVerificationExt::delete_verification(self, record_id).await
    }

    async fn purge_verifications(&self, account_id: &str) -> Result<u64> {
        MySqlVerificationExt::purge_verifications(self, account_id).await
    }

    async fn count_interests(&self) -> Result<u64> {
        MySqlInterestExt::count_interests(self).await
    }

    async fn list_interests(&self, offset: u64, limit: u32) -> Result<Vec<InterestItem>> {
        MySqlInterestExt::list_interests(self, offset, limit).await
    }

    async fn set_interest_selected(&self, id: u32, selected: bool) -> Result<Option<InterestItem>> {
        MySqlInterestExt::set_interest_selected(self, id, selected).await
    }

    async fn insert_interest(&self, item: &InterestItem) -> Result<bool> {
        MySqlInterestExt::insert_interest(self, item).await
    }
}
