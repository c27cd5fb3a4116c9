pub mod memory;
pub mod mysql;

// MySQL specific modules, split per domain
mod mysql_account;
mod mysql_interest;
mod mysql_verification;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument};

use crate::{
    config::settings::{Config, DatabaseConfig, StorageBackend},
    error::{AuthError, Result as AppResult},
    models::{Account, InterestItem, VerificationRecord},
};

use self::mysql::MySqlStorage;

/// Storage Result type
pub type Result<T> = std::result::Result<T, StorageError>;

/// Error types for storage operations
#[derive(Debug, Error, Clone)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StorageError {
    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            StorageError::Database(_) => "database",
            StorageError::Connection(_) => "connection",
            StorageError::DuplicateEntry(_) => "duplicate",
            StorageError::NotFound(_) => "not_found",
            StorageError::InvalidData(_) => "validation",
            StorageError::Internal(_) => "internal",
        }
    }
}

// Error conversions for better integration
impl From<sqlx::Error> for StorageError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => Self::NotFound("Record not found".to_string()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                Self::DuplicateEntry(db_err.to_string())
            }
            sqlx::Error::Database(db_err) => Self::Database(db_err.to_string()),
            sqlx::Error::Io(io_err) => Self::Connection(io_err.to_string()),
            sqlx::Error::PoolTimedOut => Self::Connection("Connection pool timeout".to_string()),
            sqlx::Error::PoolClosed => Self::Connection("Connection pool closed".to_string()),
            _ => Self::Database(error.to_string()),
        }
    }
}

impl From<StorageError> for AuthError {
    fn from(err: StorageError) -> Self {
        match err {
            // email is the only uniqueness constraint hit at request time;
            // the seeder handles its own duplicates before they get here
            StorageError::DuplicateEntry(_) => AuthError::EmailInUse,
            other => AuthError::Storage(other.to_string()),
        }
    }
}

/// Persistence facade. One production backend (MySQL) and one in-process
/// backend for tests, both injected as `Arc<dyn Storage>`.
#[async_trait]
pub trait Storage: Sync + Send {
    /// Get the storage instance as Any for downcasting
    fn as_any(&self) -> &dyn std::any::Any;

    /// Health check with connection validation
    async fn health_check(&self) -> Result<bool>;

    /// Close all connections gracefully
    async fn close(&self) -> Result<()>;

    // Account related methods
    async fn create_account(&self, account: &Account) -> Result<()>;
    async fn get_account_by_id(&self, id: &str) -> Result<Option<Account>>;
    async fn get_account_by_email(&self, email: &str) -> Result<Option<Account>>;
    /// Flip the activated flag. Returns false when no such account exists.
    async fn set_account_activated(&self, id: &str, activated: bool) -> Result<bool>;

    // Verification record methods
    async fn create_verification(&self, record: &VerificationRecord) -> Result<()>;
    /// Most recently created record for the account, by creation time descending
    async fn latest_verification_for(&self, account_id: &str)
        -> Result<Option<VerificationRecord>>;
    /// Conditional delete by record id. True iff this call removed the row,
    /// so exactly one of N concurrent callers wins.
    async fn delete_verification(&self, record_id: &str) -> Result<bool>;
    /// Delete every record for the account. Idempotent. Returns rows removed.
    async fn purge_verifications(&self, account_id: &str) -> Result<u64>;

    // Interest catalog methods
    async fn count_interests(&self) -> Result<u64>;
    async fn list_interests(&self, offset: u64, limit: u32) -> Result<Vec<InterestItem>>;
    /// Update one item's selected flag, returning the updated item
    async fn set_interest_selected(&self, id: u32, selected: bool)
        -> Result<Option<InterestItem>>;
    /// Insert a catalog item if absent. True iff a row was inserted.
    async fn insert_interest(&self, item: &InterestItem) -> Result<bool>;
}

/// Storage factory
pub struct StorageFactory;

impl StorageFactory {
    /// Create MySQL storage and make sure its schema exists
    #[instrument(skip(config))]
    pub async fn create_mysql_storage(config: &DatabaseConfig) -> AppResult<MySqlStorage> {
        info!("Creating MySQL storage");

        let storage = MySqlStorage::connect(config)
            .await
            .map_err(|e| AuthError::Storage(format!("Failed to create MySQL storage: {}", e)))?;

        storage
            .init_schema()
            .await
            .map_err(|e| AuthError::Storage(format!("Failed to initialize schema: {}", e)))?;

        info!("✅ MySQL storage created successfully");
        Ok(storage)
    }

    /// Create memory storage for testing
    pub fn create_memory_storage() -> memory::MemoryStorage {
        info!("Creating memory storage");
        memory::MemoryStorage::new()
    }
}

/// Build the configured storage backend and verify it is reachable
#[instrument(skip(config))]
pub async fn init_storage(config: &Config) -> AppResult<Arc<dyn Storage>> {
    info!("Initializing storage layer");

    let storage: Arc<dyn Storage> = match config.storage.backend {
        StorageBackend::Memory => Arc::new(StorageFactory::create_memory_storage()),
        StorageBackend::Mysql => {
            let database_config = match &config.storage.database_url {
                Some(database_url) => parse_mysql_url(database_url)?,
                None => config.database.clone(),
            };
            Arc::new(StorageFactory::create_mysql_storage(&database_config).await?)
        }
    };

    storage
        .health_check()
        .await
        .map_err(|e| AuthError::Storage(format!("Storage health check failed: {}", e)))?;

    info!("✅ Storage layer initialized successfully");
    Ok(storage)
}

/// Parse a MySQL URL into DatabaseConfig
pub fn parse_mysql_url(url: &str) -> AppResult<DatabaseConfig> {
    let url =
        url::Url::parse(url).map_err(|e| AuthError::Config(format!("Invalid MySQL URL: {}", e)))?;

    if url.scheme() != "mysql" {
        return Err(AuthError::Config(format!(
            "Unsupported database scheme: {}",
            url.scheme()
        )));
    }

    let host = url
        .host_str()
        .ok_or_else(|| AuthError::Config("Missing host in MySQL URL".to_string()))?
        .to_string();

    let port = url.port().unwrap_or(3306);
    let user = url.username().to_string();
    let password = url.password().unwrap_or("").to_string();
    let name = url.path().trim_start_matches('/').to_string();

    if name.is_empty() {
        return Err(AuthError::Config(
            "Missing database name in MySQL URL".to_string(),
        ));
    }

    Ok(DatabaseConfig {
        host,
        port,
        user,
        password,
        name,
        ..DatabaseConfig::default()
    })
}
