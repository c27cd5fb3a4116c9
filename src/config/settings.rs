use serde::{Deserialize, Serialize};
use std::env;

use crate::config::constants::*;

/// Main configuration container for the application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration settings
    pub server: ServerConfig,
    /// Database configuration settings
    pub database: DatabaseConfig,
    /// Storage backend selection
    pub storage: StorageConfig,
    /// Token signing settings
    pub auth: AuthConfig,
    /// Outbound mail settings
    pub smtp: SmtpConfig,
    /// Logging configuration settings
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            storage: StorageConfig::default(),
            auth: AuthConfig::default(),
            smtp: SmtpConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables or use defaults
    pub fn load() -> Self {
        Self {
            server: ServerConfig::load(),
            database: DatabaseConfig::load(),
            storage: StorageConfig::load(),
            auth: AuthConfig::load(),
            smtp: SmtpConfig::load(),
            logging: LoggingConfig::load(),
        }
    }
}

/// Server configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to listen on
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Number of worker threads
    pub worker_threads: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HTTP_HOST.to_string(),
            port: DEFAULT_HTTP_PORT,
            worker_threads: DEFAULT_WORKER_THREADS,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables or use defaults
    pub fn load() -> Self {
        let host = env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_HTTP_HOST.to_string());
        let port = env::var("SERVER_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_HTTP_PORT);
        let worker_threads = env::var("WORKER_THREADS")
            .ok()
            .and_then(|t| t.parse::<usize>().ok())
            .unwrap_or(DEFAULT_WORKER_THREADS);

        Self {
            host,
            port,
            worker_threads,
        }
    }

    /// Listen address in host:port form
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database user
    pub user: String,
    /// Database password
    pub password: String,
    /// Database name
    pub name: String,
    /// Database host
    pub host: String,
    /// Database port
    pub port: u16,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Connection timeout in seconds
    pub connection_timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            user: DEFAULT_DB_USER.to_string(),
            password: DEFAULT_DB_PASS.to_string(),
            name: DEFAULT_DB_NAME.to_string(),
            host: DEFAULT_DB_HOST.to_string(),
            port: DEFAULT_DB_PORT,
            max_connections: DEFAULT_DB_POOL,
            connection_timeout: DEFAULT_DB_CONN_TIMEOUT_SECS,
        }
    }
}

impl DatabaseConfig {
    /// Load database configuration from environment variables or use defaults
    pub fn load() -> Self {
        let user = env::var("DB_USER").unwrap_or_else(|_| DEFAULT_DB_USER.to_string());
        let password = env::var("DB_PASS").unwrap_or_else(|_| DEFAULT_DB_PASS.to_string());
        let name = env::var("DB_NAME").unwrap_or_else(|_| DEFAULT_DB_NAME.to_string());
        let host = env::var("DB_HOST").unwrap_or_else(|_| DEFAULT_DB_HOST.to_string());
        let port = env::var("DB_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_DB_PORT);
        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|c| c.parse::<u32>().ok())
            .unwrap_or(DEFAULT_DB_POOL);
        let connection_timeout = env::var("DB_CONN_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse::<u64>().ok())
            .unwrap_or(DEFAULT_DB_CONN_TIMEOUT_SECS);

        Self {
            user,
            password,
            name,
            host,
            port,
            max_connections,
            connection_timeout,
        }
    }

    /// Generate database URL from individual components
    pub fn url(&self) -> String {
        format!(
            "mysql://{}:{}@{}:{}/{}",
            self.user, self.password, self.host, self.port, self.name
        )
    }
}

/// Storage backend enumeration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum StorageBackend {
    /// MySQL via sqlx
    Mysql,
    /// In-process store, for tests and local development
    Memory,
}

impl Default for StorageBackend {
    fn default() -> Self {
        StorageBackend::Mysql
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mysql" | "db" | "database" => Ok(StorageBackend::Mysql),
            "memory" | "mem" => Ok(StorageBackend::Memory),
            _ => Err(format!("Invalid storage backend: {}", s)),
        }
    }
}

/// Storage configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend to use
    pub backend: StorageBackend,
    /// Full connection URL, overrides the individual DB_* parts when set
    pub database_url: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Mysql,
            database_url: None,
        }
    }
}

impl StorageConfig {
    /// Load storage configuration from environment variables or use defaults
    pub fn load() -> Self {
        let backend = env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "mysql".to_string())
            .parse()
            .unwrap_or(StorageBackend::Mysql);

        Self {
            backend,
            database_url: env::var("DATABASE_URL").ok(),
        }
    }
}

/// Token signing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret. Login fails with a configuration error when empty.
    pub jwt_secret: String,
    /// Bearer token lifetime in hours
    pub token_expiry_hours: i64,
    /// Issuer claim pinned during verification
    pub token_issuer: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_expiry_hours: DEFAULT_TOKEN_EXPIRY_HOURS,
            token_issuer: TOKEN_ISSUER.to_string(),
        }
    }
}

impl AuthConfig {
    /// Load token settings from environment variables or use defaults
    pub fn load() -> Self {
        let jwt_secret = env::var("JWT_SECRET").unwrap_or_default();
        let token_expiry_hours = env::var("AUTH_TOKEN_EXPIRY_HOURS")
            .ok()
            .and_then(|h| h.parse::<i64>().ok())
            .unwrap_or(DEFAULT_TOKEN_EXPIRY_HOURS);
        let token_issuer = env::var("TOKEN_ISSUER").unwrap_or_else(|_| TOKEN_ISSUER.to_string());

        Self {
            jwt_secret,
            token_expiry_hours,
            token_issuer,
        }
    }
}

/// Outbound mail settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    /// SMTP relay host
    pub host: String,
    /// SMTP relay port
    pub port: u16,
    /// Relay username
    pub username: String,
    /// Relay password
    pub password: String,
    /// From address, falls back to the username
    pub from: Option<String>,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: DEFAULT_SMTP_PORT,
            username: String::new(),
            password: String::new(),
            from: None,
        }
    }
}

impl SmtpConfig {
    /// Load mail settings from environment variables or use defaults
    pub fn load() -> Self {
        let host = env::var("SMTP_HOST").unwrap_or_default();
        let port = env::var("SMTP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_SMTP_PORT);
        let username = env::var("SMTP_USER").unwrap_or_default();
        let password = env::var("SMTP_PASS").unwrap_or_default();
        let from = env::var("SMTP_FROM").ok();

        Self {
            host,
            port,
            username,
            password,
            from,
        }
    }

    /// Sender address used on outgoing verification mail
    pub fn sender(&self) -> &str {
        self.from.as_deref().unwrap_or(&self.username)
    }
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl LoggingConfig {
    /// Load logging configuration from environment variables or use defaults
    pub fn load() -> Self {
        let level = env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());

        Self { level }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_url_is_built_from_parts() {
        let config = DatabaseConfig {
            user: "shop".to_string(),
            password: "pw".to_string(),
            name: "storefront".to_string(),
            host: "db.local".to_string(),
            port: 3307,
            ..DatabaseConfig::default()
        };
        assert_eq!(config.url(), "mysql://shop:pw@db.local:3307/storefront");
    }

    #[test]
    fn storage_backend_parses_aliases() {
        assert_eq!("mysql".parse::<StorageBackend>(), Ok(StorageBackend::Mysql));
        assert_eq!("MEM".parse::<StorageBackend>(), Ok(StorageBackend::Memory));
        assert!("postgres".parse::<StorageBackend>().is_err());
    }

    #[test]
    fn smtp_sender_falls_back_to_username() {
        let mut config = SmtpConfig {
            username: "relay@example.com".to_string(),
            ..SmtpConfig::default()
        };
        assert_eq!(config.sender(), "relay@example.com");
        config.from = Some("noreply@example.com".to_string());
        assert_eq!(config.sender(), "noreply@example.com");
    }
}
