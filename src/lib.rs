// Re-export core functionality for external use
pub use async_trait::async_trait;
pub use sqlx;

// Core module definitions
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod server;
pub mod services;
pub mod storage;
pub mod utils;
pub mod validation;

// Unified error handling
pub use error::{AuthError, Result};

// Essential re-exports for convenience
pub use server::{app_state::AppState, startup::start_server};

pub use config::settings::{Config, DatabaseConfig, ServerConfig};

pub use storage::{
    init_storage, memory::MemoryStorage, mysql::MySqlStorage, Result as StorageResult, Storage,
    StorageError,
};

pub use models::{Account, InterestItem, InterestPage, Pagination, VerificationRecord};

pub use services::{AccountService, InterestService, Mailer, MemoryMailer, OtpService};

// Version and build information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
