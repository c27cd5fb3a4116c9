use std::sync::Arc;

use tracing::info;

use crate::config::settings::Config;
use crate::error::Result;
use crate::services::{AccountService, InterestService, Mailer, SmtpMailer};
use crate::storage::{init_storage, Storage};

/// Application state shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Config,
    /// Storage backing accounts, verification records and interests
    pub storage: Arc<dyn Storage>,
    /// Signup, activation and login workflow
    pub accounts: AccountService,
    /// Interests catalogue reads and selection updates
    pub interests: InterestService,
}

impl AppState {
    /// Build state from configuration: the configured storage backend
    /// plus SMTP delivery for verification mail
    pub async fn new(config: &Config) -> Result<Self> {
        let storage = init_storage(config).await?;
        let mailer: Arc<dyn Mailer> = Arc::new(SmtpMailer::from_config(&config.smtp)?);

        info!("✅ Application state initialized");
        Ok(Self::assemble(config.clone(), storage, mailer))
    }

    /// Build state over explicit collaborators, for tests and embedding
    pub fn with_collaborators(
        config: Config,
        storage: Arc<dyn Storage>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self::assemble(config, storage, mailer)
    }

    fn assemble(config: Config, storage: Arc<dyn Storage>, mailer: Arc<dyn Mailer>) -> Self {
        let accounts = AccountService::new(Arc::clone(&storage), mailer, config.auth.clone());
        let interests = InterestService::new(Arc::clone(&storage));

        Self {
            config,
            storage,
            accounts,
            interests,
        }
    }
}
