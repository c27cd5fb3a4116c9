// Common test helpers for integration tests

use std::sync::Arc;

use storefront_auth_server::config::settings::Config;
use storefront_auth_server::server::app_state::AppState;
use storefront_auth_server::services::{Mailer, MemoryMailer};
use storefront_auth_server::storage::memory::MemoryStorage;
use storefront_auth_server::storage::Storage;

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.auth.jwt_secret = "integration-test-secret".to_string();
    config
}

/// App state over in-memory storage and a recording mailer, with handles
/// to both collaborators for assertions
pub fn app_state_with_memory() -> (AppState, Arc<MemoryStorage>, Arc<MemoryMailer>) {
    let storage = Arc::new(MemoryStorage::new());
    let mailer = Arc::new(MemoryMailer::new());

    let state = AppState::with_collaborators(
        test_config(),
        storage.clone() as Arc<dyn Storage>,
        mailer.clone() as Arc<dyn Mailer>,
    );

    (state, storage, mailer)
}
