use std::sync::Arc;

use dotenv::dotenv;
use tracing::{error, info};

use storefront_auth_server::{
    config::settings::Config,
    error::Result,
    services::InterestService,
    storage::{init_storage, Storage},
};

/// Loads the reference interests catalogue into the configured storage.
/// Safe to run repeatedly; existing items are left alone.
#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::load();
    let storage: Arc<dyn Storage> = match init_storage(&config).await {
        Ok(storage) => storage,
        Err(e) => {
            error!("❌ Failed to initialize storage: {}", e);
            return Err(e);
        }
    };

    let interests = InterestService::new(Arc::clone(&storage));
    let inserted = interests.seed().await?;

    info!("✅ Interests seed complete: {} inserted", inserted);
    storage.close().await.ok();

    Ok(())
}
