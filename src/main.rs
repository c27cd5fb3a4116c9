use std::env;

use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront_auth_server::{config::settings::Config, error::Result, server::startup::start_server};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize structured logging
    init_tracing();

    let config = Config::load();
    info!(
        "🚀 Starting Storefront Auth Server v{}",
        env!("CARGO_PKG_VERSION")
    );

    match start_server(config).await {
        Ok(()) => {
            info!("✅ Server shutdown completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("❌ Server failed: {}", e);
            Err(e)
        }
    }
}

/// Initialize structured logging
fn init_tracing() {
    let log_level =
        env::var("RUST_LOG").unwrap_or_else(|_| "storefront_auth_server=info,info".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        );

    // JSON logging for production
    if env::var("LOG_FORMAT").unwrap_or_default() == "json" {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(false)
            .with_span_list(false);

        subscriber.with(json_layer).init();
    } else {
        subscriber.init();
    }

    info!("✅ Structured logging initialized with level: {}", log_level);
}
