use std::time::Duration;

use tokio::signal;
use tracing::{error, info, instrument};

use crate::{
    auth::AuthGuard,
    config::settings::Config,
    error::{AuthError, Result},
    handlers,
    server::app_state::AppState,
};

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpResponse, HttpServer};
use serde_json::json;

/// Start the HTTP server from configuration
#[instrument(skip(config))]
pub async fn start_server(config: Config) -> Result<()> {
    info!("🚀 Starting Storefront Auth Server");

    let state = AppState::new(&config).await?;
    run_server(config, state).await
}

/// Start the HTTP server over prebuilt application state
#[instrument(skip(config, state))]
pub async fn run_server(config: Config, state: AppState) -> Result<()> {
    let addr = config.server.address();
    info!("🌐 Starting HTTP server on {}", addr);

    print_startup_banner(&config);

    let app_data = web::Data::new(state.clone());
    let auth_config = config.auth.clone();

    let server = HttpServer::new(move || {
        App::new()
            // App data
            .app_data(app_data.clone())
            // Malformed JSON answers with the contract's 400 body
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                actix_web::error::InternalError::from_response(
                    err,
                    HttpResponse::BadRequest().json(json!({
                        "error": "Invalid request format",
                    })),
                )
                .into()
            }))
            // Middleware stack
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .wrap(
                middleware::DefaultHeaders::new()
                    .add(("X-Version", env!("CARGO_PKG_VERSION")))
                    .add(("X-Server", "Storefront-Auth")),
            )
            // CORS configuration
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(crate::config::constants::DEFAULT_CORS_MAX_AGE_SECS),
            )
            // Health endpoints
            .route("/health", web::get().to(handlers::health::health_check))
            .route(
                "/health/ready",
                web::get().to(handlers::health::readiness_check),
            )
            .route(
                "/health/live",
                web::get().to(handlers::health::liveness_check),
            )
            // API endpoints behind the route guard
            .service(
                web::scope("/api")
                    .wrap(AuthGuard::new(auth_config.clone()))
                    .route(
                        "/auth/send-otp",
                        web::post().to(handlers::auth_handler::send_otp),
                    )
                    .route(
                        "/auth/verify-otp",
                        web::post().to(handlers::auth_handler::verify_otp),
                    )
                    .route(
                        "/auth/login",
                        web::post().to(handlers::auth_handler::login),
                    )
                    .route(
                        "/interests",
                        web::get().to(handlers::interest_handler::list_interests),
                    )
                    .route(
                        "/interests",
                        web::put().to(handlers::interest_handler::update_interest),
                    ),
            )
    })
    .workers(config.server.worker_threads)
    .keep_alive(Duration::from_secs(75))
    .client_request_timeout(Duration::from_secs(120))
    .shutdown_timeout(30)
    .bind(&addr)
    .map_err(|e| AuthError::config(format!("Failed to bind {}: {}", addr, e)))?
    .run();

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!("❌ HTTP server error: {}", e);
                return Err(AuthError::internal(format!("HTTP server error: {}", e)));
            }
        },
        _ = setup_shutdown_signal() => {
            info!("🛑 Shutdown signal received");
        }
    }

    graceful_shutdown(state).await?;

    info!("✅ Server shutdown completed successfully");
    Ok(())
}

/// Setup graceful shutdown signal handling
async fn setup_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            info!("🛑 Received TERM signal, initiating graceful shutdown...");
        },
    }

    // Give in-flight requests a moment before teardown begins
    tokio::time::sleep(Duration::from_millis(100)).await;
}

/// Perform graceful shutdown
#[instrument(skip(state))]
async fn graceful_shutdown(state: AppState) -> Result<()> {
    info!("🔄 Starting graceful shutdown sequence...");

    if let Err(e) = state.storage.close().await {
        error!("❌ Error closing storage connections: {}", e);
    }

    info!("✅ Graceful shutdown sequence completed");
    Ok(())
}

/// Print startup banner
fn print_startup_banner(config: &Config) {
    println!(
        "
╭─────────────────────────────────────────────────────╮
│                Storefront Auth Server               │
│                   v{}                            │
├─────────────────────────────────────────────────────┤
│ 🌐 HTTP: {}:{}                              │
│ 🧵 Workers: {} threads                               │
│ 💾 Storage: {:?}                                  │
╰─────────────────────────────────────────────────────╯
",
        env!("CARGO_PKG_VERSION"),
        config.server.host,
        config.server.port,
        config.server.worker_threads,
        config.storage.backend,
    );

    info!("✅ Storefront Auth Server startup completed");
}
