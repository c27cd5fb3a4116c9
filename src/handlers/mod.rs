// Handler modules
pub mod auth_handler;
pub mod interest_handler;

// Health check handler
pub mod health;

use actix_web::HttpResponse;
use tracing::{error, warn};

use crate::error::AuthError;

/// Map a workflow error onto the wire.
///
/// Client-facing errors carry their own message; anything without one is
/// logged in full and answered with the route's generic `fallback` text.
pub(crate) fn error_response(err: &AuthError, fallback: &str) -> HttpResponse {
    let status = err.http_status_code();
    if status >= 500 {
        error!("Request failed ({}): {}", err.category(), err);
    } else {
        warn!("Request rejected ({}): {}", err.category(), err);
    }

    let status = actix_web::http::StatusCode::from_u16(status)
        .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);

    HttpResponse::build(status).json(serde_json::json!({
        "error": err.public_message().unwrap_or(fallback),
    }))
}
