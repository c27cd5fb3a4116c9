use actix_web::{web, HttpResponse, Result as ActixResult};
use serde_json::json;

use crate::server::app_state::AppState;

/// HTTP health check endpoint
pub async fn health_check() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

/// HTTP readiness check endpoint
pub async fn readiness_check(app_state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let storage_ok = app_state.storage.health_check().await.unwrap_or(false);

    let status = if storage_ok { "ready" } else { "degraded" };
    let body = json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "dependencies": {
            "database": storage_ok
        }
    });

    if storage_ok {
        Ok(HttpResponse::Ok().json(body))
    } else {
        Ok(HttpResponse::ServiceUnavailable().json(body))
    }
}

/// HTTP liveness check endpoint
pub async fn liveness_check() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::settings::Config;
    use crate::services::{Mailer, MemoryMailer};
    use crate::storage::memory::MemoryStorage;
    use crate::storage::Storage;

    #[tokio::test]
    async fn health_reports_version() {
        let response = health_check().await.unwrap();
        assert_eq!(response.status(), 200);

        let bytes = actix_web::body::to_bytes(response.into_body())
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn readiness_is_ok_over_memory_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let mailer = Arc::new(MemoryMailer::new());
        let state = web::Data::new(AppState::with_collaborators(
            Config::default(),
            storage as Arc<dyn Storage>,
            mailer as Arc<dyn Mailer>,
        ));

        let response = readiness_check(state).await.unwrap();
        assert_eq!(response.status(), 200);
    }
}
