use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Deserialize;
use tracing::debug;

use crate::handlers::error_response;
use crate::server::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub id: u32,
    pub selected: bool,
}

/// GET /api/interests
pub async fn list_interests(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> ActixResult<HttpResponse> {
    debug!(
        "Listing interests, page={:?} pageSize={:?}",
        query.page, query.page_size
    );

    Ok(match state.interests.list(query.page, query.page_size).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => error_response(&err, "Failed to fetch interests"),
    })
}

/// PUT /api/interests
pub async fn update_interest(
    state: web::Data<AppState>,
    request: web::Json<UpdateRequest>,
) -> ActixResult<HttpResponse> {
    debug!(
        "Updating interest {} selected={}",
        request.id, request.selected
    );

    let result = state
        .interests
        .set_selected(request.id, request.selected)
        .await;

    Ok(match result {
        Ok(item) => HttpResponse::Ok().json(item),
        Err(err) => error_response(&err, "Failed to update interest"),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::config::settings::Config;
    use crate::server::app_state::AppState;
    use crate::services::{Mailer, MemoryMailer};
    use crate::storage::memory::MemoryStorage;
    use crate::storage::Storage;

    async fn seeded_state() -> web::Data<AppState> {
        let storage = Arc::new(MemoryStorage::new());
        let mailer = Arc::new(MemoryMailer::new());
        let state = AppState::with_collaborators(
            Config::default(),
            storage as Arc<dyn Storage>,
            mailer as Arc<dyn Mailer>,
        );
        state.interests.seed().await.unwrap();
        web::Data::new(state)
    }

    async fn body_json(response: HttpResponse) -> serde_json::Value {
        let bytes = actix_web::body::to_bytes(response.into_body())
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn list_wire_format_uses_camel_case_pagination() {
        let state = seeded_state().await;

        let response = list_interests(
            state,
            web::Query(ListQuery {
                page: Some(3),
                page_size: Some(10),
            }),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), 200);

        let body = body_json(response).await;
        let interests = body["interests"].as_array().unwrap();
        assert_eq!(interests.len(), 10);
        assert_eq!(interests[0]["id"], 21);
        assert_eq!(interests[9]["id"], 30);

        let pagination = &body["pagination"];
        assert_eq!(pagination["total"], 60);
        assert_eq!(pagination["totalPages"], 6);
        assert_eq!(pagination["currentPage"], 3);
        assert_eq!(pagination["pageSize"], 10);
    }

    #[tokio::test]
    async fn list_defaults_to_first_page_of_ten() {
        let state = seeded_state().await;

        let response = list_interests(
            state,
            web::Query(ListQuery {
                page: None,
                page_size: None,
            }),
        )
        .await
        .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["interests"].as_array().unwrap().len(), 10);
        assert_eq!(body["pagination"]["currentPage"], 1);
    }

    #[tokio::test]
    async fn update_returns_the_updated_item() {
        let state = seeded_state().await;

        let response = update_interest(
            state,
            web::Json(UpdateRequest {
                id: 5,
                selected: true,
            }),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), 200);

        let body = body_json(response).await;
        assert_eq!(body["id"], 5);
        assert_eq!(body["selected"], true);
    }

    #[tokio::test]
    async fn unknown_interest_is_a_404() {
        let state = seeded_state().await;

        let response = update_interest(
            state,
            web::Json(UpdateRequest {
                id: 999,
                selected: true,
            }),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), 404);
        assert_eq!(body_json(response).await["error"], "Interest not found");
    }
}
