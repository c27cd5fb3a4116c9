use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::handlers::error_response;
use crate::server::app_state::AppState;

/// Signup payload. Missing fields deserialize empty and are rejected by
/// the workflow's validation instead of failing the JSON parse.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub otp: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/auth/send-otp
pub async fn send_otp(
    state: web::Data<AppState>,
    request: web::Json<SignupRequest>,
) -> ActixResult<HttpResponse> {
    debug!("Signup request for {}", request.email);

    let result = state
        .accounts
        .begin_signup(&request.name, &request.email, &request.password)
        .await;

    Ok(match result {
        Ok(account_id) => HttpResponse::Ok().json(json!({
            "message": "Verification OTP sent to email",
            "userId": account_id,
        })),
        Err(err) => error_response(&err, "Failed to send verification email"),
    })
}

/// POST /api/auth/verify-otp
pub async fn verify_otp(
    state: web::Data<AppState>,
    request: web::Json<VerifyRequest>,
) -> ActixResult<HttpResponse> {
    debug!("Verification attempt for account {}", request.user_id);

    let result = state
        .accounts
        .complete_activation(&request.user_id, &request.otp)
        .await;

    Ok(match result {
        Ok(()) => HttpResponse::Ok().json(json!({
            "message": "Email verified successfully",
        })),
        Err(err) => error_response(&err, "Failed to verify OTP"),
    })
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    debug!("Login attempt for {}", request.email);

    let result = state
        .accounts
        .authenticate(&request.email, &request.password)
        .await;

    Ok(match result {
        Ok((token, account)) => HttpResponse::Ok().json(json!({
            "token": token,
            "user": {
                "id": account.id,
                "name": account.name,
                "email": account.email,
            },
        })),
        Err(err) => error_response(&err, "Internal server error"),
    })
}
