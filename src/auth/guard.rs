use std::rc::Rc;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::debug;

use crate::auth::token::JwtService;
use crate::config::settings::AuthConfig;
use crate::error::AuthError;

/// Cookie the front end stores the login token in
const AUTH_COOKIE: &str = "authToken";

/// Paths served without a token, matched by prefix
const PUBLIC_PATHS: &[&str] = &[
    "/api/auth/send-otp",
    "/api/auth/verify-otp",
    "/api/auth/login",
];

fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.iter().any(|public| path.starts_with(public))
}

/// Accepts both "Bearer <token>" and a raw token value
fn token_from_header(value: &str) -> Option<&str> {
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    (!token.is_empty()).then_some(token)
}

fn extract_token(req: &ServiceRequest) -> Option<String> {
    if let Some(header) = req.headers().get("Authorization") {
        if let Some(token) = header.to_str().ok().and_then(token_from_header) {
            return Some(token.to_string());
        }
    }

    req.cookie(AUTH_COOKIE).map(|c| c.value().to_string())
}

/// Route guard for the API scope.
///
/// Requests to non-public paths must carry a token that passes signature,
/// expiry and issuer checks. Verified claims are stored in the request
/// extensions for handlers that want the caller's identity. The signing
/// secret is checked per request, like the login flow, so a server booted
/// without one keeps serving the public paths.
pub struct AuthGuard {
    auth: Rc<AuthConfig>,
}

impl AuthGuard {
    pub fn new(auth: AuthConfig) -> Self {
        Self {
            auth: Rc::new(auth),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = AuthGuardMiddleware<S>;
    type InitError = ();
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGuardMiddleware {
            service: Rc::new(service),
            auth: Rc::clone(&self.auth),
        }))
    }
}

pub struct AuthGuardMiddleware<S> {
    service: Rc<S>,
    auth: Rc<AuthConfig>,
}

impl<S, B> Service<ServiceRequest> for AuthGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let auth = Rc::clone(&self.auth);

        Box::pin(async move {
            if is_public_path(req.path()) {
                return service.call(req).await;
            }

            let jwt = JwtService::new(&auth)?;

            let token = match extract_token(&req) {
                Some(token) => token,
                None => {
                    debug!("No authentication token for {}", req.path());
                    return Err(AuthError::unauthorized("No authentication token").into());
                }
            };

            match jwt.verify_token(&token) {
                Ok(claims) => {
                    req.extensions_mut().insert(claims);
                    service.call(req).await
                }
                Err(err) => {
                    debug!("Rejected token for {}: {}", req.path(), err);
                    Err(err.into())
                }
            }
        })
    }
}
