use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the entire application
#[derive(Debug, Error, Clone, Serialize, Deserialize)]
pub enum AuthError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Email already registered")]
    EmailInUse,

    #[error("No verification record found")]
    NoRecordFound,

    #[error("Verification code expired")]
    OtpExpired,

    #[error("Invalid verification code")]
    InvalidOtp,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account not verified")]
    NotVerified,

    #[error("Interest not found")]
    InterestNotFound,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Mail delivery error: {0}")]
    Delivery(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Token issuance error: {0}")]
    TokenIssuance(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AuthError>;

impl AuthError {
    /// Create a new validation error
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a new unauthorized error
    pub fn unauthorized<T: Into<String>>(msg: T) -> Self {
        Self::Unauthorized(msg.into())
    }

    /// Create a new delivery error
    pub fn delivery<T: Into<String>>(msg: T) -> Self {
        Self::Delivery(msg.into())
    }

    /// Create a new storage error
    pub fn storage<T: Into<String>>(msg: T) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a new config error
    pub fn config<T: Into<String>>(msg: T) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new internal error
    pub fn internal<T: Into<String>>(msg: T) -> Self {
        Self::Internal(msg.into())
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AuthError::Validation(_) => "validation",
            AuthError::EmailInUse => "conflict",
            AuthError::NoRecordFound => "not_found",
            AuthError::OtpExpired => "expired",
            AuthError::InvalidOtp => "invalid_code",
            AuthError::InvalidCredentials => "authentication",
            AuthError::NotVerified => "unverified",
            AuthError::InterestNotFound => "not_found",
            AuthError::Unauthorized(_) => "authentication",
            AuthError::Delivery(_) => "delivery",
            AuthError::Storage(_) => "dependency",
            AuthError::Config(_) => "configuration",
            AuthError::TokenIssuance(_) => "configuration",
            AuthError::Internal(_) => "internal",
        }
    }

    /// Get HTTP status code for this error
    pub fn http_status_code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 400,
            AuthError::EmailInUse => 400,
            AuthError::NoRecordFound => 400,
            AuthError::OtpExpired => 400,
            AuthError::InvalidOtp => 400,
            AuthError::InvalidCredentials => 401,
            AuthError::NotVerified => 401,
            AuthError::InterestNotFound => 404,
            AuthError::Unauthorized(_) => 401,
            AuthError::Delivery(_) => 500,
            AuthError::Storage(_) => 500,
            AuthError::Config(_) => 500,
            AuthError::TokenIssuance(_) => 500,
            AuthError::Internal(_) => 500,
        }
    }

    /// Message safe to return to the client. `None` means the detail stays
    /// server-side and the caller supplies a generic text.
    pub fn public_message(&self) -> Option<&str> {
        match self {
            AuthError::Validation(msg) => Some(msg),
            AuthError::EmailInUse => Some("User with this email already exists"),
            AuthError::NoRecordFound => Some("No OTP record found"),
            AuthError::OtpExpired => Some("OTP has expired. Please request a new one"),
            AuthError::InvalidOtp => Some("Invalid OTP"),
            AuthError::InvalidCredentials => Some("Invalid email or password"),
            AuthError::NotVerified => Some("Please verify your email first"),
            AuthError::InterestNotFound => Some("Interest not found"),
            AuthError::Unauthorized(_) => Some("Authentication required"),
            AuthError::Delivery(_) => Some("Failed to send verification email"),
            AuthError::Config(_) => Some("Server configuration error"),
            AuthError::TokenIssuance(_) => Some("Error generating authentication token"),
            AuthError::Storage(_) | AuthError::Internal(_) => None,
        }
    }
}

// Storage error conversions are implemented in storage/mod.rs

// Database error conversions
impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        AuthError::Storage(format!("Database error: {}", err))
    }
}

// Token signing failures surface as issuance errors; verification paths
// map jsonwebtoken errors explicitly instead of relying on this.
impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AuthError::TokenIssuance(format!("JWT error: {}", err))
    }
}

// Mail transport conversions
impl From<lettre::transport::smtp::Error> for AuthError {
    fn from(err: lettre::transport::smtp::Error) -> Self {
        AuthError::Delivery(format!("SMTP error: {}", err))
    }
}

impl From<lettre::error::Error> for AuthError {
    fn from(err: lettre::error::Error) -> Self {
        AuthError::Delivery(format!("Message build error: {}", err))
    }
}

impl From<lettre::address::AddressError> for AuthError {
    fn from(err: lettre::address::AddressError) -> Self {
        AuthError::Delivery(format!("Invalid mail address: {}", err))
    }
}

impl actix_web::ResponseError for AuthError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        actix_web::http::StatusCode::from_u16(self.http_status_code())
            .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.public_message().unwrap_or("Internal server error"),
        }))
    }
}

/// Convenience macros for error handling
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err.into());
        }
    };
}

#[macro_export]
macro_rules! bail {
    ($err:expr) => {
        return Err($err.into())
    };
}
