// Centralized configuration constants

// HTTP server
pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";
pub const DEFAULT_HTTP_PORT: u16 = 8080;
pub const DEFAULT_WORKER_THREADS: usize = 4;

// Authentication
pub const DEFAULT_TOKEN_EXPIRY_HOURS: i64 = 24;
pub const TOKEN_ISSUER: &str = "storefront-auth";

// Verification codes
pub const OTP_CODE_MIN: u32 = 100_000;
pub const OTP_CODE_MAX: u32 = 999_999;
pub const OTP_TTL_MINUTES: i64 = 10;

// Account constraints
pub const MIN_PASSWORD_LENGTH: usize = 6;

// Interests pagination
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

// Database (MySQL)
pub const DEFAULT_DB_USER: &str = "user";
pub const DEFAULT_DB_PASS: &str = "password";
pub const DEFAULT_DB_NAME: &str = "storefront_auth";
pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: u16 = 3306;
pub const DEFAULT_DB_POOL: u32 = 5;
pub const DEFAULT_DB_CONN_TIMEOUT_SECS: u64 = 30;

// Mail
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const VERIFICATION_MAIL_SUBJECT: &str = "Email Verification";

// Logging
pub const DEFAULT_LOG_LEVEL: &str = "info";

// CORS
pub const DEFAULT_CORS_MAX_AGE_SECS: usize = 3600;
