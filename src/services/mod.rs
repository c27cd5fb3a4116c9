// Module declarations
pub mod account_service;
pub mod interest_service;
pub mod mail_service;
pub mod otp_service;

// Public re-exports
pub use account_service::AccountService;
pub use interest_service::InterestService;
pub use mail_service::{Mailer, MemoryMailer, SmtpMailer};
pub use otp_service::OtpService;
