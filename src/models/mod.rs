pub mod account;
pub mod interest;
pub mod verification;

// re-export the core types
pub use account::Account;
pub use interest::{default_catalog, InterestItem, InterestPage, Pagination, INTEREST_CATALOG};
pub use verification::VerificationRecord;
