pub mod guard;
pub mod token;

pub use guard::AuthGuard;
pub use token::{Claims, JwtService};
