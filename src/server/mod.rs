pub mod app_state;
pub mod startup;

pub use app_state::AppState;
pub use startup::start_server;
