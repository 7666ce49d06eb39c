//! CLI command implementations.

mod analyze;
mod config;
mod doctor;
mod session;
mod transcript;

pub use analyze::run_analyze;
pub use config::run_config;
pub use doctor::run_doctor;
pub use session::run_session;
pub use transcript::run_transcript;
