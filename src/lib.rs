#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod ai;
pub mod config;
pub mod domain;
pub mod error;
pub mod errors;
pub mod events;
pub mod game_flow;
pub mod state;
pub mod telemetry;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::{BotSkill, TableConfig};
pub use domain::snapshot::GameSnapshot;
pub use error::EngineError;
pub use events::{GameEndReason, GameEvent};
pub use game_flow::{spawn_timeout_monitor, GameFlowService, SeatAssignment};
pub use state::app_state::AppState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
