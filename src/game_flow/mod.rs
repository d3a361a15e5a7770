//! Game flow orchestration - bridges pure domain logic with the live
//! game registry, event fan-out, bot scheduling and turn timers.
//!
//! All state mutation happens synchronously under the game lock; nothing
//! awaits while holding it, and every event is published before the lock
//! drops so the observer stream follows mutation order. Bot thinking
//! delays and the timeout sweep run in spawned tasks that re-acquire the
//! lock per step.

mod bot_coordinator;
mod player_actions;
mod round_lifecycle;
mod timeout;

use std::sync::Arc;

use crate::state::AppState;

pub use round_lifecycle::SeatAssignment;
pub use timeout::spawn_timeout_monitor;

/// Game flow service - cheap to clone, shares the registry.
#[derive(Clone)]
pub struct GameFlowService {
    app: Arc<AppState>,
}

impl GameFlowService {
    pub fn new(app: Arc<AppState>) -> Self {
        Self { app }
    }

    pub fn app(&self) -> &Arc<AppState> {
        &self.app
    }
}
