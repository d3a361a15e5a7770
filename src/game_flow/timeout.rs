//! Turn timeout sweep: a 1 Hz tick over every live game.
//!
//! A game whose current actor has been idle past the configured timeout
//! is torn down: hands cleared, humans evicted, the game removed from the
//! registry. Subscribers learn about it from a single `GameTimeout` event.

use std::sync::Arc;

use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::warn;
use uuid::Uuid;

use crate::domain::snapshot::snapshot;
use crate::domain::state::Phase;
use crate::events::GameEvent;
use crate::state::AppState;

pub fn spawn_timeout_monitor(app: Arc<AppState>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            sweep_expired(&app);
        }
    })
}

/// One pass over the registry; synchronous so no lock outlives the tick.
pub(crate) fn sweep_expired(app: &AppState) {
    for game_id in app.active_game_ids() {
        let Some(handle) = app.game(game_id) else {
            continue;
        };
        let expired = {
            let mut state = handle.state.lock();
            if state.phase == Phase::Finished {
                false
            } else if state.turn_started.elapsed() >= state.config.turn_timeout() {
                let timed_out_seat = state.turn;
                let evicted: Vec<Uuid> = state
                    .players
                    .iter()
                    .filter(|p| !p.is_bot())
                    .map(|p| p.id)
                    .collect();
                warn!(
                    %game_id,
                    ?timed_out_seat,
                    evicted = evicted.len(),
                    "turn timed out, dissolving table"
                );
                for player in state.players.iter_mut() {
                    player.hand.clear();
                }
                state.phase = Phase::Finished;
                state.turn = None;
                // Published before the lock drops so no later mutation of
                // this game can get its events out first.
                app.publish(GameEvent::GameTimeout {
                    game_id,
                    timed_out_seat,
                    evicted,
                    snapshot: snapshot(&state),
                });
                true
            } else {
                false
            }
        };
        if expired {
            app.remove_game(game_id);
        }
    }
}
