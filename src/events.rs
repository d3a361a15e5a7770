//! Game event envelopes published on the shared broadcast channel.
//!
//! Every envelope carries a full public snapshot; subscribers never have
//! to diff state. Hands stay private to `PlayerView` and are never on
//! this channel.

use serde::Serialize;
use uuid::Uuid;

use crate::domain::scoring::RoundScore;
use crate::domain::snapshot::GameSnapshot;
use crate::domain::state::{Contract, GameId, Seat, Team};

/// Why a game reached its terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameEndReason {
    /// A team reached the configured score target.
    TargetReached,
    /// A team fell to or below the negated score target.
    Bust,
    /// A player left and the table dissolved.
    PlayerExit,
    /// An internal invariant failed; the game cannot continue safely.
    Fault,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// A seat placed a bid or passed; the snapshot shows the new auction state.
    BidMade {
        game_id: GameId,
        seat: Seat,
        bid: Option<u8>,
        snapshot: GameSnapshot,
    },
    /// Catch-all state transition: deals, kitty exchange, phase changes.
    GameUpdated {
        game_id: GameId,
        snapshot: GameSnapshot,
    },
    CardPlayed {
        game_id: GameId,
        seat: Seat,
        snapshot: GameSnapshot,
    },
    TrickCompleted {
        game_id: GameId,
        winner: Seat,
        points: u16,
        snapshot: GameSnapshot,
    },
    RoundCompleted {
        game_id: GameId,
        contract: Contract,
        score: RoundScore,
        snapshot: GameSnapshot,
    },
    GameEnded {
        game_id: GameId,
        winner: Option<Team>,
        reason: GameEndReason,
        snapshot: GameSnapshot,
    },
    /// A turn timer expired; the game is torn down and idle humans evicted.
    GameTimeout {
        game_id: GameId,
        timed_out_seat: Option<Seat>,
        evicted: Vec<Uuid>,
        snapshot: GameSnapshot,
    },
}

impl GameEvent {
    pub fn game_id(&self) -> GameId {
        match self {
            GameEvent::BidMade { game_id, .. }
            | GameEvent::GameUpdated { game_id, .. }
            | GameEvent::CardPlayed { game_id, .. }
            | GameEvent::TrickCompleted { game_id, .. }
            | GameEvent::RoundCompleted { game_id, .. }
            | GameEvent::GameEnded { game_id, .. }
            | GameEvent::GameTimeout { game_id, .. } => *game_id,
        }
    }

    /// The full state snapshot this event carries.
    pub fn snapshot(&self) -> &GameSnapshot {
        match self {
            GameEvent::BidMade { snapshot, .. }
            | GameEvent::GameUpdated { snapshot, .. }
            | GameEvent::CardPlayed { snapshot, .. }
            | GameEvent::TrickCompleted { snapshot, .. }
            | GameEvent::RoundCompleted { snapshot, .. }
            | GameEvent::GameEnded { snapshot, .. }
            | GameEvent::GameTimeout { snapshot, .. } => snapshot,
        }
    }
}
