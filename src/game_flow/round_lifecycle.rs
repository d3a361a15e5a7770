use serde::Deserialize;
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;

use super::GameFlowService;
use crate::domain::cards_logic::points_in;
use crate::domain::dealing::deal_round;
use crate::domain::scoring::score_round;
use crate::domain::snapshot::{snapshot, GameSnapshot};
use crate::domain::state::{
    next_seat, round_opener, GameState, Phase, Player, PlayerKind, SEATS,
};
use crate::error::EngineError;
use crate::errors::domain::DomainError;
use crate::events::{GameEndReason, GameEvent};
use crate::state::GameHandle;
use crate::config::TableConfig;

/// Who sits where when a table is created.
#[derive(Debug, Clone, Deserialize)]
pub struct SeatAssignment {
    pub name: String,
    pub kind: PlayerKind,
}

/// Per-round dealing seed. Rounds of a seeded game stay deterministic but
/// distinct; unseeded games draw fresh entropy every deal.
fn round_seed(config: &TableConfig, round_no: u32) -> u64 {
    match config.deal_seed {
        Some(base) => base ^ (round_no as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15),
        None => rand::random(),
    }
}

impl GameFlowService {
    /// Create a table, deal the first round and register the game.
    ///
    /// The game starts in `Bidding` with the seat left of the dealer to
    /// act. Bots are scheduled immediately if one opens the auction.
    pub fn start_game(
        &self,
        config: TableConfig,
        seats: [SeatAssignment; SEATS],
    ) -> Result<GameSnapshot, EngineError> {
        config.validate()?;

        let players = seats.map(|assignment| Player {
            id: Uuid::new_v4(),
            name: assignment.name,
            kind: assignment.kind,
            hand: Vec::new(),
        });

        let mut state = GameState::new(Uuid::new_v4(), config, players);
        let game_id = state.id;
        deal_into(&mut state);
        info!(%game_id, variant = ?state.config.deck_variant, "game created");

        let snap = snapshot(&state);
        self.app().insert_game(game_id, GameHandle::new(state));
        self.app().publish(GameEvent::GameUpdated {
            game_id,
            snapshot: snap.clone(),
        });
        self.schedule_bots(game_id);
        Ok(snap)
    }

    /// All four seats passed without a contract: collect the cards, move
    /// the deal one seat left and run the auction again.
    pub(super) fn redeal(&self, state: &mut GameState) {
        info!(game_id = %state.id, round = state.round_no, "redeal, no contract");
        state.round_no += 1;
        state.dealer = next_seat(state.dealer);
        deal_into(state);
    }

    /// Score the finished round and either end the game or deal the next
    /// round. Returns the events to publish and whether the game is over.
    pub(super) fn complete_round(
        &self,
        state: &mut GameState,
    ) -> Result<(Vec<GameEvent>, bool), DomainError> {
        let contract = state.require_contract("round completion")?;
        let score = score_round(state)?;
        let mut events = vec![GameEvent::RoundCompleted {
            game_id: state.id,
            contract,
            score,
            snapshot: snapshot(state),
        }];

        if let Some(winner) = score.game_winner {
            let reason = if state.scores[winner as usize] >= state.config.score_target as i32 {
                GameEndReason::TargetReached
            } else {
                GameEndReason::Bust
            };
            state.winner = Some(winner);
            state.phase = Phase::Finished;
            state.turn = None;
            info!(game_id = %state.id, winner, ?reason, "game over");
            events.push(GameEvent::GameEnded {
                game_id: state.id,
                winner: Some(winner),
                reason,
                snapshot: snapshot(state),
            });
            return Ok((events, true));
        }

        state.round_no += 1;
        state.dealer = next_seat(state.dealer);
        deal_into(state);
        events.push(GameEvent::GameUpdated {
            game_id: state.id,
            snapshot: snapshot(state),
        });
        Ok((events, false))
    }
}

/// Deal fresh hands into `state` and open the auction.
fn deal_into(state: &mut GameState) {
    let seed = round_seed(&state.config, state.round_no);
    let deal = deal_round(
        state.config.deck_variant,
        state.config.has_kitty,
        seed,
    );
    state.reset_round();
    for (seat, hand) in deal.hands.into_iter().enumerate() {
        state.players[seat].hand = hand;
    }
    state.round.kitty = deal.kitty;
    state.round.dealt_points = state
        .players
        .iter()
        .map(|p| points_in(&p.hand))
        .sum::<u16>()
        + points_in(&state.round.kitty);
    state.phase = Phase::Bidding;
    state.turn = Some(round_opener(state.dealer));
    state.turn_started = Instant::now();
}
