//! Full-state snapshots emitted with every event.
//!
//! The transport collaborator decides what to forward to whom; the engine
//! always produces the complete picture. The passed set crosses this
//! boundary as an explicit ordered list, never as an opaque container.

use serde::Serialize;
use uuid::Uuid;

use crate::config::BotSkill;
use crate::domain::cards::{Card, DeckVariant, Suit};
use crate::domain::state::{
    CompletedTrick, Contract, GameState, Phase, Seat, Team,
};

/// Public info about a single seat.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SeatPublic {
    pub seat: Seat,
    pub player_id: Uuid,
    pub display_name: String,
    pub is_bot: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bot_skill: Option<BotSkill>,
    /// Hand size only. Cards never cross the shared channel; seats read
    /// their own hand through `PlayerView`.
    pub hand_count: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlayPublic {
    pub seat: Seat,
    pub card: Card,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TrickPublic {
    pub plays: Vec<PlayPublic>,
    pub winner: Seat,
    pub points: u16,
}

/// Top-level snapshot of one game.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub game_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
    pub phase: Phase,
    pub round_no: u32,
    pub deck_variant: DeckVariant,
    pub score_target: u16,
    pub dealer: Seat,
    pub turn: Option<Seat>,
    pub trump: Option<Suit>,
    pub contract: Option<Contract>,
    pub seating: Vec<SeatPublic>,
    /// Seats that passed this bidding cycle, ascending order.
    pub passed: Vec<Seat>,
    pub current_trick: Vec<PlayPublic>,
    pub last_trick: Option<TrickPublic>,
    pub team_points: [u16; 2],
    pub scores: [i32; 2],
    pub kitty_count: usize,
    pub winner: Option<Team>,
}

fn trick_public(trick: &CompletedTrick) -> TrickPublic {
    TrickPublic {
        plays: trick
            .plays
            .iter()
            .map(|&(seat, card)| PlayPublic { seat, card })
            .collect(),
        winner: trick.winner,
        points: trick.points,
    }
}

/// Build a snapshot of the current state.
pub fn snapshot(state: &GameState) -> GameSnapshot {
    GameSnapshot {
        game_id: state.id,
        created_at: state.created_at,
        phase: state.phase,
        round_no: state.round_no,
        deck_variant: state.config.deck_variant,
        score_target: state.config.score_target,
        dealer: state.dealer,
        turn: state.turn,
        trump: state.trump,
        contract: state.contract,
        seating: state
            .players
            .iter()
            .enumerate()
            .map(|(i, p)| SeatPublic {
                seat: i as Seat,
                player_id: p.id,
                display_name: p.name.clone(),
                is_bot: p.is_bot(),
                bot_skill: p.bot_skill(),
                hand_count: p.hand.len(),
            })
            .collect(),
        passed: state.round.passed.iter().copied().collect(),
        current_trick: state
            .round
            .trick_plays
            .iter()
            .map(|&(seat, card)| PlayPublic { seat, card })
            .collect(),
        last_trick: state.round.last_trick().map(trick_public),
        team_points: state.round.team_points,
        scores: state.scores,
        kitty_count: state.round.kitty.len(),
        winner: state.winner,
    }
}
