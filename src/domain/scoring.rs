//! Round scoring: contract success or failure, shutout, game-end detection.

use serde::Serialize;
use tracing::info;

use crate::domain::cards_logic::points_in;
use crate::domain::state::{opposing_team, team_of, GameState, Team};
use crate::errors::domain::DomainError;

/// Cumulative score at which a non-bidding team stops collecting trick
/// points (the shutout rule). Independent of the configured score target.
pub const SHUTOUT_THRESHOLD: i32 = 100;

/// Outcome of scoring one finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoundScore {
    pub contractor_team: Team,
    pub contract_made: bool,
    pub contractor_delta: i32,
    pub defender_delta: i32,
    /// Defenders forfeited their trick points this round.
    pub shutout: bool,
    pub kitty_points: u16,
    /// Winning team, when this round ended the game.
    pub game_winner: Option<Team>,
}

/// Apply round scoring to the cumulative totals.
///
/// Contractors bank their card points if they met the contract, else lose
/// the full contract value. Defenders bank their own card points (unless
/// shut out) plus the kitty discard points unconditionally.
pub fn score_round(state: &mut GameState) -> Result<RoundScore, DomainError> {
    let contract = state.require_contract("round scoring")?;
    let contractor = team_of(contract.seat);
    let defenders = opposing_team(contractor);

    let card_points = state.round.team_points[contractor as usize] as i32;
    let contract_points = contract.points as i32;
    let contract_made = card_points >= contract_points;
    let contractor_delta = if contract_made {
        card_points
    } else {
        -contract_points
    };

    let defender_points = state.round.team_points[defenders as usize] as i32;
    let shutout = state.scores[defenders as usize] >= SHUTOUT_THRESHOLD
        && !state.round.team_bid[defenders as usize];
    let kitty_points = points_in(&state.round.kitty_discards);
    let defender_delta = if shutout { 0 } else { defender_points } + kitty_points as i32;

    state.scores[contractor as usize] += contractor_delta;
    state.scores[defenders as usize] += defender_delta;

    let game_winner = detect_game_end(state, contractor);
    info!(
        game_id = %state.id,
        round = state.round_no,
        contractor,
        contract = contract.points,
        card_points,
        contract_made,
        shutout,
        kitty_points,
        scores = ?state.scores,
        winner = ?game_winner,
        "round scored"
    );

    Ok(RoundScore {
        contractor_team: contractor,
        contract_made,
        contractor_delta,
        defender_delta,
        shutout,
        kitty_points,
        game_winner,
    })
}

/// A team wins by reaching the target, or by its opponent busting to the
/// negative target. When both teams cross the target in the same round the
/// higher total takes the game (contractors on a tie).
fn detect_game_end(state: &GameState, contractor: Team) -> Option<Team> {
    let target = state.config.score_target as i32;
    let over: Vec<Team> = (0..2u8)
        .filter(|&t| state.scores[t as usize] >= target)
        .collect();
    match over.as_slice() {
        [t] => return Some(*t),
        [_, _] => {
            return Some(match state.scores[0].cmp(&state.scores[1]) {
                std::cmp::Ordering::Greater => 0,
                std::cmp::Ordering::Less => 1,
                std::cmp::Ordering::Equal => contractor,
            });
        }
        _ => {}
    }
    (0..2u8).find_map(|t| {
        (state.scores[t as usize] <= -target).then_some(opposing_team(t))
    })
}
