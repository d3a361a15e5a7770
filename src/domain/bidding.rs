//! Bidding state machine: bids, passes, and contract resolution.

use tracing::debug;

use crate::domain::cards::Suit;
use crate::domain::state::{
    next_unpassed_seat, team_of, Contract, GameState, Phase, Seat,
};
use crate::errors::domain::{DomainError, ValidationKind};

pub const MIN_BID: u8 = 50;
pub const MAX_BID: u8 = 100;
pub const BID_STEP: u8 = 5;

/// What a bid or pass did to the bidding cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidOutcome {
    /// Bidding continues; `turn` now points at the next eligible seat.
    Continue,
    /// A contract was settled; trump, phase and turn are already updated.
    Resolved(Contract),
    /// All four seats passed with no contract: the caller must redeal.
    Redeal,
}

/// Lowest bid the current actor may place: 50, or the standing contract + 5.
pub fn min_bid(state: &GameState) -> u8 {
    state
        .contract
        .map(|c| c.points.saturating_add(BID_STEP))
        .unwrap_or(MIN_BID)
}

/// Place a bid for `seat`, enforcing turn order, increments, the 100 cap,
/// and partner protection (a standing partner bid may not be outbid).
pub fn place_bid(
    state: &mut GameState,
    seat: Seat,
    points: u8,
    suit: Suit,
) -> Result<BidOutcome, DomainError> {
    check_bidding_turn(state, seat)?;

    if points == 0 || points % BID_STEP != 0 {
        return Err(DomainError::validation(
            ValidationKind::BidNotMultipleOfFive,
            format!("bids are positive multiples of {BID_STEP}, got {points}"),
        ));
    }
    if points > MAX_BID {
        return Err(DomainError::validation(
            ValidationKind::BidAboveMaximum,
            format!("bids are capped at {MAX_BID}, got {points}"),
        ));
    }
    let floor = min_bid(state);
    if points < floor {
        return Err(DomainError::validation(
            ValidationKind::BidBelowMinimum,
            format!("bid must be at least {floor}, got {points}"),
        ));
    }
    if let Some(standing) = state.contract {
        if standing.seat != seat && team_of(standing.seat) == team_of(seat) {
            return Err(DomainError::validation(
                ValidationKind::PartnerOutbid,
                "cannot outbid your partner's standing contract",
            ));
        }
    }

    let contract = Contract { seat, points, suit };
    state.contract = Some(contract);
    state.round.team_bid[team_of(seat) as usize] = true;
    debug!(game_id = %state.id, seat, points, suit = ?suit, "bid placed");

    // Capped maximum resolves immediately.
    if points == MAX_BID {
        resolve_contract(state, contract);
        return Ok(BidOutcome::Resolved(contract));
    }
    // Everyone else already passed: the bid stands unchallenged.
    if state.round.passed.len() >= 3 {
        resolve_contract(state, contract);
        return Ok(BidOutcome::Resolved(contract));
    }

    state.turn = next_unpassed_seat(seat, &state.round.passed);
    Ok(BidOutcome::Continue)
}

/// Pass for `seat`. A passed seat stays out until the round resets.
pub fn pass_bid(state: &mut GameState, seat: Seat) -> Result<BidOutcome, DomainError> {
    check_bidding_turn(state, seat)?;

    if let Some(standing) = state.contract {
        if standing.seat == seat {
            // Turn order never reaches the holder before resolution; if it
            // did, the passed set would swallow the contract.
            return Err(DomainError::invariant(
                "contract holder reached a pass turn during bidding",
            ));
        }
    }

    state.round.passed.insert(seat);
    debug!(game_id = %state.id, seat, passed = state.round.passed.len(), "pass");

    if let Some(contract) = state.contract {
        // Three seats out while a contract stands: the holder wins it.
        if state.round.passed.len() >= 3 {
            resolve_contract(state, contract);
            return Ok(BidOutcome::Resolved(contract));
        }
    } else if state.round.passed.len() == 4 {
        // Nobody wanted it: redeal the round.
        return Ok(BidOutcome::Redeal);
    }

    state.turn = next_unpassed_seat(seat, &state.round.passed);
    if state.turn.is_none() {
        return Err(DomainError::invariant(
            "no eligible bidder left without a resolution trigger",
        ));
    }
    Ok(BidOutcome::Continue)
}

fn check_bidding_turn(state: &GameState, seat: Seat) -> Result<(), DomainError> {
    if state.phase != Phase::Bidding {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("not in bidding phase (phase is {:?})", state.phase),
        ));
    }
    let turn = state.require_turn("bidding")?;
    if turn != seat {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("seat {turn} is expected to act, not seat {seat}"),
        ));
    }
    if state.round.passed.contains(&seat) {
        return Err(DomainError::validation(
            ValidationKind::AlreadyPassed,
            "seat already passed this bidding cycle",
        ));
    }
    Ok(())
}

/// Fix the contract: trump set, holder leads, and the phase moves to the
/// kitty exchange (when the table has an unused kitty) or straight to play.
fn resolve_contract(state: &mut GameState, contract: Contract) {
    state.trump = Some(contract.suit);
    state.turn = Some(contract.seat);
    state.phase = if state.config.has_kitty
        && !state.round.kitty.is_empty()
        && !state.round.kitty_taken
    {
        Phase::KittyExchange
    } else {
        Phase::Playing
    };
    debug!(
        game_id = %state.id,
        holder = contract.seat,
        points = contract.points,
        trump = ?contract.suit,
        phase = ?state.phase,
        "contract resolved"
    );
}
