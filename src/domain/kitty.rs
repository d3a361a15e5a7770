//! Kitty exchange: pickup and the 4-card discard (40-card tables).

use tracing::debug;

use crate::domain::cards::{Card, Suit};
use crate::domain::state::{GameState, Phase, Seat};
use crate::errors::domain::{DomainError, ValidationKind};

/// The contract holder takes all four kitty cards into hand (temporarily 13).
pub fn take_kitty(state: &mut GameState, seat: Seat) -> Result<(), DomainError> {
    check_kitty_turn(state, seat)?;
    if state.round.kitty.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::NoKitty,
            "no kitty to take",
        ));
    }

    let kitty = std::mem::take(&mut state.round.kitty);
    let hand = &mut state.players[seat as usize].hand;
    hand.extend(kitty);
    hand.sort();
    state.round.kitty_taken = true;
    debug!(game_id = %state.id, seat, "kitty taken");
    Ok(())
}

/// Bury exactly four cards from hand and optionally re-declare trump.
/// Completing the discard moves the round into trick play.
pub fn discard_to_kitty(
    state: &mut GameState,
    seat: Seat,
    cards: &[Card],
    declared_trump: Option<Suit>,
) -> Result<(), DomainError> {
    check_kitty_turn(state, seat)?;
    if !state.round.kitty_taken {
        return Err(DomainError::validation(
            ValidationKind::NoKitty,
            "kitty has not been taken yet",
        ));
    }
    if cards.len() != 4 {
        return Err(DomainError::validation(
            ValidationKind::WrongDiscardCount,
            format!("must discard exactly 4 cards, got {}", cards.len()),
        ));
    }

    // Validate before mutating: every discard (with multiplicity) must be in hand.
    let hand = &state.players[seat as usize].hand;
    let mut remaining = hand.clone();
    for card in cards {
        match remaining.iter().position(|c| c == card) {
            Some(pos) => {
                remaining.remove(pos);
            }
            None => {
                return Err(DomainError::validation(
                    ValidationKind::CardNotInHand,
                    format!("card {card} is not in hand"),
                ));
            }
        }
    }

    state.players[seat as usize].hand = remaining;
    state.round.kitty_discards.extend_from_slice(cards);

    let contract = state.require_contract("kitty discard")?;
    let trump = declared_trump.unwrap_or(contract.suit);
    state.trump = Some(trump);
    state.phase = Phase::Playing;
    state.turn = Some(contract.seat);
    debug!(game_id = %state.id, seat, trump = ?trump, "kitty discard complete");
    Ok(())
}

fn check_kitty_turn(state: &GameState, seat: Seat) -> Result<(), DomainError> {
    if state.phase != Phase::KittyExchange {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("not in kitty exchange (phase is {:?})", state.phase),
        ));
    }
    let turn = state.require_turn("kitty exchange")?;
    if turn != seat {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("seat {turn} holds the contract, not seat {seat}"),
        ));
    }
    Ok(())
}
