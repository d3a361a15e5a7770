//! Trick play: legality filtering, winner determination, point credit.

use tracing::debug;

use crate::domain::cards::{Card, Suit};
use crate::domain::cards_logic::{card_beats, hand_has_suit, points_in};
use crate::domain::state::{
    next_seat, team_of, GameState, Phase, RoundState, Seat, CompletedTrick, SEATS,
};
use crate::errors::domain::{DomainError, ValidationKind};

/// Result of playing a card, describing what state changes occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayCardResult {
    /// Whether a trick was completed (4 cards played).
    pub trick_completed: bool,
    /// Winner of the completed trick, if one was completed.
    pub trick_winner: Option<Seat>,
    /// Card points in the completed trick.
    pub trick_points: u16,
    /// All hands are empty: the round is over and must be scored.
    pub round_over: bool,
}

/// Compute legal cards the seat may play, independent of turn enforcement.
/// Lead suit must be followed when the hand holds it; otherwise anything
/// (including trump) goes.
pub fn legal_moves(state: &GameState, seat: Seat) -> Vec<Card> {
    if state.phase != Phase::Playing {
        return Vec::new();
    }

    let hand = state.hand(seat);
    if hand.is_empty() {
        return Vec::new();
    }

    if let Some(lead) = state.round.trick_lead {
        if hand_has_suit(hand, lead) {
            let mut v: Vec<Card> = hand.iter().copied().filter(|c| c.suit == lead).collect();
            v.sort();
            return v;
        }
    }

    let mut any = hand.to_vec();
    any.sort();
    any
}

/// Play a card into the current trick, enforcing turn, suit-following and
/// phase identically for human and bot submissions.
pub fn play_card(
    state: &mut GameState,
    seat: Seat,
    card: Card,
) -> Result<PlayCardResult, DomainError> {
    if state.phase != Phase::Playing {
        return Err(DomainError::validation(
            ValidationKind::PhaseMismatch,
            format!("not in trick play (phase is {:?})", state.phase),
        ));
    }
    let turn = state.require_turn("play_card")?;
    if turn != seat {
        return Err(DomainError::validation(
            ValidationKind::OutOfTurn,
            format!("seat {turn} is expected to play, not seat {seat}"),
        ));
    }
    state.require_trump("play_card")?;

    // Equal hand sizes and no leaked card points whenever a trick opens.
    if state.round.trick_plays.is_empty() {
        state.check_hand_balance()?;
        state.check_point_conservation()?;
    }

    let pos = state.hand(seat).iter().position(|&c| c == card);
    let Some(pos) = pos else {
        if state.hand(seat).is_empty() {
            return Err(DomainError::validation(
                ValidationKind::CardNotInHand,
                "no cards left to play",
            ));
        }
        return Err(DomainError::validation(
            ValidationKind::CardNotInHand,
            format!("card {card} is not in hand"),
        ));
    };

    let legal = legal_moves(state, seat);
    if !legal.contains(&card) {
        return Err(DomainError::validation(
            ValidationKind::MustFollowSuit,
            "must follow the lead suit",
        ));
    }

    // First play of the trick sets the lead.
    if state.round.trick_plays.is_empty() {
        state.round.trick_lead = Some(card.suit);
    }

    let removed = state.players[seat as usize].hand.remove(pos);
    state.round.trick_plays.push((seat, removed));
    state.turn = Some(next_seat(seat));

    let trick_completed = state.round.trick_plays.len() == SEATS;
    let mut result = PlayCardResult {
        trick_completed,
        trick_winner: None,
        trick_points: 0,
        round_over: false,
    };

    if !trick_completed {
        return Ok(result);
    }

    // Resolve the completed trick: winner's team banks the points and
    // leads the next trick (the one exception to seat rotation).
    let trump = state.require_trump("trick resolution")?;
    let winner = resolve_current_trick(&state.round, trump).ok_or_else(|| {
        DomainError::invariant("completed trick failed to resolve a winner")
    })?;

    let cards: Vec<Card> = state.round.trick_plays.iter().map(|&(_, c)| c).collect();
    let trick_points = points_in(&cards);
    state.round.team_points[team_of(winner) as usize] += trick_points;
    state.round.completed_tricks.push(CompletedTrick {
        plays: std::mem::take(&mut state.round.trick_plays),
        winner,
        points: trick_points,
    });
    state.round.trick_lead = None;
    state.turn = Some(winner);

    result.trick_winner = Some(winner);
    result.trick_points = trick_points;
    result.round_over = state.players.iter().all(|p| p.hand.is_empty());
    debug!(
        game_id = %state.id,
        winner,
        points = trick_points,
        round_over = result.round_over,
        "trick resolved"
    );
    Ok(result)
}

/// Winner of the current trick if it is complete.
pub fn resolve_current_trick(round: &RoundState, trump: Suit) -> Option<Seat> {
    if round.trick_plays.len() < SEATS {
        return None;
    }
    let lead = round.trick_lead?;

    let mut best_idx = 0usize;
    for i in 1..SEATS {
        let (_, card_i) = round.trick_plays[i];
        let (_, card_best) = round.trick_plays[best_idx];
        if card_beats(card_i, card_best, lead, trump) {
            best_idx = i;
        }
    }
    Some(round.trick_plays[best_idx].0)
}
