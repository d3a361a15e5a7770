//! Unit tests for trick play.

use crate::domain::bidding::{pass_bid, place_bid};
use crate::domain::cards::{Card, DeckVariant, Rank, Suit};
use crate::domain::dealing::deal_round;
use crate::domain::state::Phase;
use crate::domain::test_state_helpers::{bidding_game, playing_game};
use crate::domain::tricks::{legal_moves, play_card};
use crate::errors::domain::{DomainError, ValidationKind};

fn c(suit: Suit, rank: Rank) -> Card {
    Card::new(suit, rank)
}

fn assert_validation(err: DomainError, kind: ValidationKind) {
    match err {
        DomainError::Validation(k, _) => assert_eq!(k, kind),
        other => panic!("expected validation {kind:?}, got {other:?}"),
    }
}

/// Two-card hands, spades trump, seat 0 holding 50 and leading.
fn small_game() -> crate::domain::state::GameState {
    playing_game(
        [
            vec![c(Suit::Hearts, Rank::Ace), c(Suit::Spades, Rank::Seven)],
            vec![c(Suit::Hearts, Rank::King), c(Suit::Clubs, Rank::Nine)],
            vec![c(Suit::Hearts, Rank::Ten), c(Suit::Diamonds, Rank::Five)],
            vec![c(Suit::Spades, Rank::Ace), c(Suit::Clubs, Rank::Five)],
        ],
        Suit::Spades,
        0,
        50,
        0,
    )
}

#[test]
fn first_card_establishes_the_lead() {
    let mut state = small_game();
    let result = play_card(&mut state, 0, c(Suit::Hearts, Rank::Ace)).unwrap();
    assert!(!result.trick_completed);
    assert_eq!(state.round.trick_lead, Some(Suit::Hearts));
    assert_eq!(state.turn, Some(1));
    assert_eq!(state.hand(0).len(), 1);
}

#[test]
fn following_suit_is_enforced() {
    let mut state = small_game();
    play_card(&mut state, 0, c(Suit::Hearts, Rank::Ace)).unwrap();
    // Seat 1 holds a heart and may not dump the club.
    let err = play_card(&mut state, 1, c(Suit::Clubs, Rank::Nine)).unwrap_err();
    assert_validation(err, ValidationKind::MustFollowSuit);
    play_card(&mut state, 1, c(Suit::Hearts, Rank::King)).unwrap();
}

#[test]
fn void_seats_may_play_anything() {
    let mut state = small_game();
    play_card(&mut state, 0, c(Suit::Hearts, Rank::Ace)).unwrap();
    play_card(&mut state, 1, c(Suit::Hearts, Rank::King)).unwrap();
    play_card(&mut state, 2, c(Suit::Hearts, Rank::Ten)).unwrap();
    // Seat 3 has no hearts; trumping in is legal.
    let result = play_card(&mut state, 3, c(Suit::Spades, Rank::Ace)).unwrap();
    assert!(result.trick_completed);
    assert_eq!(result.trick_winner, Some(3));
}

#[test]
fn trick_winner_leads_the_next_trick() {
    let mut state = small_game();
    play_card(&mut state, 0, c(Suit::Hearts, Rank::Ace)).unwrap();
    play_card(&mut state, 1, c(Suit::Hearts, Rank::King)).unwrap();
    play_card(&mut state, 2, c(Suit::Hearts, Rank::Ten)).unwrap();
    let result = play_card(&mut state, 3, c(Suit::Spades, Rank::Ace)).unwrap();

    // Ace (10) + ten (10) banked for team 1.
    assert_eq!(result.trick_points, 20);
    assert_eq!(state.round.team_points, [0, 20]);
    assert_eq!(state.turn, Some(3));
    assert_eq!(state.round.completed_tricks.len(), 1);
    assert!(state.round.trick_plays.is_empty());
    assert!(!result.round_over);
}

#[test]
fn highest_lead_card_wins_without_trump() {
    let mut state = small_game();
    play_card(&mut state, 0, c(Suit::Hearts, Rank::Ace)).unwrap();
    play_card(&mut state, 1, c(Suit::Hearts, Rank::King)).unwrap();
    play_card(&mut state, 2, c(Suit::Hearts, Rank::Ten)).unwrap();
    // Discarding off-suit (not trump) never wins.
    let result = play_card(&mut state, 3, c(Suit::Clubs, Rank::Five)).unwrap();
    assert_eq!(result.trick_winner, Some(0));
    // Ace + ten + the club five banked together.
    assert_eq!(result.trick_points, 25);
}

#[test]
fn last_trick_of_the_round_reports_round_over() {
    let mut state = playing_game(
        [
            vec![c(Suit::Hearts, Rank::Ace)],
            vec![c(Suit::Hearts, Rank::King)],
            vec![c(Suit::Hearts, Rank::Ten)],
            vec![c(Suit::Hearts, Rank::Nine)],
        ],
        Suit::Spades,
        0,
        50,
        0,
    );
    play_card(&mut state, 0, c(Suit::Hearts, Rank::Ace)).unwrap();
    play_card(&mut state, 1, c(Suit::Hearts, Rank::King)).unwrap();
    play_card(&mut state, 2, c(Suit::Hearts, Rank::Ten)).unwrap();
    let result = play_card(&mut state, 3, c(Suit::Hearts, Rank::Nine)).unwrap();
    assert!(result.round_over);
    assert_eq!(result.trick_winner, Some(0));
}

#[test]
fn legal_moves_filters_to_the_lead_suit() {
    let mut state = small_game();
    play_card(&mut state, 0, c(Suit::Hearts, Rank::Ace)).unwrap();
    assert_eq!(legal_moves(&state, 1), vec![c(Suit::Hearts, Rank::King)]);
    // Seat 3 is void in hearts: whole hand is legal.
    assert_eq!(legal_moves(&state, 3).len(), 2);
}

#[test]
fn playing_out_of_turn_is_rejected() {
    let mut state = small_game();
    let err = play_card(&mut state, 2, c(Suit::Hearts, Rank::Ten)).unwrap_err();
    assert_validation(err, ValidationKind::OutOfTurn);
}

#[test]
fn playing_a_card_you_do_not_hold_is_rejected() {
    let mut state = small_game();
    let err = play_card(&mut state, 0, c(Suit::Diamonds, Rank::Ace)).unwrap_err();
    assert_validation(err, ValidationKind::CardNotInHand);
}

#[test]
fn playing_outside_the_playing_phase_is_rejected() {
    let mut state = small_game();
    state.phase = Phase::Bidding;
    let err = play_card(&mut state, 0, c(Suit::Hearts, Rank::Ace)).unwrap_err();
    assert_validation(err, ValidationKind::PhaseMismatch);
}

#[test]
fn unbalanced_hands_break_the_round_invariant() {
    let mut state = small_game();
    state.players[2].hand.pop();
    let err = play_card(&mut state, 0, c(Suit::Hearts, Rank::Ace)).unwrap_err();
    assert!(err.is_fatal());
}

#[test]
fn vanished_points_break_the_round_invariant() {
    let mut state = small_game();
    // Hand sizes stay balanced, but ten card points leak out of the round.
    state.players[2].hand[0] = c(Suit::Hearts, Rank::Seven);
    let err = play_card(&mut state, 0, c(Suit::Hearts, Rank::Ace)).unwrap_err();
    assert!(err.is_fatal());
}

#[test]
fn a_played_out_round_conserves_dealt_points() {
    let deal = deal_round(DeckVariant::ThirtySix, false, 17);
    let mut state = bidding_game(deal.hands);
    place_bid(&mut state, 1, 50, Suit::Hearts).unwrap();
    pass_bid(&mut state, 2).unwrap();
    pass_bid(&mut state, 3).unwrap();
    pass_bid(&mut state, 0).unwrap();
    assert_eq!(state.phase, Phase::Playing);
    assert_eq!(state.round.dealt_points, 100);

    // Conservation is re-checked at the start of every trick.
    loop {
        let seat = state.turn.unwrap();
        let card = legal_moves(&state, seat)[0];
        let result = play_card(&mut state, seat, card).unwrap();
        if result.round_over {
            break;
        }
    }
    let banked: u16 = state.round.team_points.iter().sum();
    assert_eq!(banked, 100);
}
