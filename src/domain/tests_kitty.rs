//! Unit tests for the kitty exchange.

use crate::config::TableConfig;
use crate::domain::cards::{Card, DeckVariant, Suit};
use crate::domain::dealing::{deal_round, HAND_SIZE, KITTY_SIZE};
use crate::domain::kitty::{discard_to_kitty, take_kitty};
use crate::domain::state::{Contract, GameState, Phase};
use crate::domain::test_state_helpers::bidding_game_with;
use crate::errors::domain::{DomainError, ValidationKind};

const HOLDER: u8 = 1;

/// A 40-card table stopped at the kitty exchange, seat 1 holding 60 clubs.
fn kitty_game(seed: u64) -> GameState {
    let config = TableConfig {
        deck_variant: DeckVariant::Forty,
        has_kitty: true,
        ..TableConfig::default()
    };
    let deal = deal_round(DeckVariant::Forty, true, seed);
    let mut state = bidding_game_with(config, deal.hands);
    state.round.kitty = deal.kitty;
    state.round.dealt_points = 100;
    state.contract = Some(Contract {
        seat: HOLDER,
        points: 60,
        suit: Suit::Clubs,
    });
    state.round.team_bid[1] = true;
    state.trump = Some(Suit::Clubs);
    state.phase = Phase::KittyExchange;
    state.turn = Some(HOLDER);
    state
}

fn assert_validation(err: DomainError, kind: ValidationKind) {
    match err {
        DomainError::Validation(k, _) => assert_eq!(k, kind),
        other => panic!("expected validation {kind:?}, got {other:?}"),
    }
}

#[test]
fn pickup_grows_the_hand_to_thirteen() {
    let mut state = kitty_game(3);
    take_kitty(&mut state, HOLDER).unwrap();
    assert_eq!(state.hand(HOLDER).len(), HAND_SIZE + KITTY_SIZE);
    assert!(state.round.kitty.is_empty());
    assert!(state.round.kitty_taken);
    // Hand stays sorted after the merge.
    let hand = state.hand(HOLDER);
    assert!(hand.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn only_the_holder_may_touch_the_kitty() {
    let mut state = kitty_game(3);
    let err = take_kitty(&mut state, 2).unwrap_err();
    assert_validation(err, ValidationKind::OutOfTurn);
}

#[test]
fn pickup_requires_the_exchange_phase() {
    let mut state = kitty_game(3);
    state.phase = Phase::Playing;
    let err = take_kitty(&mut state, HOLDER).unwrap_err();
    assert_validation(err, ValidationKind::PhaseMismatch);
}

#[test]
fn discard_before_pickup_is_rejected() {
    let mut state = kitty_game(3);
    let cards: Vec<Card> = state.hand(HOLDER)[..KITTY_SIZE].to_vec();
    let err = discard_to_kitty(&mut state, HOLDER, &cards, None).unwrap_err();
    assert_validation(err, ValidationKind::NoKitty);
}

#[test]
fn discard_must_be_exactly_four_cards() {
    let mut state = kitty_game(3);
    take_kitty(&mut state, HOLDER).unwrap();
    let cards: Vec<Card> = state.hand(HOLDER)[..3].to_vec();
    let err = discard_to_kitty(&mut state, HOLDER, &cards, None).unwrap_err();
    assert_validation(err, ValidationKind::WrongDiscardCount);
}

#[test]
fn discards_must_come_from_the_enlarged_hand() {
    let mut state = kitty_game(3);
    take_kitty(&mut state, HOLDER).unwrap();
    // A card someone else holds cannot be buried.
    let mut cards: Vec<Card> = state.hand(HOLDER)[..3].to_vec();
    cards.push(state.hand(2)[0]);
    let err = discard_to_kitty(&mut state, HOLDER, &cards, None).unwrap_err();
    assert_validation(err, ValidationKind::CardNotInHand);
    // Nothing was mutated by the failed attempt.
    assert_eq!(state.hand(HOLDER).len(), HAND_SIZE + KITTY_SIZE);
    assert!(state.round.kitty_discards.is_empty());
}

#[test]
fn completed_discard_starts_trick_play() {
    let mut state = kitty_game(3);
    take_kitty(&mut state, HOLDER).unwrap();
    let cards: Vec<Card> = state.hand(HOLDER)[..KITTY_SIZE].to_vec();
    discard_to_kitty(&mut state, HOLDER, &cards, None).unwrap();

    assert_eq!(state.hand(HOLDER).len(), HAND_SIZE);
    assert_eq!(state.round.kitty_discards, cards);
    assert_eq!(state.phase, Phase::Playing);
    assert_eq!(state.turn, Some(HOLDER));
    // No re-declaration keeps the contract suit as trump.
    assert_eq!(state.trump, Some(Suit::Clubs));
}

#[test]
fn holder_may_redeclare_trump_at_discard() {
    let mut state = kitty_game(3);
    take_kitty(&mut state, HOLDER).unwrap();
    let cards: Vec<Card> = state.hand(HOLDER)[..KITTY_SIZE].to_vec();
    discard_to_kitty(&mut state, HOLDER, &cards, Some(Suit::Hearts)).unwrap();
    assert_eq!(state.trump, Some(Suit::Hearts));
    // The contract itself keeps its original suit on record.
    assert_eq!(state.contract.unwrap().suit, Suit::Clubs);
}

#[test]
fn kitty_cards_themselves_may_be_buried() {
    let mut state = kitty_game(9);
    let kitty_cards = state.round.kitty.clone();
    take_kitty(&mut state, HOLDER).unwrap();
    discard_to_kitty(&mut state, HOLDER, &kitty_cards, None).unwrap();
    assert_eq!(state.round.kitty_discards, kitty_cards);
    assert_eq!(state.hand(HOLDER).len(), HAND_SIZE);
}
