//! Unit tests for round scoring, the shutout rule and game-end detection.

use crate::domain::cards::{Card, Rank, Suit};
use crate::domain::scoring::score_round;
use crate::domain::state::GameState;
use crate::domain::test_state_helpers::playing_game;

/// Finished round skeleton: seat 0 holds `contract_points` in spades and
/// the two teams banked the given card points.
fn scored_game(contract_points: u8, team_points: [u16; 2]) -> GameState {
    let mut state = playing_game(
        [vec![], vec![], vec![], vec![]],
        Suit::Spades,
        0,
        contract_points,
        0,
    );
    state.round.team_points = team_points;
    state
}

#[test]
fn made_contract_banks_card_points() {
    let mut state = scored_game(60, [65, 35]);
    let score = score_round(&mut state).unwrap();
    assert!(score.contract_made);
    assert_eq!(score.contractor_delta, 65);
    assert_eq!(score.defender_delta, 35);
    assert_eq!(state.scores, [65, 35]);
    assert!(score.game_winner.is_none());
}

#[test]
fn failed_contract_costs_its_full_value() {
    let mut state = scored_game(60, [45, 55]);
    let score = score_round(&mut state).unwrap();
    assert!(!score.contract_made);
    assert_eq!(score.contractor_delta, -60);
    assert_eq!(state.scores, [-60, 55]);
}

#[test]
fn exact_contract_points_suffice() {
    let mut state = scored_game(60, [60, 40]);
    let score = score_round(&mut state).unwrap();
    assert!(score.contract_made);
    assert_eq!(score.contractor_delta, 60);
}

#[test]
fn shutout_strips_a_silent_rich_defense() {
    let mut state = scored_game(60, [70, 30]);
    state.scores = [0, 120];
    // Defenders are over 100 and never bid this round.
    state.round.team_bid = [true, false];
    let score = score_round(&mut state).unwrap();
    assert!(score.shutout);
    assert_eq!(score.defender_delta, 0);
    assert_eq!(state.scores, [70, 120]);
}

#[test]
fn bidding_lifts_the_shutout() {
    let mut state = scored_game(60, [70, 30]);
    state.scores = [0, 120];
    state.round.team_bid = [true, true];
    let score = score_round(&mut state).unwrap();
    assert!(!score.shutout);
    assert_eq!(score.defender_delta, 30);
}

#[test]
fn kitty_discards_always_score_for_the_defenders() {
    let mut state = scored_game(60, [70, 20]);
    // Ten points buried by the contract holder.
    state.round.kitty_discards = vec![
        Card::new(Suit::Hearts, Rank::Ten),
        Card::new(Suit::Clubs, Rank::Seven),
        Card::new(Suit::Clubs, Rank::Eight),
        Card::new(Suit::Clubs, Rank::Nine),
    ];
    let score = score_round(&mut state).unwrap();
    assert_eq!(score.kitty_points, 10);
    assert_eq!(score.defender_delta, 30);
    assert_eq!(state.scores, [70, 30]);
}

#[test]
fn buried_points_reach_even_a_shutout_defense() {
    let mut state = scored_game(60, [70, 30]);
    state.scores = [0, 120];
    state.round.team_bid = [true, false];
    state.round.kitty_discards = vec![
        Card::new(Suit::Hearts, Rank::Five),
        Card::new(Suit::Clubs, Rank::Seven),
        Card::new(Suit::Clubs, Rank::Eight),
        Card::new(Suit::Clubs, Rank::Nine),
    ];
    let score = score_round(&mut state).unwrap();
    assert!(score.shutout);
    assert_eq!(score.defender_delta, 5);
}

#[test]
fn reaching_the_target_wins_the_game() {
    let mut state = scored_game(60, [65, 35]);
    state.scores = [140, 0];
    let score = score_round(&mut state).unwrap();
    assert_eq!(score.game_winner, Some(0));
    assert_eq!(state.scores[0], 205);
}

#[test]
fn busting_hands_the_game_to_the_opponents() {
    let mut state = scored_game(100, [40, 60]);
    state.scores = [-150, 30];
    let score = score_round(&mut state).unwrap();
    assert_eq!(state.scores[0], -250);
    assert_eq!(score.game_winner, Some(1));
}

#[test]
fn higher_total_wins_when_both_teams_cross() {
    let mut state = scored_game(60, [60, 40]);
    state.scores = [150, 170];
    let score = score_round(&mut state).unwrap();
    assert_eq!(state.scores, [210, 210]);
    // Dead tie across the line goes to the contractors.
    assert_eq!(score.game_winner, Some(0));

    let mut state = scored_game(60, [60, 40]);
    state.scores = [150, 180];
    let score = score_round(&mut state).unwrap();
    assert_eq!(state.scores, [210, 220]);
    assert_eq!(score.game_winner, Some(1));
}

#[test]
fn scoring_without_a_contract_is_fatal() {
    let mut state = scored_game(60, [60, 40]);
    state.contract = None;
    let err = score_round(&mut state).unwrap_err();
    assert!(err.is_fatal());
}
