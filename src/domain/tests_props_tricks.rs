//! Property tests for trick resolution and card legality (pure domain).
//!
//! Properties:
//! - the resolved winner played a card no other play beats
//! - exactly one winner exists for any complete trick
//! - `card_beats` is asymmetric for distinct cards
//! - legal moves are a subset of the hand and follow the lead when possible
//! - a deal partitions the deck and conserves the 100 card points

use proptest::prelude::*;

use crate::domain::cards::{card_points, deck_for, Card, DeckVariant};
use crate::domain::cards_logic::{card_beats, hand_has_suit, points_in};
use crate::domain::dealing::deal_round;
use crate::domain::state::RoundState;
use crate::domain::test_gens;
use crate::domain::test_state_helpers::playing_game;
use crate::domain::tricks::{legal_moves, resolve_current_trick};

proptest! {
    #[test]
    fn prop_winner_is_unbeaten(
        (_leader, plays, trump) in test_gens::complete_trick(),
    ) {
        let lead = plays[0].1.suit;
        let mut round = RoundState::empty();
        round.trick_plays = plays.clone();
        round.trick_lead = Some(lead);

        let winner = resolve_current_trick(&round, trump).expect("complete trick must resolve");
        let winning_card = plays
            .iter()
            .find(|&&(seat, _)| seat == winner)
            .map(|&(_, card)| card)
            .expect("winner must have played");

        for &(seat, card) in &plays {
            if seat != winner {
                prop_assert!(
                    !card_beats(card, winning_card, lead, trump),
                    "{card} beats the winning {winning_card} (lead {lead:?}, trump {trump:?})"
                );
            }
        }
    }

    #[test]
    fn prop_exactly_one_unbeaten_play(
        (_leader, plays, trump) in test_gens::complete_trick(),
    ) {
        let lead = plays[0].1.suit;
        let unbeaten: Vec<Card> = plays
            .iter()
            .map(|&(_, card)| card)
            .filter(|&candidate| {
                plays
                    .iter()
                    .all(|&(_, other)| other == candidate || !card_beats(other, candidate, lead, trump))
            })
            .collect();
        prop_assert_eq!(unbeaten.len(), 1, "ties are impossible: {:?}", unbeaten);
    }

    #[test]
    fn prop_card_beats_is_asymmetric(
        a in test_gens::card(),
        b in test_gens::card(),
        lead in test_gens::suit(),
        trump in test_gens::suit(),
    ) {
        prop_assume!(a != b);
        prop_assert!(!(card_beats(a, b, lead, trump) && card_beats(b, a, lead, trump)));
    }

    #[test]
    fn prop_legal_moves_follow_the_lead(
        hands in test_gens::four_equal_hands(),
        lead in test_gens::suit(),
        trump in test_gens::suit(),
        seat in test_gens::seat(),
    ) {
        let mut state = playing_game(hands, trump, 0, 50, seat);
        state.round.trick_lead = Some(lead);
        // Someone must already have played for a lead to exist.
        state.round.trick_plays.push((0, state.hand(0)[0]));

        let legal = legal_moves(&state, seat);
        let hand = state.hand(seat);
        prop_assert!(legal.iter().all(|c| hand.contains(c)));
        if hand_has_suit(hand, lead) {
            prop_assert!(!legal.is_empty());
            prop_assert!(legal.iter().all(|c| c.suit == lead));
        } else {
            prop_assert_eq!(legal.len(), hand.len());
        }
    }

    #[test]
    fn prop_deal_partitions_the_deck(
        variant in test_gens::deck_variant(),
        with_kitty in any::<bool>(),
        seed in any::<u64>(),
    ) {
        // The kitty exists only on 40-card tables.
        prop_assume!(variant == DeckVariant::Forty || !with_kitty);
        let deal = deal_round(variant, with_kitty, seed);

        let mut all: Vec<Card> = deal.hands.iter().flatten().copied().collect();
        all.extend(deal.kitty.iter().copied());
        let dealt_points: u16 = all.iter().map(|&c| card_points(c)).sum();

        let mut deck = deck_for(variant);
        prop_assert_eq!(all.len(), deck.len());
        all.sort();
        deck.sort();
        prop_assert_eq!(all, deck);
        prop_assert_eq!(dealt_points, points_in(&deck_for(variant)));
        prop_assert_eq!(dealt_points, 100);
    }
}
