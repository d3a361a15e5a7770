// Proptest generators for domain types.
// Unique-card generators draw from a real deck so dealt shapes stay valid.

use proptest::prelude::*;

use crate::domain::cards::{deck_for, Card, DeckVariant, Rank, Suit};
use crate::domain::state::Seat;

pub fn suit() -> impl Strategy<Value = Suit> {
    prop_oneof![
        Just(Suit::Hearts),
        Just(Suit::Diamonds),
        Just(Suit::Clubs),
        Just(Suit::Spades),
    ]
}

/// A rank valid in the 36-card deck (no sixes).
pub fn rank() -> impl Strategy<Value = Rank> {
    prop_oneof![
        Just(Rank::Five),
        Just(Rank::Seven),
        Just(Rank::Eight),
        Just(Rank::Nine),
        Just(Rank::Ten),
        Just(Rank::Jack),
        Just(Rank::Queen),
        Just(Rank::King),
        Just(Rank::Ace),
    ]
}

pub fn card() -> impl Strategy<Value = Card> {
    (suit(), rank()).prop_map(|(suit, rank)| Card::new(suit, rank))
}

pub fn deck_variant() -> impl Strategy<Value = DeckVariant> {
    prop_oneof![Just(DeckVariant::ThirtySix), Just(DeckVariant::Forty)]
}

pub fn seat() -> impl Strategy<Value = Seat> {
    0u8..=3u8
}

/// `count` unique cards from the 36-card deck, random order.
pub fn unique_cards(count: usize) -> impl Strategy<Value = Vec<Card>> {
    Just(()).prop_perturb(move |_, mut rng| {
        let mut deck = deck_for(DeckVariant::ThirtySix);
        for i in 0..count.min(deck.len()) {
            let j = rng.random_range(i..deck.len());
            deck.swap(i, j);
        }
        deck.truncate(count);
        deck
    })
}

/// Four disjoint hands of equal size (1 to 9 cards each).
pub fn four_equal_hands() -> impl Strategy<Value = [Vec<Card>; 4]> {
    (1usize..=9usize)
        .prop_flat_map(|per_hand| unique_cards(per_hand * 4))
        .prop_map(|cards| {
            let mut hands: [Vec<Card>; 4] = [vec![], vec![], vec![], vec![]];
            for (i, card) in cards.into_iter().enumerate() {
                hands[i % 4].push(card);
            }
            hands
        })
}

/// A complete trick: leader seat, four unique plays in rotation order,
/// and a trump suit.
pub fn complete_trick() -> impl Strategy<Value = (Seat, Vec<(Seat, Card)>, Suit)> {
    (seat(), unique_cards(4), suit()).prop_map(|(leader, cards, trump)| {
        let plays: Vec<(Seat, Card)> = cards
            .iter()
            .enumerate()
            .map(|(i, &card)| (((leader as usize + i) % 4) as Seat, card))
            .collect();
        (leader, plays, trump)
    })
}
