//! Seeded shuffling and dealing for both deck variants.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

use crate::domain::cards::{deck_for, Card, DeckVariant};
use crate::domain::state::SEATS;

pub const HAND_SIZE: usize = 9;
pub const KITTY_SIZE: usize = 4;

/// Result of one deal: four sorted hands plus the kitty (empty without one).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    pub hands: [Vec<Card>; SEATS],
    pub kitty: Vec<Card>,
}

/// Deal a round deterministically from a seed. Every card of the deck is
/// dealt, whatever the variant.
///
/// Without a kitty the deck splits evenly: 9 cards each from 36, 10 each
/// from 40. Kitty tables follow the table deal pattern: 3 to each player,
/// 2 to the kitty, 3 each, 2 to the kitty, 3 each, ending with 9 per hand
/// and 4 in the kitty.
pub fn deal_round(variant: DeckVariant, with_kitty: bool, seed: u64) -> Deal {
    let mut deck = deck_for(variant);
    let mut rng = ChaCha12Rng::seed_from_u64(seed);
    deck.shuffle(&mut rng);

    let mut hands: [Vec<Card>; SEATS] = Default::default();
    let mut kitty = Vec::with_capacity(KITTY_SIZE);
    let per_hand = (deck.len() - if with_kitty { KITTY_SIZE } else { 0 }) / SEATS;
    let mut next = deck.into_iter();

    if with_kitty {
        debug_assert_eq!(variant, DeckVariant::Forty);
        for packet in 0..3 {
            for hand in hands.iter_mut() {
                hand.extend(next.by_ref().take(3));
            }
            if packet < 2 {
                kitty.extend(next.by_ref().take(2));
            }
        }
    } else {
        for hand in hands.iter_mut() {
            hand.extend(next.by_ref().take(per_hand));
        }
    }

    for hand in hands.iter_mut() {
        hand.sort();
    }
    Deal { hands, kitty }
}
