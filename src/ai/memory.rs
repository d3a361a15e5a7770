//! Card tracking for the adaptive tier.
//!
//! A tracker is rebuilt from the view at every decision point: own hand
//! plus every card seen on the table this round. What is left over is the
//! pool of unseen cards the opponents and partner still hold.

use std::collections::HashSet;

use crate::domain::cards::{deck_for, Card, DeckVariant, Rank, Suit};
use crate::domain::player_view::PlayerView;

#[derive(Debug, Clone)]
pub struct CardTracker {
    variant: DeckVariant,
    seen: HashSet<Card>,
}

impl CardTracker {
    /// Track everything this seat has seen this round: its own hand, all
    /// completed tricks, and the trick in progress. Kitty cards stay
    /// unseen unless they passed through this seat's hand.
    pub fn from_view(view: &PlayerView) -> Self {
        let mut seen: HashSet<Card> = view.hand.iter().copied().collect();
        for trick in &view.tricks_seen {
            seen.extend(trick.plays.iter().map(|&(_, c)| c));
        }
        seen.extend(view.trick_plays.iter().map(|&(_, c)| c));
        Self {
            variant: view.deck_variant,
            seen,
        }
    }

    pub fn has_seen(&self, card: Card) -> bool {
        self.seen.contains(&card)
    }

    /// All cards of the deck not yet seen by this seat.
    pub fn unseen(&self) -> Vec<Card> {
        deck_for(self.variant)
            .into_iter()
            .filter(|c| !self.seen.contains(c))
            .collect()
    }

    pub fn unseen_in_suit(&self, suit: Suit) -> Vec<Card> {
        self.unseen().into_iter().filter(|c| c.suit == suit).collect()
    }

    pub fn highest_unseen(&self, suit: Suit) -> Option<Rank> {
        self.unseen_in_suit(suit).iter().map(|c| c.rank).max()
    }

    /// A card is "boss" when no unseen card of its suit outranks it.
    /// Trump context is the caller's concern; boss only compares in-suit.
    pub fn is_boss(&self, card: Card) -> bool {
        self.highest_unseen(card.suit)
            .map(|top| card.rank > top)
            .unwrap_or(true)
    }

    /// How many cards of `suit` are still unseen.
    pub fn remaining_in_suit(&self, suit: Suit) -> usize {
        self.unseen_in_suit(suit).len()
    }
}
