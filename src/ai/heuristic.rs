//! Heuristic: the easy/medium/hard bot tiers behind one deterministic core.
//!
//! Bidding:
//! - Estimate winnable card points from honors and suit length.
//! - Suggest a bid banded by that estimate (minimum 50, steps of 5).
//! - Never outbid the partner's standing contract; never exceed the tier's
//!   theoretical maximum (estimate + tier bonus).
//!
//! Play:
//! - Leading: a middling-value card, keeping winners back.
//! - Following: the cheapest card that beats the current best, else the
//!   lowest-value card.
//!
//! Determinism: no randomness. The tiers differ only in their profile.

use crate::ai::trait_def::{AiError, BidDecision, BotStrategy, KittyDecision};
use crate::config::BotSkill;
use crate::domain::cards::{card_points, Card, Rank, Suit};
use crate::domain::cards_logic::card_beats;
use crate::domain::dealing::KITTY_SIZE;
use crate::domain::player_view::PlayerView;

/// Tier knobs: how far past the hand estimate a tier dares to go.
#[derive(Debug, Clone, Copy)]
struct TierProfile {
    name: &'static str,
    bid_bonus: u16,
}

#[derive(Debug, Clone)]
pub struct Heuristic {
    profile: TierProfile,
}

impl Heuristic {
    pub const NAME: &'static str = "Heuristic";
    pub const VERSION: &'static str = "1.1.0";

    pub fn new(skill: BotSkill) -> Self {
        let profile = match skill {
            BotSkill::Easy => TierProfile {
                name: "easy",
                bid_bonus: 0,
            },
            BotSkill::Medium => TierProfile {
                name: "medium",
                bid_bonus: 5,
            },
            // Expert routes to the Strategist; treat it as hard if asked.
            BotSkill::Hard | BotSkill::Expert => TierProfile {
                name: "hard",
                bid_bonus: 10,
            },
        };
        Self { profile }
    }

    pub fn tier_name(&self) -> &'static str {
        self.profile.name
    }
}

/// Estimate of card points this hand can pull in, on the bid scale.
pub(crate) fn hand_value(hand: &[Card]) -> u16 {
    let mut value = 0u16;
    for c in hand {
        value += match c.rank {
            Rank::Ace => 12,
            Rank::Ten => 9,
            Rank::King => 8,
            Rank::Queen => 5,
            Rank::Jack => 3,
            Rank::Nine => 2,
            _ => 1,
        };
    }
    // Long-suit control: extra cards past three in the best suit.
    let longest = Suit::ALL
        .iter()
        .map(|&s| hand.iter().filter(|c| c.suit == s).count())
        .max()
        .unwrap_or(0);
    value + (longest.saturating_sub(3) as u16) * 4
}

/// Banded bid suggestion; None means the hand is not worth opening.
fn suggested_bid(value: u16) -> Option<u8> {
    match value {
        0..=44 => None,
        45..=54 => Some(50),
        55..=64 => Some(55),
        65..=74 => Some(60),
        75..=84 => Some(70),
        _ => Some(80),
    }
}

/// Preferred trump: the longest suit, points in suit as tiebreak.
pub(crate) fn preferred_suit(hand: &[Card]) -> Suit {
    Suit::ALL
        .iter()
        .copied()
        .max_by_key(|&s| {
            let cards: Vec<&Card> = hand.iter().filter(|c| c.suit == s).collect();
            let pts: u16 = cards.iter().map(|&&c| card_points(c)).sum();
            (cards.len(), pts)
        })
        .unwrap_or(Suit::Hearts)
}

/// Lowest-value card: fewest points first, then lowest rank.
pub(crate) fn cheapest(cards: &[Card]) -> Option<Card> {
    cards
        .iter()
        .copied()
        .min_by_key(|&c| (card_points(c), c.rank))
}

/// Cheapest card in `cards` that beats the current best play, if any.
pub(crate) fn cheapest_winner(
    cards: &[Card],
    best: Card,
    lead: Suit,
    trump: Suit,
) -> Option<Card> {
    cards
        .iter()
        .copied()
        .filter(|&c| card_beats(c, best, lead, trump))
        .min_by_key(|&c| (card_points(c), c.rank))
}

impl BotStrategy for Heuristic {
    fn choose_bid(&self, view: &PlayerView) -> Result<BidDecision, AiError> {
        // Never bid over the partner.
        if view.partner_holds_contract() {
            return Ok(BidDecision::Pass);
        }

        let value = hand_value(&view.hand);
        let Some(suggestion) = suggested_bid(value) else {
            return Ok(BidDecision::Pass);
        };

        let theoretical_max = ((value + self.profile.bid_bonus) / 5 * 5).min(100) as u8;
        let points = suggestion.max(view.min_bid);
        if points > theoretical_max || points > 100 {
            return Ok(BidDecision::Pass);
        }

        Ok(BidDecision::Bid {
            points,
            suit: preferred_suit(&view.hand),
        })
    }

    fn choose_kitty(&self, view: &PlayerView) -> Result<KittyDecision, AiError> {
        let trump = view
            .contract
            .map(|c| c.suit)
            .ok_or_else(|| AiError::Internal("kitty decision without a contract".into()))?;

        // Bury the cheapest off-trump cards; discarded points feed the
        // defenders, so point cards stay in hand whenever possible.
        let mut candidates: Vec<Card> = view.hand.iter().copied().collect();
        candidates.sort_by_key(|&c| (c.suit == trump, card_points(c), c.rank));
        let discards: Vec<Card> = candidates.into_iter().take(KITTY_SIZE).collect();
        if discards.len() != KITTY_SIZE {
            return Err(AiError::Internal(format!(
                "expected a 13-card hand at kitty discard, got {}",
                view.hand.len()
            )));
        }
        Ok(KittyDecision {
            discards,
            trump: None,
        })
    }

    fn choose_play(&self, view: &PlayerView) -> Result<Card, AiError> {
        let legal = &view.legal_plays;
        if legal.is_empty() {
            return Err(AiError::Internal("no legal plays".into()));
        }

        // Leading: middling value, save winners for later.
        if view.trick_position() == 0 {
            let mut sorted = legal.clone();
            sorted.sort_by_key(|&c| (card_points(c), c.rank));
            return Ok(sorted[sorted.len() / 2]);
        }

        let trump = view
            .trump
            .ok_or_else(|| AiError::Internal("playing without trump".into()))?;
        let lead = view
            .trick_lead
            .ok_or_else(|| AiError::Internal("following without a lead".into()))?;
        let best = view
            .current_best_play()
            .ok_or_else(|| AiError::Internal("following an empty trick".into()))?;

        if let Some(winner) = cheapest_winner(legal, best.1, lead, trump) {
            return Ok(winner);
        }
        cheapest(legal).ok_or_else(|| AiError::Internal("no legal plays".into()))
    }
}
