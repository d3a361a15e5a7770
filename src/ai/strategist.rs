//! Strategist: the adaptive, card-tracking bot tier.
//!
//! Rebuilds a `CardTracker` from the view at every decision, values hands
//! with trump and distribution bonuses on top of raw card points, and
//! classifies each trick into a goal before picking a card:
//!
//! - `WinTrick`: the trick matters; win it as cheaply as certainty allows.
//! - `LoseTrick`: duck and keep winners back.
//! - `ConserveTrump`: stay out of the trick without spending trump.
//! - `SignalPartner`: the partner has the trick; feed it points.
//! - `Default`: nothing at stake; play like the heuristic tier.
//!
//! One strategy, one signature: the goal selector is internal policy, not
//! a type hierarchy.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ai::heuristic::{cheapest, cheapest_winner, preferred_suit};
use crate::ai::memory::CardTracker;
use crate::ai::trait_def::{AiError, BidDecision, BotStrategy, KittyDecision};
use crate::domain::cards::{card_points, Card, Rank, Suit};
use crate::domain::dealing::KITTY_SIZE;
use crate::domain::player_view::PlayerView;
use crate::domain::state::team_of;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrickGoal {
    WinTrick,
    LoseTrick,
    ConserveTrump,
    SignalPartner,
    Default,
}

pub struct Strategist {
    rng: Mutex<StdRng>,
}

impl Strategist {
    pub const NAME: &'static str = "Strategist";
    pub const VERSION: &'static str = "1.0.0";

    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Hand valuation: raw card points, plus control in the would-be trump
    /// suit, plus distribution (voids and singletons ruff for free).
    fn evaluate_hand(hand: &[Card], trump: Suit) -> u16 {
        let mut value = 0u16;
        let mut trump_count = 0u16;
        let mut suit_counts = [0usize; 4];
        for c in hand {
            value += card_points(*c);
            value += match c.rank {
                Rank::Ace => 4,
                Rank::King => 3,
                Rank::Queen => 2,
                Rank::Jack => 1,
                _ => 0,
            };
            if c.suit == trump {
                trump_count += 1;
            }
            let idx = Suit::ALL.iter().position(|&s| s == c.suit).unwrap_or(0);
            suit_counts[idx] += 1;
        }
        value += trump_count * 6;
        for (idx, &count) in suit_counts.iter().enumerate() {
            if Suit::ALL[idx] == trump {
                continue;
            }
            value += match count {
                0 => 8,
                1 => 4,
                _ => 0,
            };
        }
        value
    }

    fn classify(&self, view: &PlayerView, tracker: &CardTracker) -> TrickGoal {
        let Some(contract) = view.contract else {
            return TrickGoal::Default;
        };
        let my_team = view.team() as usize;
        let trump = match view.trump {
            Some(t) => t,
            None => return TrickGoal::Default,
        };

        let partner_winning = view
            .current_best_play()
            .map(|(seat, _)| team_of(seat) == view.team() && seat != view.seat)
            .unwrap_or(false);
        let pts_in_trick = view.points_in_trick();
        let position = view.trick_position();
        let last_to_play = position == 3;
        let trumps_in_hand = view.hand.iter().filter(|c| c.suit == trump).count();

        // The partner already has the trick late in the rotation: feed it.
        if partner_winning && position >= 2 {
            return TrickGoal::SignalPartner;
        }

        // Contractors chase the deficit; defenders deny fat tricks.
        let deficit = if team_of(contract.seat) as usize == my_team {
            (contract.points as i32) - (view.team_points[my_team] as i32)
        } else {
            0
        };

        if deficit > 0 && (pts_in_trick >= 10 || last_to_play) {
            return TrickGoal::WinTrick;
        }
        if deficit <= 0 && pts_in_trick >= 15 {
            return TrickGoal::WinTrick;
        }

        // Short on trump and unable to win in suit: keep the trumps home,
        // but only while the unseen pool still holds trump that could
        // punish spending ours.
        let can_win_in_suit = view
            .current_best_play()
            .map(|(_, best)| {
                view.legal_plays
                    .iter()
                    .any(|&c| c.suit != trump && crate::domain::cards_logic::card_beats(c, best, view.trick_lead.unwrap_or(c.suit), trump))
            })
            .unwrap_or(false);
        if trumps_in_hand > 0
            && trumps_in_hand <= 2
            && !can_win_in_suit
            && pts_in_trick < 10
            && tracker.remaining_in_suit(trump) > 0
        {
            return TrickGoal::ConserveTrump;
        }

        // Nothing worth fighting for yet; duck early cheap tricks.
        if pts_in_trick == 0 && position > 0 {
            return TrickGoal::LoseTrick;
        }

        TrickGoal::Default
    }

    fn lead_card(&self, view: &PlayerView, tracker: &CardTracker, goal: TrickGoal) -> Option<Card> {
        let legal = &view.legal_plays;
        match goal {
            TrickGoal::WinTrick => {
                // Lead a boss card if the tracker confirms one; trump first.
                let trump = view.trump?;
                let boss = legal
                    .iter()
                    .copied()
                    .filter(|&c| tracker.is_boss(c))
                    .max_by_key(|&c| (c.suit == trump, card_points(c), c.rank));
                boss.or_else(|| self.middling(legal))
            }
            _ => self.middling(legal),
        }
    }

    /// Middling lead with a seeded nudge, so equal hands do not always walk
    /// the same line.
    fn middling(&self, legal: &[Card]) -> Option<Card> {
        if legal.is_empty() {
            return None;
        }
        let mut sorted = legal.to_vec();
        sorted.sort_by_key(|&c| (card_points(c), c.rank));
        let mid = sorted.len() / 2;
        let jitter = if sorted.len() > 2 {
            self.rng.lock().map(|mut r| r.random_range(0..2)).unwrap_or(0)
        } else {
            0
        };
        sorted.get(mid.saturating_sub(jitter)).copied()
    }
}

impl BotStrategy for Strategist {
    fn choose_bid(&self, view: &PlayerView) -> Result<BidDecision, AiError> {
        if view.partner_holds_contract() {
            return Ok(BidDecision::Pass);
        }

        let suit = preferred_suit(&view.hand);
        let value = Self::evaluate_hand(&view.hand, suit);

        // Tighter bands than the heuristic tiers, but a higher ceiling:
        // the tracker-informed play can cash what it promises.
        let suggestion = match value {
            0..=49 => None,
            50..=59 => Some(50),
            60..=69 => Some(55),
            70..=79 => Some(60),
            80..=89 => Some(70),
            90..=99 => Some(80),
            _ => Some(90),
        };
        let Some(suggestion) = suggestion else {
            return Ok(BidDecision::Pass);
        };

        let theoretical_max = (value / 5 * 5).min(100) as u8;
        let points = suggestion.max(view.min_bid);
        if points > theoretical_max {
            return Ok(BidDecision::Pass);
        }
        Ok(BidDecision::Bid { points, suit })
    }

    fn choose_kitty(&self, view: &PlayerView) -> Result<KittyDecision, AiError> {
        let contract = view
            .contract
            .ok_or_else(|| AiError::Internal("kitty decision without a contract".into()))?;

        // Re-declare trump when the enlarged hand clearly prefers another suit.
        let contract_len = view
            .hand
            .iter()
            .filter(|c| c.suit == contract.suit)
            .count();
        let best = preferred_suit(&view.hand);
        let best_len = view.hand.iter().filter(|c| c.suit == best).count();
        let trump = if best != contract.suit && best_len >= contract_len + 2 {
            Some(best)
        } else {
            None
        };
        let effective = trump.unwrap_or(contract.suit);

        // Cheapest off-trump cards go down; shorter suits first to open voids.
        let mut candidates: Vec<Card> = view.hand.clone();
        let suit_len = |s: Suit| view.hand.iter().filter(|c| c.suit == s).count();
        candidates.sort_by_key(|&c| (c.suit == effective, card_points(c), suit_len(c.suit), c.rank));
        let discards: Vec<Card> = candidates.into_iter().take(KITTY_SIZE).collect();
        if discards.len() != KITTY_SIZE {
            return Err(AiError::Internal(format!(
                "expected a 13-card hand at kitty discard, got {}",
                view.hand.len()
            )));
        }
        Ok(KittyDecision { discards, trump })
    }

    fn choose_play(&self, view: &PlayerView) -> Result<Card, AiError> {
        let legal = &view.legal_plays;
        if legal.is_empty() {
            return Err(AiError::Internal("no legal plays".into()));
        }
        let tracker = CardTracker::from_view(view);
        let goal = self.classify(view, &tracker);

        if view.trick_position() == 0 {
            return self
                .lead_card(view, &tracker, goal)
                .ok_or_else(|| AiError::Internal("no lead available".into()));
        }

        let trump = view
            .trump
            .ok_or_else(|| AiError::Internal("playing without trump".into()))?;
        let lead = view
            .trick_lead
            .ok_or_else(|| AiError::Internal("following without a lead".into()))?;
        let best = view
            .current_best_play()
            .ok_or_else(|| AiError::Internal("following an empty trick".into()))?
            .1;

        let pick = match goal {
            TrickGoal::WinTrick => cheapest_winner(legal, best, lead, trump)
                .or_else(|| cheapest(legal)),
            TrickGoal::LoseTrick => cheapest(legal),
            TrickGoal::ConserveTrump => legal
                .iter()
                .copied()
                .filter(|c| c.suit != trump)
                .min_by_key(|&c| (card_points(c), c.rank))
                .or_else(|| cheapest(legal)),
            TrickGoal::SignalPartner => legal
                .iter()
                .copied()
                .filter(|&c| !crate::domain::cards_logic::card_beats(c, best, lead, trump))
                .max_by_key(|&c| (card_points(c), std::cmp::Reverse(c.rank)))
                .or_else(|| cheapest(legal)),
            TrickGoal::Default => cheapest_winner(legal, best, lead, trump)
                .or_else(|| cheapest(legal)),
        };
        pick.ok_or_else(|| AiError::Internal("no playable card".into()))
    }
}
