//! Bot strategy trait definition.

use std::fmt;

use crate::domain::cards::{Card, Suit};
use crate::domain::player_view::PlayerView;

/// Errors that can occur during bot decision-making.
#[derive(Debug)]
pub enum AiError {
    /// Bot encountered an internal error
    Internal(String),
    /// Bot produced an invalid move
    InvalidMove(String),
}

impl fmt::Display for AiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiError::Internal(msg) => write!(f, "bot internal error: {msg}"),
            AiError::InvalidMove(msg) => write!(f, "bot invalid move: {msg}"),
        }
    }
}

impl std::error::Error for AiError {}

/// A bot's answer at its bidding turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidDecision {
    Bid { points: u8, suit: Suit },
    Pass,
}

/// A bot contract holder's kitty exchange: exactly four discards, and
/// optionally a re-declared trump suit (None keeps the contract suit).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KittyDecision {
    pub discards: Vec<Card>,
    pub trump: Option<Suit>,
}

/// Trait for bot players.
///
/// Every tier receives the same `PlayerView` context and must return a
/// legal, terminating decision. Tier-specific needs (card tracking, trick
/// history) live inside the view, not in the call signature.
pub trait BotStrategy: Send + Sync {
    /// Decide whether to bid or pass. `view.min_bid` is the legal floor.
    fn choose_bid(&self, view: &PlayerView) -> Result<BidDecision, AiError>;

    /// Decide the kitty discard after pickup (hand holds 13 cards here).
    fn choose_kitty(&self, view: &PlayerView) -> Result<KittyDecision, AiError>;

    /// Choose a card to play. Must come from `view.legal_plays`.
    fn choose_play(&self, view: &PlayerView) -> Result<Card, AiError>;
}
