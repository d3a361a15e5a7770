//! Bot module - automated play for unfilled seats.
//!
//! This module provides:
//! - `BotStrategy` trait shared by every tier
//! - `Heuristic`: the easy/medium/hard profile family
//! - `Strategist`: the adaptive, card-tracking tier
//! - `CardTracker`: per-decision memory of seen cards
//! - a static registry mapping `BotSkill` to a strategy

pub mod memory;
pub mod registry;

mod heuristic;
mod strategist;
mod trait_def;

pub use heuristic::Heuristic;
pub use memory::CardTracker;
pub use registry::{by_name, create_bot, registered_bots, BotFactory};
pub use strategist::Strategist;
pub use trait_def::{AiError, BidDecision, BotStrategy, KittyDecision};
