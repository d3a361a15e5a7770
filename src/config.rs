//! Table configuration surface.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::cards::DeckVariant;
use crate::error::EngineError;

/// Bot strength tiers. Easy/medium/hard share one heuristic with a tier
/// profile; expert is the adaptive card-tracking tier.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BotSkill {
    Easy,
    Medium,
    Hard,
    Expert,
}

/// Allowed cumulative score targets for a table.
pub const SCORE_TARGETS: [u16; 4] = [200, 300, 500, 1000];

/// Per-table configuration fixed at game creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    pub deck_variant: DeckVariant,
    /// Game ends when a team reaches +target, or busts at -target.
    pub score_target: u16,
    /// Kitty exchange sub-phase; only valid with the 40-card deck.
    pub has_kitty: bool,
    /// Per-actor decision timeout in milliseconds.
    pub turn_timeout_ms: u64,
    /// Fixed "thinking" delay between scheduled bot decisions. Zero in tests.
    pub bot_think_delay_ms: u64,
    /// Seed for deterministic dealing; a random seed is drawn when absent.
    pub deal_seed: Option<u64>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            deck_variant: DeckVariant::ThirtySix,
            score_target: 200,
            has_kitty: false,
            turn_timeout_ms: 30_000,
            bot_think_delay_ms: 1_000,
            deal_seed: None,
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if !SCORE_TARGETS.contains(&self.score_target) {
            return Err(EngineError::config(format!(
                "score target must be one of {SCORE_TARGETS:?}, got {}",
                self.score_target
            )));
        }
        if self.has_kitty && self.deck_variant != DeckVariant::Forty {
            return Err(EngineError::config(
                "kitty requires the 40-card deck variant",
            ));
        }
        if self.turn_timeout_ms == 0 {
            return Err(EngineError::config("turn timeout must be positive"));
        }
        Ok(())
    }

    pub fn turn_timeout(&self) -> Duration {
        Duration::from_millis(self.turn_timeout_ms)
    }

    pub fn bot_think_delay(&self) -> Duration {
        Duration::from_millis(self.bot_think_delay_ms)
    }
}
