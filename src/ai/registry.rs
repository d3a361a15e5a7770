//! How to register a bot tier
//!
//! 1) Implement `BotStrategy` for your type in its module.
//! 2) Add a `BotFactory` entry to the static list with a stable `name`,
//!    `version`, and the `BotSkill` it serves.
//! 3) Keep ordering stable; avoid side effects in constructors.
//! 4) Determinism: same seed means same behavior (where applicable).

use crate::ai::{BotStrategy, Heuristic, Strategist};
use crate::config::BotSkill;

/// Factory definition for constructing bot strategies.
pub struct BotFactory {
    pub name: &'static str,
    pub version: &'static str,
    pub skill: BotSkill,
    pub make: fn(seed: Option<u64>) -> Box<dyn BotStrategy>,
}

static BOT_FACTORIES: &[BotFactory] = &[
    BotFactory {
        name: "heuristic-easy",
        version: Heuristic::VERSION,
        skill: BotSkill::Easy,
        make: make_easy,
    },
    BotFactory {
        name: "heuristic-medium",
        version: Heuristic::VERSION,
        skill: BotSkill::Medium,
        make: make_medium,
    },
    BotFactory {
        name: "heuristic-hard",
        version: Heuristic::VERSION,
        skill: BotSkill::Hard,
        make: make_hard,
    },
    BotFactory {
        name: "strategist",
        version: Strategist::VERSION,
        skill: BotSkill::Expert,
        make: make_strategist,
    },
];

/// Returns the statically registered bot factories.
pub fn registered_bots() -> &'static [BotFactory] {
    BOT_FACTORIES
}

/// Finds a registered factory by its name.
pub fn by_name(name: &str) -> Option<&'static BotFactory> {
    registered_bots().iter().find(|factory| factory.name == name)
}

/// Constructs the strategy serving `skill`. Every skill has exactly one
/// registered factory.
pub fn create_bot(skill: BotSkill, seed: Option<u64>) -> Box<dyn BotStrategy> {
    let factory = registered_bots()
        .iter()
        .find(|factory| factory.skill == skill)
        .unwrap_or(&BOT_FACTORIES[0]);
    (factory.make)(seed)
}

fn make_easy(_seed: Option<u64>) -> Box<dyn BotStrategy> {
    Box::new(Heuristic::new(BotSkill::Easy))
}

fn make_medium(_seed: Option<u64>) -> Box<dyn BotStrategy> {
    Box::new(Heuristic::new(BotSkill::Medium))
}

fn make_hard(_seed: Option<u64>) -> Box<dyn BotStrategy> {
    Box::new(Heuristic::new(BotSkill::Hard))
}

fn make_strategist(seed: Option<u64>) -> Box<dyn BotStrategy> {
    Box::new(Strategist::new(seed))
}
