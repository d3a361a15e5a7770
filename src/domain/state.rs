//! Authoritative game and round state, plus seat/turn math.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
// Tokio's Instant so paused-clock tests can drive turn timers.
use tokio::time::Instant;
use uuid::Uuid;

use crate::config::{BotSkill, TableConfig};
use crate::domain::cards::{Card, Suit};
use crate::domain::cards_logic::points_in;
use crate::errors::domain::DomainError;

pub const SEATS: usize = 4;

pub type Seat = u8; // 0..=3
pub type Team = u8; // 0 or 1
pub type GameId = Uuid;

/// Phases of a round. Scoring happens inline when the last trick resolves,
/// so the machine moves Playing -> Bidding (next round) or Playing -> Finished.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Players bid for the point contract in seat order.
    Bidding,
    /// Contract holder picks up the kitty and discards (40-card tables only).
    KittyExchange,
    /// Trick play until all hands are empty.
    Playing,
    /// Game over: target reached, bust, exit, or timeout.
    Finished,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerKind {
    Human,
    Bot(BotSkill),
}

#[derive(Debug, Clone)]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub kind: PlayerKind,
    pub hand: Vec<Card>,
}

impl Player {
    pub fn is_bot(&self) -> bool {
        matches!(self.kind, PlayerKind::Bot(_))
    }

    pub fn bot_skill(&self) -> Option<BotSkill> {
        match self.kind {
            PlayerKind::Bot(skill) => Some(skill),
            PlayerKind::Human => None,
        }
    }
}

/// The standing contract: one seat's point commitment in a trump suit.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub seat: Seat,
    pub points: u8,
    pub suit: Suit,
}

/// A finished trick kept for display and for card-tracking bots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedTrick {
    pub plays: Vec<(Seat, Card)>,
    pub winner: Seat,
    pub points: u16,
}

/// Per-round state, reset on every deal.
#[derive(Debug, Clone)]
pub struct RoundState {
    /// Ordered plays of the trick in progress (who, card).
    pub trick_plays: Vec<(Seat, Card)>,
    /// Lead suit of the trick in progress.
    pub trick_lead: Option<Suit>,
    /// All tricks resolved so far this round, in order.
    pub completed_tricks: Vec<CompletedTrick>,
    /// Card points banked per team this round (not the cumulative score).
    pub team_points: [u16; 2],
    /// Face-down kitty (empty on 36-card tables and after pickup).
    pub kitty: Vec<Card>,
    /// Cards the contract holder buried back; scored to the defenders.
    pub kitty_discards: Vec<Card>,
    /// Contract holder has picked up the kitty this round.
    pub kitty_taken: bool,
    /// Seats that passed this bidding cycle. A genuine set internally;
    /// serialized as an explicit ordered list at the boundary.
    pub passed: BTreeSet<Seat>,
    /// Whether each team placed at least one bid this round (shutout rule).
    pub team_bid: [bool; 2],
    /// Card points dealt this round; the conservation check audits all
    /// later accounting against it. 100 for any full deal.
    pub dealt_points: u16,
}

impl RoundState {
    pub fn empty() -> Self {
        Self {
            trick_plays: Vec::with_capacity(SEATS),
            trick_lead: None,
            completed_tricks: Vec::new(),
            team_points: [0; 2],
            kitty: Vec::new(),
            kitty_discards: Vec::new(),
            kitty_taken: false,
            passed: BTreeSet::new(),
            team_bid: [false; 2],
            dealt_points: 0,
        }
    }

    pub fn last_trick(&self) -> Option<&CompletedTrick> {
        self.completed_tricks.last()
    }
}

/// Entire authoritative state for one table's game.
#[derive(Debug, Clone)]
pub struct GameState {
    pub id: GameId,
    pub config: TableConfig,
    pub players: [Player; SEATS],
    pub phase: Phase,
    /// 1-based round counter; also advances on a four-pass redeal.
    pub round_no: u32,
    pub dealer: Seat,
    /// Seat expected to act, None once finished.
    pub turn: Option<Seat>,
    pub trump: Option<Suit>,
    pub contract: Option<Contract>,
    pub round: RoundState,
    /// Cumulative team scores across rounds.
    pub scores: [i32; 2],
    /// When the current actor's turn began (timeout sweep reads this).
    pub turn_started: Instant,
    pub created_at: OffsetDateTime,
    pub winner: Option<Team>,
}

impl GameState {
    pub fn new(id: GameId, config: TableConfig, players: [Player; SEATS]) -> Self {
        Self {
            id,
            config,
            players,
            phase: Phase::Bidding,
            round_no: 1,
            dealer: 0,
            turn: None,
            trump: None,
            contract: None,
            round: RoundState::empty(),
            scores: [0; 2],
            turn_started: Instant::now(),
            created_at: OffsetDateTime::now_utc(),
            winner: None,
        }
    }

    pub fn seat_of(&self, player_id: Uuid) -> Option<Seat> {
        self.players
            .iter()
            .position(|p| p.id == player_id)
            .map(|i| i as Seat)
    }

    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat as usize]
    }

    pub fn hand(&self, seat: Seat) -> &[Card] {
        &self.players[seat as usize].hand
    }

    /// Clear all per-round fields ahead of a fresh deal.
    pub fn reset_round(&mut self) {
        self.round = RoundState::empty();
        self.trump = None;
        self.contract = None;
        for p in self.players.iter_mut() {
            p.hand.clear();
        }
    }

    pub fn require_turn(&self, ctx: &'static str) -> Result<Seat, DomainError> {
        self.turn
            .ok_or_else(|| DomainError::invariant(format!("turn must be set ({ctx})")))
    }

    pub fn require_trump(&self, ctx: &'static str) -> Result<Suit, DomainError> {
        self.trump
            .ok_or_else(|| DomainError::invariant(format!("trump must be set ({ctx})")))
    }

    pub fn require_contract(&self, ctx: &'static str) -> Result<Contract, DomainError> {
        self.contract
            .ok_or_else(|| DomainError::invariant(format!("contract must be set ({ctx})")))
    }

    /// All four hands must hold the same number of cards at trick start.
    pub fn check_hand_balance(&self) -> Result<(), DomainError> {
        let sizes: Vec<usize> = self.players.iter().map(|p| p.hand.len()).collect();
        if sizes.iter().any(|&s| s != sizes[0]) {
            return Err(DomainError::invariant(format!(
                "hand sizes diverged at trick start: {sizes:?}"
            )));
        }
        Ok(())
    }

    /// Point conservation: hands + kitty + kitty discards + scored tricks
    /// always account for every card point dealt this round.
    pub fn check_point_conservation(&self) -> Result<(), DomainError> {
        let in_hands: u16 = self.players.iter().map(|p| points_in(&p.hand)).sum();
        let in_trick = points_in(
            &self
                .round
                .trick_plays
                .iter()
                .map(|&(_, c)| c)
                .collect::<Vec<_>>(),
        );
        let scored: u16 = self.round.team_points.iter().sum();
        let total = in_hands
            + in_trick
            + scored
            + points_in(&self.round.kitty)
            + points_in(&self.round.kitty_discards);
        if total != self.round.dealt_points {
            return Err(DomainError::invariant(format!(
                "point conservation broken: {total} of {} accounted for",
                self.round.dealt_points
            )));
        }
        Ok(())
    }
}

/// Seat / turn math (4 fixed seats, teams by parity).
///
/// These live in `domain` so every layer shares one source of truth for
/// rotation and "who acts next".
#[inline]
pub fn seat_offset(seat: Seat, delta: i8) -> Seat {
    let seat_i = seat as i16;
    let delta_i = delta as i16;
    ((seat_i + delta_i).rem_euclid(SEATS as i16)) as Seat
}

/// Next seat clockwise (0 → 1 → 2 → 3 → 0).
#[inline]
pub fn next_seat(seat: Seat) -> Seat {
    seat_offset(seat, 1)
}

/// Team parity: seats 0 and 2 are team 0, seats 1 and 3 are team 1.
#[inline]
pub fn team_of(seat: Seat) -> Team {
    seat % 2
}

#[inline]
pub fn partner_of(seat: Seat) -> Seat {
    seat_offset(seat, 2)
}

#[inline]
pub fn opposing_team(team: Team) -> Team {
    1 - team
}

/// First seat after `from` (exclusive) that has not passed this cycle.
/// Returns None when every other seat has passed.
pub fn next_unpassed_seat(from: Seat, passed: &BTreeSet<Seat>) -> Option<Seat> {
    (1..SEATS as u8)
        .map(|step| seat_offset(from, step as i8))
        .find(|s| !passed.contains(s))
}

/// Seat that opens bidding for a round: left of the dealer.
#[inline]
pub fn round_opener(dealer: Seat) -> Seat {
    next_seat(dealer)
}
