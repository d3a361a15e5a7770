//! Per-seat view of game state: what a player (or bot) may see at a
//! decision point, plus legal-move helpers.
//!
//! This is the single context object handed to every bot tier; tier-specific
//! needs (card tracking, trick history) read from here rather than widening
//! the strategy call signature.

use std::collections::BTreeSet;

use crate::domain::bidding;
use crate::domain::cards::{Card, DeckVariant, Suit};
use crate::domain::state::{
    partner_of, team_of, CompletedTrick, Contract, GameState, Phase, Seat,
};
use crate::domain::tricks::legal_moves;

#[derive(Debug, Clone)]
pub struct PlayerView {
    pub seat: Seat,
    pub hand: Vec<Card>,
    pub phase: Phase,
    pub deck_variant: DeckVariant,
    pub score_target: u16,
    pub trump: Option<Suit>,
    pub contract: Option<Contract>,
    pub passed: BTreeSet<Seat>,
    /// Plays of the trick in progress, in play order.
    pub trick_plays: Vec<(Seat, Card)>,
    pub trick_lead: Option<Suit>,
    /// Completed tricks this round; the raw material for card tracking.
    pub tricks_seen: Vec<CompletedTrick>,
    pub team_points: [u16; 2],
    pub scores: [i32; 2],
    pub kitty_size: usize,
    /// Legal plays for this seat right now (empty outside trick play).
    pub legal_plays: Vec<Card>,
    /// Minimum legal bid right now.
    pub min_bid: u8,
}

impl PlayerView {
    pub fn for_seat(state: &GameState, seat: Seat) -> Self {
        Self {
            seat,
            hand: state.hand(seat).to_vec(),
            phase: state.phase,
            deck_variant: state.config.deck_variant,
            score_target: state.config.score_target,
            trump: state.trump,
            contract: state.contract,
            passed: state.round.passed.clone(),
            trick_plays: state.round.trick_plays.clone(),
            trick_lead: state.round.trick_lead,
            tricks_seen: state.round.completed_tricks.clone(),
            team_points: state.round.team_points,
            scores: state.scores,
            kitty_size: state.round.kitty.len(),
            legal_plays: legal_moves(state, seat),
            min_bid: bidding::min_bid(state),
        }
    }

    pub fn team(&self) -> u8 {
        team_of(self.seat)
    }

    /// Does this seat's partner hold the standing contract?
    pub fn partner_holds_contract(&self) -> bool {
        self.contract
            .map(|c| c.seat == partner_of(self.seat))
            .unwrap_or(false)
    }

    /// Is this seat's team the contractor team?
    pub fn on_contractor_team(&self) -> bool {
        self.contract
            .map(|c| team_of(c.seat) == self.team())
            .unwrap_or(false)
    }

    /// Play (seat, card) currently winning the trick in progress, if any.
    pub fn current_best_play(&self) -> Option<(Seat, Card)> {
        use crate::domain::cards_logic::card_beats;
        let lead = self.trick_lead?;
        let trump = self.trump?;
        let mut best = *self.trick_plays.first()?;
        for &(seat, card) in self.trick_plays.iter().skip(1) {
            if card_beats(card, best.1, lead, trump) {
                best = (seat, card);
            }
        }
        Some(best)
    }

    /// Card points already sitting in the trick in progress.
    pub fn points_in_trick(&self) -> u16 {
        use crate::domain::cards::card_points;
        self.trick_plays.iter().map(|&(_, c)| card_points(c)).sum()
    }

    /// Position within the current trick: 0 leads, 3 plays last.
    pub fn trick_position(&self) -> usize {
        self.trick_plays.len()
    }
}
