use std::sync::Arc;

use tokio::time::Instant;
use tracing::{debug, error, info};
use uuid::Uuid;

use super::GameFlowService;
use crate::domain::bidding::{pass_bid, place_bid, BidOutcome};
use crate::domain::cards::{Card, Suit};
use crate::domain::kitty::{discard_to_kitty, take_kitty};
use crate::domain::snapshot::{snapshot, GameSnapshot};
use crate::domain::state::{GameId, GameState, Phase};
use crate::domain::tricks::{play_card, PlayCardResult};
use crate::error::EngineError;
use crate::errors::domain::DomainError;
use crate::events::{GameEndReason, GameEvent};
use crate::state::GameHandle;

/// What a successful mutation leaves behind for the service to publish.
/// Events go out while the game lock is still held, so the observer
/// stream matches mutation order exactly.
struct Flow {
    events: Vec<GameEvent>,
    game_over: bool,
}

impl GameFlowService {
    /// Submit a bid for a player. Resolves the auction or triggers a
    /// redeal when this bid is the trigger.
    pub fn submit_bid(
        &self,
        game_id: GameId,
        player_id: Uuid,
        points: u8,
        suit: Suit,
    ) -> Result<GameSnapshot, EngineError> {
        let handle = self.require_game(game_id)?;
        let (game_over, snap) = {
            let mut state = handle.state.lock();
            let seat = self.require_seat(&state, player_id)?;
            debug!(%game_id, seat, points, ?suit, "submitting bid");
            let outcome = place_bid(&mut state, seat, points, suit)
                .map_err(|err| self.fail_domain(&mut state, err))?;
            state.turn_started = Instant::now();

            let mut events = vec![GameEvent::BidMade {
                game_id,
                seat,
                bid: Some(points),
                snapshot: snapshot(&state),
            }];
            self.apply_bid_outcome(&mut state, outcome, &mut events);
            let snap = snapshot(&state);
            self.publish_all(events);
            (false, snap)
        };
        self.finish(game_id, game_over);
        Ok(snap)
    }

    /// Pass at the player's bidding turn.
    pub fn pass_bid(&self, game_id: GameId, player_id: Uuid) -> Result<GameSnapshot, EngineError> {
        let handle = self.require_game(game_id)?;
        let (game_over, snap) = {
            let mut state = handle.state.lock();
            let seat = self.require_seat(&state, player_id)?;
            debug!(%game_id, seat, "passing");
            let outcome = pass_bid(&mut state, seat)
                .map_err(|err| self.fail_domain(&mut state, err))?;
            state.turn_started = Instant::now();

            let mut events = vec![GameEvent::BidMade {
                game_id,
                seat,
                bid: None,
                snapshot: snapshot(&state),
            }];
            self.apply_bid_outcome(&mut state, outcome, &mut events);
            let snap = snapshot(&state);
            self.publish_all(events);
            (false, snap)
        };
        self.finish(game_id, game_over);
        Ok(snap)
    }

    /// Contract holder picks up the kitty.
    pub fn take_kitty(&self, game_id: GameId, player_id: Uuid) -> Result<GameSnapshot, EngineError> {
        let handle = self.require_game(game_id)?;
        let (game_over, snap) = {
            let mut state = handle.state.lock();
            let seat = self.require_seat(&state, player_id)?;
            take_kitty(&mut state, seat).map_err(|err| self.fail_domain(&mut state, err))?;
            state.turn_started = Instant::now();
            let snap = snapshot(&state);
            self.app().publish(GameEvent::GameUpdated {
                game_id,
                snapshot: snap.clone(),
            });
            (false, snap)
        };
        self.finish(game_id, game_over);
        Ok(snap)
    }

    /// Contract holder buries four cards, optionally re-declaring trump,
    /// and trick play begins.
    pub fn discard_to_kitty(
        &self,
        game_id: GameId,
        player_id: Uuid,
        cards: &[Card],
        declared_trump: Option<Suit>,
    ) -> Result<GameSnapshot, EngineError> {
        let handle = self.require_game(game_id)?;
        let (game_over, snap) = {
            let mut state = handle.state.lock();
            let seat = self.require_seat(&state, player_id)?;
            discard_to_kitty(&mut state, seat, cards, declared_trump)
                .map_err(|err| self.fail_domain(&mut state, err))?;
            state.turn_started = Instant::now();
            info!(%game_id, seat, trump = ?state.trump, "kitty exchanged, play begins");
            let snap = snapshot(&state);
            self.app().publish(GameEvent::GameUpdated {
                game_id,
                snapshot: snap.clone(),
            });
            (false, snap)
        };
        self.finish(game_id, game_over);
        Ok(snap)
    }

    /// Play a card. Completes tricks, rounds and possibly the game.
    pub fn play_card(
        &self,
        game_id: GameId,
        player_id: Uuid,
        card: Card,
    ) -> Result<GameSnapshot, EngineError> {
        let handle = self.require_game(game_id)?;
        let (game_over, snap) = {
            let mut state = handle.state.lock();
            let seat = self.require_seat(&state, player_id)?;
            let result =
                play_card(&mut state, seat, card).map_err(|err| self.fail_domain(&mut state, err))?;
            state.turn_started = Instant::now();
            let flow = self
                .after_play(&mut state, seat, result)
                .map_err(|err| self.fail_domain(&mut state, err))?;
            let snap = snapshot(&state);
            self.publish_all(flow.events);
            (flow.game_over, snap)
        };
        self.finish(game_id, game_over);
        Ok(snap)
    }

    /// A player leaves: the table dissolves for everyone.
    pub fn exit_game(&self, game_id: GameId, player_id: Uuid) -> Result<GameSnapshot, EngineError> {
        let handle = self.require_game(game_id)?;
        let snap = {
            let mut state = handle.state.lock();
            let seat = self.require_seat(&state, player_id)?;
            info!(%game_id, seat, "player left, dissolving table");
            state.phase = Phase::Finished;
            state.turn = None;
            let snap = snapshot(&state);
            self.app().publish(GameEvent::GameEnded {
                game_id,
                winner: None,
                reason: GameEndReason::PlayerExit,
                snapshot: snap.clone(),
            });
            snap
        };
        self.app().remove_game(game_id);
        Ok(snap)
    }

    fn require_game(&self, game_id: GameId) -> Result<Arc<GameHandle>, EngineError> {
        self.app()
            .game(game_id)
            .ok_or(EngineError::GameNotFound(game_id))
    }

    fn require_seat(&self, state: &GameState, player_id: Uuid) -> Result<u8, EngineError> {
        state
            .seat_of(player_id)
            .ok_or(EngineError::PlayerNotInGame(player_id))
    }

    fn apply_bid_outcome(
        &self,
        state: &mut GameState,
        outcome: BidOutcome,
        events: &mut Vec<GameEvent>,
    ) {
        match outcome {
            BidOutcome::Continue => {}
            BidOutcome::Resolved(contract) => {
                info!(
                    game_id = %state.id,
                    seat = contract.seat,
                    points = contract.points,
                    suit = ?contract.suit,
                    "contract settled"
                );
                events.push(GameEvent::GameUpdated {
                    game_id: state.id,
                    snapshot: snapshot(state),
                });
            }
            BidOutcome::Redeal => {
                self.redeal(state);
                events.push(GameEvent::GameUpdated {
                    game_id: state.id,
                    snapshot: snapshot(state),
                });
            }
        }
    }

    /// Events that follow a successful card play, up to and including
    /// round completion and game end.
    fn after_play(
        &self,
        state: &mut GameState,
        seat: u8,
        result: PlayCardResult,
    ) -> Result<Flow, DomainError> {
        let mut events = vec![GameEvent::CardPlayed {
            game_id: state.id,
            seat,
            snapshot: snapshot(state),
        }];
        if let Some(winner) = result.trick_winner {
            events.push(GameEvent::TrickCompleted {
                game_id: state.id,
                winner,
                points: result.trick_points,
                snapshot: snapshot(state),
            });
        }
        let mut game_over = false;
        if result.round_over {
            let (round_events, over) = self.complete_round(state)?;
            events.extend(round_events);
            game_over = over;
        }
        Ok(Flow { events, game_over })
    }

    /// Map a domain failure. Validation errors pass through unchanged;
    /// invariant breaches terminate the game before surfacing.
    fn fail_domain(&self, state: &mut GameState, err: DomainError) -> EngineError {
        if err.is_fatal() {
            error!(game_id = %state.id, %err, "invariant breach, terminating game");
            state.phase = Phase::Finished;
            state.turn = None;
            self.app().publish(GameEvent::GameEnded {
                game_id: state.id,
                winner: None,
                reason: GameEndReason::Fault,
                snapshot: snapshot(state),
            });
            self.app().remove_game(state.id);
        }
        err.into()
    }

    fn publish_all(&self, events: Vec<GameEvent>) {
        for event in events {
            self.app().publish(event);
        }
    }

    /// Post-mutation bookkeeping, after the game lock has been released.
    fn finish(&self, game_id: GameId, game_over: bool) {
        if game_over {
            self.app().remove_game(game_id);
        } else {
            self.schedule_bots(game_id);
        }
    }
}
