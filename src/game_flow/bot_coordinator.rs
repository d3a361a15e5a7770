//! Bot scheduling: one decision loop per game, woken after every action.
//!
//! The loop takes one decision per thinking delay and goes through the
//! same public action methods as humans, so bots obey the same legality
//! checks. At most one loop runs per game; `bot_loop_active` closes the
//! race between a finishing loop and a freshly arriving bot turn.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use super::GameFlowService;
use crate::ai::{create_bot, BidDecision, KittyDecision};
use crate::domain::cards::{Card, Suit};
use crate::domain::dealing::KITTY_SIZE;
use crate::domain::player_view::PlayerView;
use crate::domain::state::{GameId, GameState, Phase, Seat};
use crate::error::EngineError;
use crate::state::GameHandle;

enum BotAction {
    Bid {
        player_id: Uuid,
        bid: Option<(u8, Suit)>,
    },
    KittyExchange {
        player_id: Uuid,
    },
    Play {
        player_id: Uuid,
        card: Card,
    },
}

fn bot_turn(handle: &GameHandle) -> bool {
    let state = handle.state.lock();
    match (state.phase, state.turn) {
        (Phase::Finished, _) | (_, None) => false,
        (_, Some(seat)) => state.player(seat).is_bot(),
    }
}

/// Stable per-seat seed on seeded tables, fresh entropy otherwise.
fn bot_seed(state: &GameState, seat: Seat) -> Option<u64> {
    state
        .config
        .deal_seed
        .map(|base| base.wrapping_add(seat as u64 + 1))
}

impl GameFlowService {
    /// Wake the bot loop for `game_id` if the current turn belongs to a
    /// bot and no loop is already running.
    pub(super) fn schedule_bots(&self, game_id: GameId) {
        let Some(handle) = self.app().game(game_id) else {
            return;
        };
        if !bot_turn(&handle) {
            return;
        }
        if handle
            .bot_loop_active
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }
        let svc = self.clone();
        tokio::spawn(async move {
            svc.run_bot_loop(game_id, handle).await;
        });
    }

    async fn run_bot_loop(&self, game_id: GameId, handle: Arc<GameHandle>) {
        loop {
            let delay = handle.state.lock().config.bot_think_delay();
            tokio::time::sleep(delay).await;

            let Some(action) = self.next_bot_action(&handle) else {
                break;
            };
            if let Err(err) = self.execute_bot_action(game_id, action) {
                warn!(%game_id, %err, "bot action rejected, stopping loop");
                break;
            }
            if self.app().game(game_id).is_none() {
                break;
            }
        }
        handle.bot_loop_active.store(false, Ordering::Release);
        // A bot turn may have arrived while this loop was winding down.
        if self.app().game(game_id).is_some() && bot_turn(&handle) {
            self.schedule_bots(game_id);
        }
    }

    /// Decide the next bot move under the lock, without executing it.
    fn next_bot_action(&self, handle: &GameHandle) -> Option<BotAction> {
        let state = handle.state.lock();
        if state.phase == Phase::Finished {
            return None;
        }
        let seat = state.turn?;
        let player = state.player(seat);
        let skill = player.bot_skill()?;
        let player_id = player.id;

        let bot = create_bot(skill, bot_seed(&state, seat));
        let view = PlayerView::for_seat(&state, seat);

        let action = match state.phase {
            Phase::Bidding => {
                let decision = bot.choose_bid(&view).unwrap_or_else(|err| {
                    warn!(game_id = %state.id, seat, %err, "bot bid failed, passing");
                    BidDecision::Pass
                });
                let bid = match decision {
                    BidDecision::Bid { points, suit } => Some((points, suit)),
                    BidDecision::Pass => None,
                };
                BotAction::Bid { player_id, bid }
            }
            Phase::KittyExchange => BotAction::KittyExchange { player_id },
            Phase::Playing => {
                let card = match bot.choose_play(&view) {
                    Ok(card) if view.legal_plays.contains(&card) => card,
                    Ok(card) => {
                        warn!(game_id = %state.id, seat, %card, "bot picked an illegal card");
                        *view.legal_plays.first()?
                    }
                    Err(err) => {
                        warn!(game_id = %state.id, seat, %err, "bot play failed, using fallback");
                        *view.legal_plays.first()?
                    }
                };
                BotAction::Play { player_id, card }
            }
            Phase::Finished => return None,
        };
        Some(action)
    }

    fn execute_bot_action(&self, game_id: GameId, action: BotAction) -> Result<(), EngineError> {
        match action {
            BotAction::Bid { player_id, bid } => match bid {
                Some((points, suit)) => {
                    self.submit_bid(game_id, player_id, points, suit)?;
                }
                None => {
                    self.pass_bid(game_id, player_id)?;
                }
            },
            BotAction::KittyExchange { player_id } => {
                self.take_kitty(game_id, player_id)?;
                let decision = self.bot_kitty_decision(game_id, player_id)?;
                self.discard_to_kitty(game_id, player_id, &decision.discards, decision.trump)?;
            }
            BotAction::Play { player_id, card } => {
                self.play_card(game_id, player_id, card)?;
            }
        }
        Ok(())
    }

    /// Choose the discards on the enlarged hand, after pickup.
    fn bot_kitty_decision(
        &self,
        game_id: GameId,
        player_id: Uuid,
    ) -> Result<KittyDecision, EngineError> {
        let handle = self
            .app()
            .game(game_id)
            .ok_or(EngineError::GameNotFound(game_id))?;
        let state = handle.state.lock();
        let seat = state
            .seat_of(player_id)
            .ok_or(EngineError::PlayerNotInGame(player_id))?;
        let skill = match state.player(seat).bot_skill() {
            Some(skill) => skill,
            None => {
                return Err(EngineError::PlayerNotInGame(player_id));
            }
        };
        let bot = create_bot(skill, bot_seed(&state, seat));
        let view = PlayerView::for_seat(&state, seat);
        Ok(bot.choose_kitty(&view).unwrap_or_else(|err| {
            warn!(game_id = %state.id, seat, %err, "bot kitty choice failed, burying low cards");
            let mut hand = view.hand.clone();
            hand.sort_by_key(|&c| (crate::domain::cards::card_points(c), c.rank));
            KittyDecision {
                discards: hand.into_iter().take(KITTY_SIZE).collect(),
                trump: None,
            }
        }))
    }
}
