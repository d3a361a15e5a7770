use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use tokio::sync::broadcast;

use crate::domain::state::{GameId, GameState};
use crate::events::GameEvent;

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// One live game: the state under its lock, plus the bot loop guard.
///
/// The mutex is never held across an `.await`; mutations are synchronous
/// and sleeps happen outside the lock.
pub struct GameHandle {
    pub state: Mutex<GameState>,
    /// Set while a bot decision loop is running for this game, so at most
    /// one loop is active regardless of how many actions wake bots up.
    pub bot_loop_active: AtomicBool,
}

impl GameHandle {
    pub fn new(state: GameState) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(state),
            bot_loop_active: AtomicBool::new(false),
        })
    }
}

/// Application state containing shared resources
pub struct AppState {
    /// Registry of live games, keyed by game id
    games: DashMap<GameId, Arc<GameHandle>>,
    /// Fan-out channel for game events; lagging subscribers drop events
    events: broadcast::Sender<GameEvent>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            games: DashMap::new(),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.events.subscribe()
    }

    /// Publish an event; a send error only means nobody is listening.
    pub fn publish(&self, event: GameEvent) {
        let _ = self.events.send(event);
    }

    pub fn insert_game(&self, id: GameId, handle: Arc<GameHandle>) {
        self.games.insert(id, handle);
    }

    pub fn game(&self, id: GameId) -> Option<Arc<GameHandle>> {
        self.games.get(&id).map(|entry| entry.value().clone())
    }

    pub fn remove_game(&self, id: GameId) -> Option<Arc<GameHandle>> {
        self.games.remove(&id).map(|(_, handle)| handle)
    }

    /// Ids of every live game, for the timeout sweep.
    pub fn active_game_ids(&self) -> Vec<GameId> {
        self.games.iter().map(|entry| *entry.key()).collect()
    }

    pub fn game_count(&self) -> usize {
        self.games.len()
    }
}
