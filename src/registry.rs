//! Game registry and dispatch facade.
//!
//! The host loop talks to one `Registry`; the registry owns at most one
//! live game at a time and forwards input, ticks and snapshot requests to
//! it. Switching to the already active game keeps the instance; switching
//! to another id drops the old game (flushing its high score) and builds
//! the new one from its registered factory.

use std::collections::BTreeMap;

use crate::snake::SnakeGame;
use crate::tetris::TetrisGame;
use crate::types::{GameId, GameInfo, UserAction};

/// A playable game behind the engine facade.
pub trait Game {
    /// Apply a user action. `hold` marks a held-down key.
    fn handle_input(&mut self, action: UserAction, hold: bool);

    /// Advance one timer tick.
    fn update(&mut self);

    /// Refresh and expose the public snapshot.
    fn info(&mut self) -> &GameInfo;
}

/// Builds a fresh game instance from an RNG seed.
pub type GameFactory = fn(u32) -> Box<dyn Game>;

pub struct Registry {
    factories: BTreeMap<GameId, GameFactory>,
    active: Option<(GameId, Box<dyn Game>)>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
            active: None,
        }
    }

    /// Registry with the built-in games wired up.
    pub fn with_default_games() -> Self {
        let mut reg = Self::new();
        let _ = reg.register(GameId::Tetris, |seed| Box::new(TetrisGame::new(seed)));
        let _ = reg.register(GameId::Snake, |seed| Box::new(SnakeGame::new(seed)));
        reg
    }

    /// Register a factory for `id`. A second registration for the same id
    /// is rejected and the original factory kept.
    pub fn register(&mut self, id: GameId, factory: GameFactory) -> bool {
        if self.factories.contains_key(&id) {
            log::warn!("game {:?} already registered", id);
            return false;
        }
        self.factories.insert(id, factory);
        true
    }

    /// Ids available for switching, in stable order.
    pub fn available(&self) -> impl Iterator<Item = GameId> + '_ {
        self.factories.keys().copied()
    }

    /// Make `id` the active game, creating it with `seed` unless it is
    /// already active. Returns false for an unregistered id.
    pub fn switch(&mut self, id: GameId, seed: u32) -> bool {
        if matches!(self.active, Some((active_id, _)) if active_id == id) {
            return true;
        }
        let Some(factory) = self.factories.get(&id) else {
            return false;
        };
        // Dropping the previous game persists its high score.
        self.active = Some((id, factory(seed)));
        true
    }

    pub fn active_id(&self) -> Option<GameId> {
        self.active.as_ref().map(|(id, _)| *id)
    }

    /// Forward an action to the active game; no-op when none is active.
    pub fn handle_input(&mut self, action: UserAction, hold: bool) {
        if let Some((_, game)) = &mut self.active {
            game.handle_input(action, hold);
        }
    }

    /// Tick the active game; no-op when none is active.
    pub fn update(&mut self) {
        if let Some((_, game)) = &mut self.active {
            game.update();
        }
    }

    /// Snapshot of the active game, or None.
    pub fn info(&mut self) -> Option<&GameInfo> {
        self.active.as_mut().map(|(_, game)| game.info())
    }

    /// Drop the active game, flushing its high score.
    pub fn close(&mut self) {
        self.active = None;
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
