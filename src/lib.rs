//! Brick arcade: a small pluggable arcade-game engine.
//!
//! A generic table-driven state machine ([`fsm`]) carries the control flow
//! of each game; the falling-block game ([`tetris`]) and the snake game
//! ([`snake`]) plug their transition tables and contexts into it. The
//! [`registry`] owns the live game and is the only surface a host loop
//! needs: forward input, tick, read the [`types::GameInfo`] snapshot.

pub mod fsm;
pub mod registry;
pub mod rng;
pub mod score;
pub mod snake;
pub mod term;
pub mod tetris;
pub mod types;

pub use registry::{Game, GameFactory, Registry};
pub use types::{GameId, GameInfo, UserAction};
