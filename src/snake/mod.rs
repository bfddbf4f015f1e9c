//! Snake game.

pub mod game;

pub use game::SnakeGame;
