//! Falling-block game.

pub mod board;
pub mod game;
pub mod pieces;

pub use game::TetrisGame;
