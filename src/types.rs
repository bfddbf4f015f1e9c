//! Core types shared across the engine
//! This module contains pure data types with no external dependencies

/// Playing field dimensions (shared by all games)
pub const FIELD_WIDTH: usize = 10;
pub const FIELD_HEIGHT: usize = 20;

/// Next-piece preview dimensions (falling-block game)
pub const PREVIEW_SIZE: usize = 4;

/// Falling-block speed curve (tick interval in milliseconds)
pub const TETRIS_BASE_INTERVAL_MS: u32 = 500;
pub const TETRIS_INTERVAL_STEP_MS: u32 = 40;
pub const TETRIS_MIN_INTERVAL_MS: u32 = 120;

/// Line clear bonuses indexed by simultaneous lines (0..=4)
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 700, 1500];

/// Cumulative cleared lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Snake speed curve (tick interval in milliseconds)
pub const SNAKE_BASE_INTERVAL_MS: u32 = 100;
pub const SNAKE_INTERVAL_STEP_MS: u32 = 5;
pub const SNAKE_MIN_INTERVAL_MS: u32 = 50;

/// Points per apple and score needed per snake level
pub const APPLE_SCORE: u32 = 1;
pub const APPLES_PER_LEVEL: u32 = 10;

/// Snake body length at spawn
pub const SNAKE_INITIAL_LENGTH: usize = 3;

/// Ticks spent frozen in game over before the snake auto-resets
pub const SNAKE_GAME_OVER_DELAY_TICKS: u32 = 30;

/// Snake cell markers in the public snapshot grid
pub const SNAKE_BODY_CELL: u8 = 1;
pub const SNAKE_HEAD_CELL: u8 = 2;
pub const SNAKE_APPLE_CELL: u8 = 3;

/// External actions delivered by the host loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Start,
    Pause,
    Terminate,
    Left,
    Right,
    Up,
    Down,
    /// Primary action key (rotate in the falling-block game)
    Action,
}

/// Identifier of a registered game
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GameId {
    Tetris,
    Snake,
}

impl GameId {
    /// Stable name, also used for the score file
    pub fn as_str(&self) -> &'static str {
        match self {
            GameId::Tetris => "tetris",
            GameId::Snake => "snake",
        }
    }
}

/// Publicly visible game state snapshot.
///
/// Owned by the game instance and refreshed on each `info()` call; the
/// reference handed out is valid only until the next mutating call on the
/// same game. Grid cells are small integers: 0 = empty, 1..N = a
/// game-specific occupancy marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameInfo {
    pub field: [[u8; FIELD_WIDTH]; FIELD_HEIGHT],
    pub next: [[u8; PREVIEW_SIZE]; PREVIEW_SIZE],
    pub score: u32,
    pub high_score: u32,
    pub level: u32,
    /// Tick interval in milliseconds the host should drive `update` at
    pub speed: u32,
    pub pause: bool,
    pub game_over: bool,
}

impl GameInfo {
    pub fn playable(&self) -> bool {
        !self.game_over && !self.pause
    }
}

impl Default for GameInfo {
    fn default() -> Self {
        Self {
            field: [[0; FIELD_WIDTH]; FIELD_HEIGHT],
            next: [[0; PREVIEW_SIZE]; PREVIEW_SIZE],
            score: 0,
            high_score: 0,
            level: 1,
            speed: 0,
            pause: false,
            game_over: false,
        }
    }
}
