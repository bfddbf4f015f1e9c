//! Falling-block game logic on top of the generic state machine.
//!
//! The transition table carries the state shape; the physics live in a
//! small preprocessing step before dispatch. A Tick or soft drop that can
//! still move the piece down is consumed without touching the machine;
//! only the step that fails to move reaches the table and triggers the
//! lock transition. Hard drop runs the piece to the floor first and then
//! locks through the same rule.

use crate::fsm::{Machine, Transition};
use crate::registry::Game;
use crate::rng::SimpleRng;
use crate::score::HighScoreStore;
use crate::tetris::board::Board;
use crate::tetris::pieces::{self, PieceShape, NUM_KINDS, NUM_ROTATIONS};
use crate::types::{
    GameInfo, UserAction, FIELD_WIDTH, LINES_PER_LEVEL, LINE_SCORES, TETRIS_BASE_INTERVAL_MS,
    TETRIS_INTERVAL_STEP_MS, TETRIS_MIN_INTERVAL_MS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TetrisState {
    Init,
    Spawn,
    Falling,
    Locking,
    Paused,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TetrisEvent {
    Start,
    Tick,
    SoftDrop,
    HardDrop,
    MoveLeft,
    MoveRight,
    Rotate,
    PauseToggle,
    Terminate,
}

#[derive(Debug, Clone, Copy)]
struct Piece {
    kind: u8,
    rotation: u8,
    x: i8,
    y: i8,
}

impl Piece {
    fn random(rng: &mut SimpleRng) -> Self {
        Self {
            kind: rng.next_range(NUM_KINDS as u32) as u8,
            rotation: rng.next_range(NUM_ROTATIONS as u32) as u8,
            x: (FIELD_WIDTH / 2) as i8 - 2,
            y: 0,
        }
    }

    fn shape(&self) -> PieceShape {
        pieces::shape(self.kind, self.rotation)
    }
}

pub struct TetrisCtx {
    board: Board,
    rng: SimpleRng,
    cur: Piece,
    next: Piece,
    score: u32,
    high_score: u32,
    level: u32,
    speed: u32,
    lines: u32,
    game_over: bool,
    store: HighScoreStore,
    info: GameInfo,
}

impl TetrisCtx {
    fn new(seed: u32, store: HighScoreStore) -> Self {
        let mut rng = SimpleRng::new(seed);
        let next = Piece::random(&mut rng);
        let high_score = store.load();
        Self {
            board: Board::new(),
            rng,
            cur: next,
            next,
            score: 0,
            high_score,
            level: 1,
            speed: TETRIS_BASE_INTERVAL_MS,
            lines: 0,
            game_over: false,
            store,
            info: GameInfo {
                high_score,
                ..GameInfo::default()
            },
        }
    }

    fn reset(&mut self) {
        self.board.clear();
        self.next = Piece::random(&mut self.rng);
        self.score = 0;
        self.level = 1;
        self.speed = TETRIS_BASE_INTERVAL_MS;
        self.lines = 0;
        self.game_over = false;
    }

    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        let shape = self.cur.shape();
        if self.board.fits(&shape, self.cur.x + dx, self.cur.y + dy) {
            self.cur.x += dx;
            self.cur.y += dy;
            true
        } else {
            false
        }
    }

    fn try_rotate(&mut self) -> bool {
        let rotation = (self.cur.rotation + 1) % NUM_ROTATIONS;
        let shape = pieces::shape(self.cur.kind, rotation);
        if self.board.fits(&shape, self.cur.x, self.cur.y) {
            self.cur.rotation = rotation;
            true
        } else {
            false
        }
    }

    fn spawn(&mut self) {
        let next = Piece::random(&mut self.rng);
        self.cur = std::mem::replace(&mut self.next, next);
        if !self.board.fits(&self.cur.shape(), self.cur.x, self.cur.y) {
            self.game_over = true;
        }
    }

    fn lock_current(&mut self) {
        let shape = self.cur.shape();
        self.board
            .lock_piece(&shape, self.cur.x, self.cur.y, pieces::marker(self.cur.kind));

        let cleared = self.board.clear_full_rows().len();
        if cleared == 0 {
            return;
        }
        self.lines += cleared as u32;
        self.score += LINE_SCORES[cleared];
        self.level = 1 + self.lines / LINES_PER_LEVEL;
        self.speed = TETRIS_BASE_INTERVAL_MS
            .saturating_sub((self.level - 1) * TETRIS_INTERVAL_STEP_MS)
            .max(TETRIS_MIN_INTERVAL_MS);
        if self.score > self.high_score {
            self.high_score = self.score;
            self.store.save(self.high_score);
        }
    }
}

type TetrisMachine = Machine<TetrisState, TetrisEvent, TetrisCtx>;
type TetrisRule = Transition<TetrisState, TetrisEvent, TetrisCtx>;

fn on_enter_spawn(_m: &TetrisMachine, ctx: &mut TetrisCtx) {
    ctx.spawn();
}

fn on_enter_lock(_m: &TetrisMachine, ctx: &mut TetrisCtx) {
    ctx.lock_current();
}

fn on_enter_game_over(_m: &TetrisMachine, ctx: &mut TetrisCtx) {
    ctx.game_over = true;
    if ctx.score > 0 {
        ctx.store.save(ctx.high_score);
    }
}

fn on_enter_init(_m: &TetrisMachine, ctx: &mut TetrisCtx) {
    ctx.reset();
}

const TRANSITIONS: &[TetrisRule] = &[
    TetrisRule {
        from: TetrisState::Init,
        event: Some(TetrisEvent::Start),
        to: TetrisState::Spawn,
        on_exit: None,
        on_enter: Some(on_enter_spawn),
    },
    TetrisRule {
        from: TetrisState::Spawn,
        event: Some(TetrisEvent::Tick),
        to: TetrisState::Falling,
        on_exit: None,
        on_enter: None,
    },
    // Fires only when spawn left the piece colliding; see handle_event.
    TetrisRule {
        from: TetrisState::Spawn,
        event: None,
        to: TetrisState::GameOver,
        on_exit: None,
        on_enter: Some(on_enter_game_over),
    },
    // Tick/SoftDrop reach the table only once the piece cannot fall.
    TetrisRule {
        from: TetrisState::Falling,
        event: Some(TetrisEvent::Tick),
        to: TetrisState::Locking,
        on_exit: None,
        on_enter: Some(on_enter_lock),
    },
    TetrisRule {
        from: TetrisState::Falling,
        event: Some(TetrisEvent::SoftDrop),
        to: TetrisState::Locking,
        on_exit: None,
        on_enter: Some(on_enter_lock),
    },
    TetrisRule {
        from: TetrisState::Falling,
        event: Some(TetrisEvent::HardDrop),
        to: TetrisState::Locking,
        on_exit: None,
        on_enter: Some(on_enter_lock),
    },
    TetrisRule {
        from: TetrisState::Falling,
        event: Some(TetrisEvent::PauseToggle),
        to: TetrisState::Paused,
        on_exit: None,
        on_enter: None,
    },
    TetrisRule {
        from: TetrisState::Paused,
        event: Some(TetrisEvent::PauseToggle),
        to: TetrisState::Falling,
        on_exit: None,
        on_enter: None,
    },
    TetrisRule {
        from: TetrisState::Falling,
        event: Some(TetrisEvent::Terminate),
        to: TetrisState::GameOver,
        on_exit: None,
        on_enter: Some(on_enter_game_over),
    },
    TetrisRule {
        from: TetrisState::Paused,
        event: Some(TetrisEvent::Terminate),
        to: TetrisState::GameOver,
        on_exit: None,
        on_enter: Some(on_enter_game_over),
    },
    TetrisRule {
        from: TetrisState::Spawn,
        event: Some(TetrisEvent::Terminate),
        to: TetrisState::GameOver,
        on_exit: None,
        on_enter: Some(on_enter_game_over),
    },
    TetrisRule {
        from: TetrisState::Locking,
        event: Some(TetrisEvent::Terminate),
        to: TetrisState::GameOver,
        on_exit: None,
        on_enter: Some(on_enter_game_over),
    },
    TetrisRule {
        from: TetrisState::Locking,
        event: Some(TetrisEvent::Tick),
        to: TetrisState::Spawn,
        on_exit: None,
        on_enter: Some(on_enter_spawn),
    },
    TetrisRule {
        from: TetrisState::GameOver,
        event: None,
        to: TetrisState::Init,
        on_exit: None,
        on_enter: Some(on_enter_init),
    },
];

pub struct TetrisGame {
    fsm: TetrisMachine,
    ctx: TetrisCtx,
}

impl TetrisGame {
    pub fn new(seed: u32) -> Self {
        Self::with_store(seed, HighScoreStore::for_game("tetris"))
    }

    pub fn with_store(seed: u32, store: HighScoreStore) -> Self {
        Self {
            fsm: Machine::new(TRANSITIONS, TetrisState::Init),
            ctx: TetrisCtx::new(seed, store),
        }
    }

    pub fn state(&self) -> TetrisState {
        self.fsm.state()
    }

    fn handle_event(&mut self, event: TetrisEvent) {
        match (self.fsm.state(), event) {
            // A step that still has room just moves the piece.
            (TetrisState::Falling, TetrisEvent::Tick | TetrisEvent::SoftDrop) => {
                if self.ctx.try_move(0, 1) {
                    return;
                }
            }
            (TetrisState::Falling, TetrisEvent::HardDrop) => {
                while self.ctx.try_move(0, 1) {}
            }
            (TetrisState::Falling, TetrisEvent::MoveLeft) => {
                self.ctx.try_move(-1, 0);
                return;
            }
            (TetrisState::Falling, TetrisEvent::MoveRight) => {
                self.ctx.try_move(1, 0);
                return;
            }
            (TetrisState::Falling, TetrisEvent::Rotate) => {
                self.ctx.try_rotate();
                return;
            }
            // Restart from the end screen: the automatic rule resets the
            // context, then Start runs through the normal Init path.
            (TetrisState::GameOver, TetrisEvent::Start) => {
                self.fsm.tick(&mut self.ctx);
            }
            _ => {}
        }

        self.fsm.dispatch(&mut self.ctx, event);

        if self.fsm.state() == TetrisState::Spawn && self.ctx.game_over {
            self.fsm.tick(&mut self.ctx);
        }
    }
}

impl Game for TetrisGame {
    fn handle_input(&mut self, action: UserAction, hold: bool) {
        let event = match action {
            UserAction::Start => TetrisEvent::Start,
            UserAction::Pause => TetrisEvent::PauseToggle,
            UserAction::Terminate => TetrisEvent::Terminate,
            UserAction::Left => TetrisEvent::MoveLeft,
            UserAction::Right => TetrisEvent::MoveRight,
            UserAction::Down => {
                if hold {
                    TetrisEvent::HardDrop
                } else {
                    TetrisEvent::SoftDrop
                }
            }
            UserAction::Action => TetrisEvent::Rotate,
            UserAction::Up => return,
        };
        self.handle_event(event);
    }

    fn update(&mut self) {
        self.handle_event(TetrisEvent::Tick);
    }

    fn info(&mut self) -> &GameInfo {
        let state = self.fsm.state();
        let ctx = &mut self.ctx;

        ctx.board.write_to(&mut ctx.info);
        let show_piece = matches!(
            state,
            TetrisState::Spawn | TetrisState::Falling | TetrisState::Locking
        ) && !ctx.game_over;
        if show_piece {
            let marker = pieces::marker(ctx.cur.kind);
            for (dx, dy) in ctx.cur.shape() {
                let x = ctx.cur.x + dx;
                let y = ctx.cur.y + dy;
                if y >= 0 && (0..FIELD_WIDTH as i8).contains(&x) {
                    if let Some(row) = ctx.info.field.get_mut(y as usize) {
                        row[x as usize] = marker;
                    }
                }
            }
        }

        ctx.info.next = Default::default();
        if !matches!(state, TetrisState::Init | TetrisState::GameOver) {
            let marker = pieces::marker(ctx.next.kind);
            for (dx, dy) in pieces::shape(ctx.next.kind, ctx.next.rotation) {
                ctx.info.next[dy as usize][dx as usize] = marker;
            }
        }

        ctx.info.score = ctx.score;
        ctx.info.high_score = ctx.high_score;
        ctx.info.level = ctx.level;
        ctx.info.speed = ctx.speed;
        ctx.info.pause = state == TetrisState::Paused;
        ctx.info.game_over = ctx.game_over || state == TetrisState::GameOver;
        &ctx.info
    }
}

impl Drop for TetrisGame {
    fn drop(&mut self) {
        if self.ctx.high_score > 0 {
            self.ctx.store.save(self.ctx.high_score);
        }
    }
}
