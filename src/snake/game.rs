//! Snake game logic.
//!
//! The body is a deque of cells, head first, mirrored by a hash set of
//! occupied cells so collision checks stay O(1) at any length. Direction
//! input is buffered and committed at the next tick; a reversal onto the
//! neck is ignored there, so rapid opposite-arrow presses between ticks
//! cannot kill the snake.

use std::collections::{HashSet, VecDeque};

use crate::fsm::{Machine, Transition};
use crate::registry::Game;
use crate::rng::SimpleRng;
use crate::score::HighScoreStore;
use crate::types::{
    GameInfo, UserAction, APPLES_PER_LEVEL, APPLE_SCORE, FIELD_HEIGHT, FIELD_WIDTH,
    SNAKE_APPLE_CELL, SNAKE_BASE_INTERVAL_MS, SNAKE_BODY_CELL, SNAKE_GAME_OVER_DELAY_TICKS,
    SNAKE_HEAD_CELL, SNAKE_INITIAL_LENGTH, SNAKE_INTERVAL_STEP_MS, SNAKE_MIN_INTERVAL_MS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeState {
    Init,
    Moving,
    Paused,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakeEvent {
    Start,
    PauseToggle,
    Terminate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Point {
    x: i8,
    y: i8,
}

impl Point {
    fn key(self) -> usize {
        self.y as usize * FIELD_WIDTH + self.x as usize
    }

    fn in_field(self) -> bool {
        (0..FIELD_WIDTH as i8).contains(&self.x) && (0..FIELD_HEIGHT as i8).contains(&self.y)
    }
}

pub struct SnakeCtx {
    body: VecDeque<Point>,
    occupied: HashSet<usize>,
    dir: Direction,
    pending: Option<Direction>,
    apple: Point,
    rng: SimpleRng,
    score: u32,
    high_score: u32,
    level: u32,
    speed: u32,
    game_over: bool,
    win: bool,
    over_ticks: u32,
    store: HighScoreStore,
    info: GameInfo,
}

impl SnakeCtx {
    fn new(seed: u32, store: HighScoreStore) -> Self {
        let high_score = store.load();
        Self {
            body: VecDeque::new(),
            occupied: HashSet::new(),
            dir: Direction::Right,
            pending: None,
            apple: Point { x: 0, y: 0 },
            rng: SimpleRng::new(seed),
            score: 0,
            high_score,
            level: 1,
            speed: SNAKE_BASE_INTERVAL_MS,
            game_over: false,
            win: false,
            over_ticks: 0,
            store,
            info: GameInfo {
                high_score,
                ..GameInfo::default()
            },
        }
    }

    /// Lay out the starting snake in the middle of the field, heading right.
    fn init_run(&mut self) {
        self.body.clear();
        self.occupied.clear();
        let y = (FIELD_HEIGHT / 2) as i8;
        let head_x = (FIELD_WIDTH / 2) as i8;
        for i in 0..SNAKE_INITIAL_LENGTH as i8 {
            let p = Point { x: head_x - i, y };
            self.body.push_back(p);
            self.occupied.insert(p.key());
        }
        self.dir = Direction::Right;
        self.pending = None;
        self.spawn_apple();
    }

    fn reset(&mut self) {
        self.body.clear();
        self.occupied.clear();
        self.pending = None;
        self.score = 0;
        self.level = 1;
        self.speed = SNAKE_BASE_INTERVAL_MS;
        self.game_over = false;
        self.win = false;
        self.over_ticks = 0;
    }

    fn set_pending(&mut self, dir: Direction) {
        self.pending = Some(dir);
    }

    /// Place the apple uniformly over free cells. A full field falls back
    /// to the tail cell (about to vacate), an empty one to the center.
    fn spawn_apple(&mut self) {
        let free = FIELD_WIDTH * FIELD_HEIGHT - self.body.len();
        if free == 0 {
            self.apple = self.body.back().copied().unwrap_or(Point {
                x: (FIELD_WIDTH / 2) as i8,
                y: (FIELD_HEIGHT / 2) as i8,
            });
            return;
        }
        let mut nth = self.rng.next_range(free as u32) as usize;
        for y in 0..FIELD_HEIGHT as i8 {
            for x in 0..FIELD_WIDTH as i8 {
                let p = Point { x, y };
                if self.occupied.contains(&p.key()) {
                    continue;
                }
                if nth == 0 {
                    self.apple = p;
                    return;
                }
                nth -= 1;
            }
        }
    }

    /// Advance one cell. Sets `game_over` (and `win`) on a terminal step.
    fn step(&mut self) {
        if let Some(p) = self.pending.take() {
            if p != self.dir.opposite() {
                self.dir = p;
            }
        }

        let head = match self.body.front() {
            Some(&p) => p,
            None => return,
        };
        let (dx, dy) = self.dir.delta();
        let new_head = Point {
            x: head.x + dx,
            y: head.y + dy,
        };

        if !new_head.in_field() {
            self.game_over = true;
            return;
        }

        let eating = new_head == self.apple;
        let tail = *self.body.back().unwrap();
        // The tail cell vacates this tick unless the snake grows into it.
        let tail_vacates = !eating && new_head == tail;
        if self.occupied.contains(&new_head.key()) && !tail_vacates {
            self.game_over = true;
            return;
        }

        self.body.push_front(new_head);
        self.occupied.insert(new_head.key());

        if eating {
            self.score += APPLE_SCORE;
            self.level = 1 + self.score / APPLES_PER_LEVEL;
            self.speed = SNAKE_BASE_INTERVAL_MS
                .saturating_sub(self.level * SNAKE_INTERVAL_STEP_MS)
                .max(SNAKE_MIN_INTERVAL_MS);
            if self.score > self.high_score {
                self.high_score = self.score;
                self.store.save(self.high_score);
            }
            if self.body.len() >= FIELD_WIDTH * FIELD_HEIGHT {
                self.win = true;
                self.game_over = true;
                return;
            }
            self.spawn_apple();
        } else {
            let popped = self.body.pop_back().unwrap();
            if popped != new_head {
                self.occupied.remove(&popped.key());
            }
        }
    }
}

type SnakeMachine = Machine<SnakeState, SnakeEvent, SnakeCtx>;
type SnakeRule = Transition<SnakeState, SnakeEvent, SnakeCtx>;

fn on_enter_moving(_m: &SnakeMachine, ctx: &mut SnakeCtx) {
    // Resuming from pause must not relayout the snake.
    if ctx.body.is_empty() {
        ctx.init_run();
    }
}

fn on_enter_game_over(_m: &SnakeMachine, ctx: &mut SnakeCtx) {
    ctx.game_over = true;
    ctx.over_ticks = 0;
    if ctx.score > 0 {
        ctx.store.save(ctx.high_score);
    }
}

fn on_enter_init(_m: &SnakeMachine, ctx: &mut SnakeCtx) {
    ctx.reset();
}

const TRANSITIONS: &[SnakeRule] = &[
    SnakeRule {
        from: SnakeState::Init,
        event: Some(SnakeEvent::Start),
        to: SnakeState::Moving,
        on_exit: None,
        on_enter: Some(on_enter_moving),
    },
    SnakeRule {
        from: SnakeState::Moving,
        event: Some(SnakeEvent::PauseToggle),
        to: SnakeState::Paused,
        on_exit: None,
        on_enter: None,
    },
    SnakeRule {
        from: SnakeState::Paused,
        event: Some(SnakeEvent::PauseToggle),
        to: SnakeState::Moving,
        on_exit: None,
        on_enter: Some(on_enter_moving),
    },
    SnakeRule {
        from: SnakeState::Moving,
        event: Some(SnakeEvent::Terminate),
        to: SnakeState::GameOver,
        on_exit: None,
        on_enter: Some(on_enter_game_over),
    },
    SnakeRule {
        from: SnakeState::Paused,
        event: Some(SnakeEvent::Terminate),
        to: SnakeState::GameOver,
        on_exit: None,
        on_enter: Some(on_enter_game_over),
    },
    // Fired once the end-screen delay has run down, or on restart.
    SnakeRule {
        from: SnakeState::GameOver,
        event: None,
        to: SnakeState::Init,
        on_exit: None,
        on_enter: Some(on_enter_init),
    },
];

pub struct SnakeGame {
    fsm: SnakeMachine,
    ctx: SnakeCtx,
}

impl SnakeGame {
    pub fn new(seed: u32) -> Self {
        Self::with_store(seed, HighScoreStore::for_game("snake"))
    }

    pub fn with_store(seed: u32, store: HighScoreStore) -> Self {
        Self {
            fsm: Machine::new(TRANSITIONS, SnakeState::Init),
            ctx: SnakeCtx::new(seed, store),
        }
    }

    pub fn state(&self) -> SnakeState {
        self.fsm.state()
    }
}

impl Game for SnakeGame {
    fn handle_input(&mut self, action: UserAction, _hold: bool) {
        match action {
            UserAction::Start => {
                if self.fsm.state() == SnakeState::GameOver {
                    self.fsm.tick(&mut self.ctx);
                }
                self.fsm.dispatch(&mut self.ctx, SnakeEvent::Start);
            }
            UserAction::Pause => {
                self.fsm.dispatch(&mut self.ctx, SnakeEvent::PauseToggle);
            }
            UserAction::Terminate => {
                self.fsm.dispatch(&mut self.ctx, SnakeEvent::Terminate);
            }
            UserAction::Up => self.buffer_dir(Direction::Up),
            UserAction::Down => self.buffer_dir(Direction::Down),
            UserAction::Left => self.buffer_dir(Direction::Left),
            UserAction::Right => self.buffer_dir(Direction::Right),
            UserAction::Action => {}
        }
    }

    fn update(&mut self) {
        match self.fsm.state() {
            SnakeState::Moving => {
                self.ctx.step();
                if self.ctx.game_over {
                    self.fsm.dispatch(&mut self.ctx, SnakeEvent::Terminate);
                }
            }
            SnakeState::GameOver => {
                self.ctx.over_ticks += 1;
                if self.ctx.over_ticks >= SNAKE_GAME_OVER_DELAY_TICKS {
                    self.fsm.tick(&mut self.ctx);
                }
            }
            _ => {}
        }
    }

    fn info(&mut self) -> &GameInfo {
        let state = self.fsm.state();
        let ctx = &mut self.ctx;

        ctx.info.field = Default::default();
        ctx.info.next = Default::default();
        if !ctx.body.is_empty() {
            for p in ctx.body.iter().skip(1) {
                ctx.info.field[p.y as usize][p.x as usize] = SNAKE_BODY_CELL;
            }
            let head = ctx.body[0];
            ctx.info.field[head.y as usize][head.x as usize] = SNAKE_HEAD_CELL;
            if ctx.apple.in_field() && !ctx.occupied.contains(&ctx.apple.key()) {
                ctx.info.field[ctx.apple.y as usize][ctx.apple.x as usize] = SNAKE_APPLE_CELL;
            }
        }

        ctx.info.score = ctx.score;
        ctx.info.high_score = ctx.high_score;
        ctx.info.level = ctx.level;
        ctx.info.speed = ctx.speed;
        ctx.info.pause = state == SnakeState::Paused;
        ctx.info.game_over = ctx.game_over || state == SnakeState::GameOver;
        &ctx.info
    }
}

impl SnakeGame {
    fn buffer_dir(&mut self, dir: Direction) {
        if self.fsm.state() == SnakeState::Moving {
            self.ctx.set_pending(dir);
        }
    }
}

impl Drop for SnakeGame {
    fn drop(&mut self) {
        if self.ctx.high_score > 0 {
            self.ctx.store.save(self.ctx.high_score);
        }
    }
}
