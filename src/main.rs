//! Terminal arcade runner (default binary).
//!
//! Drives the game registry from crossterm key events and a timer. The
//! tick interval follows whatever the active game reports in its
//! snapshot, so the loop speeds up as the player levels.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use brick_arcade::registry::Registry;
use brick_arcade::term::TerminalRenderer;
use brick_arcade::types::{GameId, UserAction};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut registry = Registry::with_default_games();
    registry.switch(GameId::Tetris, seed());

    let mut last_tick = Instant::now();

    loop {
        let title = registry.active_id().map_or("", |id| id.as_str());
        let mut interval = Duration::from_millis(100);
        if let Some(info) = registry.info() {
            interval = Duration::from_millis(info.speed.max(16) as u64);
            term.draw(info, title)?;
        }

        let timeout = interval
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let hold = key.modifiers.contains(KeyModifiers::SHIFT);
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('1') => {
                            registry.switch(GameId::Tetris, seed());
                        }
                        KeyCode::Char('2') => {
                            registry.switch(GameId::Snake, seed());
                        }
                        KeyCode::Enter => registry.handle_input(UserAction::Start, hold),
                        KeyCode::Char('p') => registry.handle_input(UserAction::Pause, hold),
                        KeyCode::Left => registry.handle_input(UserAction::Left, hold),
                        KeyCode::Right => registry.handle_input(UserAction::Right, hold),
                        KeyCode::Up => registry.handle_input(UserAction::Up, hold),
                        KeyCode::Down => registry.handle_input(UserAction::Down, hold),
                        KeyCode::Char(' ') => registry.handle_input(UserAction::Action, hold),
                        _ => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= interval {
            last_tick = Instant::now();
            registry.update();
        }
    }
}
