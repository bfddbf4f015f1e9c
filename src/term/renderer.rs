//! TerminalRenderer: draws a game snapshot to a real terminal.
//!
//! Full redraw per frame. The grids involved are tiny (10x20 plus a 4x4
//! preview), so diffing buys nothing here; every frame is queued in one
//! batch and flushed once.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::types::{GameInfo, FIELD_HEIGHT, FIELD_WIDTH, PREVIEW_SIZE};

/// Two terminal columns per game cell keeps the aspect ratio near square.
const CELL: &str = "[]";
const EMPTY: &str = " .";

pub struct TerminalRenderer {
    stdout: io::Stdout,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub fn draw(&mut self, info: &GameInfo, title: &str) -> Result<()> {
        self.stdout
            .queue(terminal::Clear(terminal::ClearType::All))?;

        let field_cols = (FIELD_WIDTH * 2) as u16;
        self.stdout.queue(cursor::MoveTo(0, 0))?;
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(Print(format!("+{}+", "-".repeat(field_cols as usize))))?;

        for (y, row) in info.field.iter().enumerate() {
            self.stdout.queue(cursor::MoveTo(0, y as u16 + 1))?;
            self.stdout.queue(Print("|"))?;
            for &cell in row {
                self.queue_cell(cell)?;
            }
            self.stdout.queue(ResetColor)?;
            self.stdout.queue(Print("|"))?;
        }

        self.stdout
            .queue(cursor::MoveTo(0, FIELD_HEIGHT as u16 + 1))?;
        self.stdout.queue(Print(format!("+{}+", "-".repeat(field_cols as usize))))?;

        // Sidebar.
        let sx = field_cols + 4;
        self.queue_line(sx, 1, title)?;
        self.queue_line(sx, 3, &format!("score  {}", info.score))?;
        self.queue_line(sx, 4, &format!("best   {}", info.high_score))?;
        self.queue_line(sx, 5, &format!("level  {}", info.level))?;

        self.queue_line(sx, 7, "next")?;
        for (y, row) in info.next.iter().enumerate() {
            self.stdout.queue(cursor::MoveTo(sx, y as u16 + 8))?;
            for &cell in row {
                self.queue_cell(cell)?;
            }
            self.stdout.queue(ResetColor)?;
        }

        if info.pause {
            self.queue_line(sx, 8 + PREVIEW_SIZE as u16 + 1, "** paused **")?;
        } else if info.game_over {
            self.queue_line(sx, 8 + PREVIEW_SIZE as u16 + 1, "** game over **")?;
        }

        self.queue_line(sx, 15, "1/2 game  enter start")?;
        self.queue_line(sx, 16, "p pause  q quit")?;

        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;
        Ok(())
    }

    fn queue_cell(&mut self, marker: u8) -> Result<()> {
        if marker == 0 {
            self.stdout.queue(ResetColor)?;
            self.stdout.queue(Print(EMPTY))?;
        } else {
            self.stdout
                .queue(SetForegroundColor(marker_color(marker)))?;
            self.stdout.queue(Print(CELL))?;
        }
        Ok(())
    }

    fn queue_line(&mut self, x: u16, y: u16, text: &str) -> Result<()> {
        self.stdout.queue(cursor::MoveTo(x, y))?;
        self.stdout.queue(Print(text))?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn marker_color(marker: u8) -> Color {
    match marker {
        1 => Color::Cyan,
        2 => Color::Yellow,
        3 => Color::Magenta,
        4 => Color::Green,
        5 => Color::Red,
        6 => Color::Blue,
        7 => Color::White,
        _ => Color::Grey,
    }
}
