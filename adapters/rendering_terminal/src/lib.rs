#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Crossterm-backed terminal adapter for Maze Chase.
//!
//! The backend owns the terminal session: constructing it switches to the
//! alternate screen in raw mode with a hidden cursor, and dropping it
//! restores the caller's shell no matter how the round ended. Rendering is
//! cell-addressed: one full paint per round start, then only the patched
//! cells. Input is a blocking keyboard read that swallows unrecognized keys,
//! and the audio collaborator rings the terminal bell.

mod theme;

pub use theme::Theme;

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event as TerminalEvent, KeyCode, KeyEventKind},
    style::{Color as TerminalColor, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand, QueueableCommand,
};
use maze_chase_core::{CellCoord, Direction};
use maze_chase_rendering::{
    AudioBackend, AudioCue, CellPatch, Color, InputSource, PlayerInput, RenderingBackend, Scene,
    StatusLine,
};
use std::io::{self, Stdout, Write};

/// Rendering backend implemented on top of crossterm.
#[derive(Debug)]
pub struct TerminalBackend {
    stdout: Stdout,
    status_row: u16,
}

impl TerminalBackend {
    /// Claims the terminal: raw mode, alternate screen, hidden cursor.
    pub fn new() -> Result<Self> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode().context("failed to enable raw terminal mode")?;
        let _ = stdout
            .execute(EnterAlternateScreen)
            .context("failed to enter the alternate screen")?;
        let _ = stdout.execute(Hide).context("failed to hide the cursor")?;
        Ok(Self {
            stdout,
            status_row: 0,
        })
    }

    fn queue_cell(&mut self, cell: CellCoord, glyph: char, color: Color) -> Result<()> {
        let column = u16::try_from(cell.column()).unwrap_or(u16::MAX);
        let row = u16::try_from(cell.row()).unwrap_or(u16::MAX);
        let (red, green, blue) = color.to_rgb_u8();
        let _ = self.stdout.queue(MoveTo(column, row))?;
        let _ = self
            .stdout
            .queue(SetForegroundColor(TerminalColor::Rgb {
                r: red,
                g: green,
                b: blue,
            }))?;
        let _ = self.stdout.queue(Print(glyph))?;
        Ok(())
    }

    fn queue_status(&mut self, status: &StatusLine) -> Result<()> {
        let _ = self.stdout.queue(MoveTo(0, self.status_row))?;
        let _ = self.stdout.queue(ResetColor)?;
        let _ = self.stdout.queue(Clear(ClearType::CurrentLine))?;
        let power = if status.power_ticks > 0 {
            format!("  power {:>2}", status.power_ticks)
        } else {
            String::new()
        };
        let _ = self
            .stdout
            .queue(Print(format!("pellets {:>3}{power}", status.pellets_remaining)))?;
        Ok(())
    }
}

impl RenderingBackend for TerminalBackend {
    fn begin_round(&mut self, scene: &Scene) -> Result<()> {
        let (columns, rows) = scene.dimensions();
        self.status_row = u16::try_from(rows).unwrap_or(u16::MAX);

        let _ = self.stdout.queue(Clear(ClearType::All))?;
        for row in 0..rows {
            for column in 0..columns {
                let cell = CellCoord::new(column, row);
                let Some(presentation) = scene.cell(cell) else {
                    continue;
                };
                self.queue_cell(cell, presentation.glyph, presentation.color)?;
            }
        }
        self.queue_status(&scene.status())?;
        self.stdout
            .flush()
            .context("failed to flush the round paint")
    }

    fn apply_patches(&mut self, patches: &[CellPatch], status: &StatusLine) -> Result<()> {
        for patch in patches {
            self.queue_cell(patch.cell, patch.glyph, patch.color)?;
        }
        self.queue_status(status)?;
        self.stdout.flush().context("failed to flush cell patches")
    }
}

impl Drop for TerminalBackend {
    fn drop(&mut self) {
        // Failing to restore the shell is not worth a panic during unwind.
        let _ = self.stdout.execute(Show);
        let _ = self.stdout.execute(LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Blocking keyboard reader mapping arrow and WASD keys to directions.
#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn next_input(&mut self) -> Result<PlayerInput> {
        loop {
            let TerminalEvent::Key(key) =
                event::read().context("failed to read terminal input")?
            else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let input = match key.code {
                KeyCode::Up | KeyCode::Char('w') => PlayerInput::Move(Direction::Up),
                KeyCode::Down | KeyCode::Char('s') => PlayerInput::Move(Direction::Down),
                KeyCode::Left | KeyCode::Char('a') => PlayerInput::Move(Direction::Left),
                KeyCode::Right | KeyCode::Char('d') => PlayerInput::Move(Direction::Right),
                KeyCode::Esc | KeyCode::Char('q') => PlayerInput::Quit,
                _ => continue,
            };
            return Ok(input);
        }
    }
}

/// Audio collaborator that rings the terminal bell for audible cues.
///
/// Plain movement stays silent so held keys do not turn the terminal into a
/// metronome.
#[derive(Debug)]
pub struct TerminalBell {
    stdout: Stdout,
}

impl TerminalBell {
    /// Creates a bell writing to the current process stdout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }
}

impl Default for TerminalBell {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioBackend for TerminalBell {
    fn play(&mut self, cue: AudioCue) {
        let audible = matches!(cue, AudioCue::Intro | AudioCue::Eat | AudioCue::HitWall);
        if audible {
            // Fire and forget; a swallowed bell must never stall the tick.
            let _ = self.stdout.write_all(b"\x07");
            let _ = self.stdout.flush();
        }
    }
}
