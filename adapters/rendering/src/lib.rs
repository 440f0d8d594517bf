#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering, input and audio contracts for Maze Chase adapters.
//!
//! Backends paint a full [`Scene`] once per round start and afterwards only
//! the [`CellPatch`] values derived from the world's change events, one per
//! affected cell per tick. Input and audio collaborators are specified here
//! as traits so the simulation loop stays independent of any terminal
//! library.

use anyhow::Result as AnyResult;
use maze_chase_core::{CellCoord, Direction, Event, GlyphColor};
use std::{error::Error, fmt};

/// RGBA color used when presenting cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Byte RGB components of the color, quantized from the float channels.
    #[must_use]
    pub fn to_rgb_u8(self) -> (u8, u8, u8) {
        let quantize = |channel: f32| (channel.clamp(0.0, 1.0) * 255.0).round() as u8;
        (quantize(self.red), quantize(self.green), quantize(self.blue))
    }
}

impl From<GlyphColor> for Color {
    fn from(color: GlyphColor) -> Self {
        Self::from_rgb_u8(color.red(), color.green(), color.blue())
    }
}

/// Glyph and color pair displayed at a single cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellPresentation {
    /// Character drawn for the cell.
    pub glyph: char,
    /// Foreground color applied to the glyph.
    pub color: Color,
}

impl CellPresentation {
    /// Creates a new cell presentation descriptor.
    #[must_use]
    pub const fn new(glyph: char, color: Color) -> Self {
        Self { glyph, color }
    }
}

/// Gameplay figures surfaced alongside the maze.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusLine {
    /// Pellets still uneaten.
    pub pellets_remaining: u32,
    /// Empowered ticks remaining.
    pub power_ticks: u32,
    /// Whether the player is still alive.
    pub alive: bool,
}

/// Full-grid description painted once per round start.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    columns: u32,
    rows: u32,
    cells: Vec<CellPresentation>,
    status: StatusLine,
}

impl Scene {
    /// Creates a new scene descriptor.
    ///
    /// Returns an error when the cell count does not match the provided
    /// dimensions.
    pub fn new(
        columns: u32,
        rows: u32,
        cells: Vec<CellPresentation>,
        status: StatusLine,
    ) -> Result<Self, RenderingError> {
        let expected_u64 = u64::from(columns) * u64::from(rows);
        let expected = usize::try_from(expected_u64).unwrap_or(usize::MAX);
        if cells.len() != expected {
            return Err(RenderingError::CellCountMismatch {
                expected,
                found: cells.len(),
            });
        }
        Ok(Self {
            columns,
            rows,
            cells,
            status,
        })
    }

    /// Dimensions of the scene as `(columns, rows)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Presentation stored for the provided cell, if it lies in bounds.
    #[must_use]
    pub fn cell(&self, cell: CellCoord) -> Option<CellPresentation> {
        if cell.column() >= self.columns || cell.row() >= self.rows {
            return None;
        }
        let index = cell.row() as usize * self.columns as usize + cell.column() as usize;
        self.cells.get(index).copied()
    }

    /// Status figures captured with the scene.
    #[must_use]
    pub const fn status(&self) -> StatusLine {
        self.status
    }
}

/// Single-cell repaint request derived from a world change event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellPatch {
    /// Coordinate of the cell to repaint.
    pub cell: CellCoord,
    /// Character now displayed at the cell.
    pub glyph: char,
    /// Foreground color applied to the glyph.
    pub color: Color,
}

/// Discrete audio cues fired by the simulation loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AudioCue {
    /// A round just started.
    Intro,
    /// The player completed a step.
    Move,
    /// Something edible was consumed.
    Eat,
    /// The player bumped into a solid occupant.
    HitWall,
}

/// Abstract player intents produced by the input collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerInput {
    /// Attempt a step in the provided direction.
    Move(Direction),
    /// Leave the current round.
    Quit,
}

/// Rendering backend capable of presenting Maze Chase rounds.
pub trait RenderingBackend {
    /// Paints the full scene; called once per round start.
    fn begin_round(&mut self, scene: &Scene) -> AnyResult<()>;

    /// Repaints the affected cells and refreshes the status figures.
    fn apply_patches(&mut self, patches: &[CellPatch], status: &StatusLine) -> AnyResult<()>;
}

/// Blocking input collaborator.
///
/// Implementations swallow unrecognized input and only ever surface one of
/// the [`PlayerInput`] intents, so a tick is never consumed by an ignored
/// key press.
pub trait InputSource {
    /// Waits for the next recognized player intent.
    fn next_input(&mut self) -> AnyResult<PlayerInput>;
}

/// Fire-and-forget audio collaborator.
pub trait AudioBackend {
    /// Plays the provided cue; must never block the simulation.
    fn play(&mut self, cue: AudioCue);
}

/// Audio backend that swallows every cue.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullAudio;

impl AudioBackend for NullAudio {
    fn play(&mut self, _cue: AudioCue) {}
}

/// Builds repaint requests from a tick's event stream.
///
/// Each affected cell is patched at most once; `lookup` supplies the cell's
/// final appearance for the tick, so collapsing duplicate change events is
/// lossless.
#[must_use]
pub fn patches_from_events<F>(events: &[Event], lookup: F) -> Vec<CellPatch>
where
    F: Fn(CellCoord) -> CellPresentation,
{
    let mut patched: Vec<CellCoord> = Vec::new();
    let mut patches = Vec::new();
    for event in events {
        let Event::CellChanged { cell } = event else {
            continue;
        };
        if patched.contains(cell) {
            continue;
        }
        patched.push(*cell);
        let presentation = lookup(*cell);
        patches.push(CellPatch {
            cell: *cell,
            glyph: presentation.glyph,
            color: presentation.color,
        });
    }
    patches
}

/// Derives the audio cues a tick's event stream calls for.
#[must_use]
pub fn cues_from_events(events: &[Event]) -> Vec<AudioCue> {
    let mut cues = Vec::new();
    for event in events {
        match event {
            Event::PlayerMoved { .. } => cues.push(AudioCue::Move),
            Event::PelletEaten { .. }
            | Event::PowerPelletEaten { .. }
            | Event::GhostEaten { .. } => cues.push(AudioCue::Eat),
            Event::PlayerBlocked { .. } => cues.push(AudioCue::HitWall),
            Event::GhostMoved { .. }
            | Event::PlayerCaught { .. }
            | Event::CellChanged { .. } => {}
        }
    }
    cues
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderingError {
    /// The cell buffer does not cover the scene dimensions exactly.
    CellCountMismatch {
        /// Number of cells the dimensions call for.
        expected: usize,
        /// Number of cells actually provided.
        found: usize,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CellCountMismatch { expected, found } => {
                write!(
                    f,
                    "scene requires exactly {expected} cells (received {found})"
                )
            }
        }
    }
}

impl Error for RenderingError {}
