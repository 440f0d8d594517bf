#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Thin round orchestration for Maze Chase.
//!
//! Tracks the `ChoosingLevel -> Playing -> {Won, Lost} -> ChoosingLevel |
//! Finished` lifecycle. Terminal conditions are checked once per full tick,
//! after the player move, the ghost sweep, and collision resolution have all
//! been applied. A replay rebuilds every piece of world state from level
//! data; nothing carries over between rounds.

use maze_chase_core::RoundOutcome;
use maze_chase_world::{query, World};

/// Lifecycle phases of a play session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundPhase {
    /// Awaiting a level selection.
    ChoosingLevel,
    /// A round is in progress.
    Playing,
    /// The last round ended with every pellet consumed.
    Won,
    /// The last round ended with the player caught.
    Lost,
    /// The player declined another round.
    Finished,
}

/// Choice offered once a round has ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReplayChoice {
    /// Rebuild the world and pick a level again.
    PlayAgain,
    /// Leave the session.
    Quit,
}

/// Orchestrates level selection, play, and replay transitions.
#[derive(Clone, Copy, Debug)]
pub struct RoundController {
    phase: RoundPhase,
}

impl RoundController {
    /// Creates a controller awaiting its first level selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: RoundPhase::ChoosingLevel,
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Marks the freshly built world as running.
    ///
    /// Only meaningful while a level is being chosen; any other phase leaves
    /// the controller untouched.
    pub fn level_loaded(&mut self) {
        if self.phase == RoundPhase::ChoosingLevel {
            self.phase = RoundPhase::Playing;
        }
    }

    /// Checks the world's terminal conditions once per full tick.
    ///
    /// Returns the outcome when the round just ended and records it in the
    /// phase; returns `None` while play continues or outside a round.
    pub fn observe(&mut self, world: &World) -> Option<RoundOutcome> {
        if self.phase != RoundPhase::Playing {
            return None;
        }
        let outcome = query::outcome(world);
        match outcome {
            Some(RoundOutcome::Won) => self.phase = RoundPhase::Won,
            Some(RoundOutcome::Lost) => self.phase = RoundPhase::Lost,
            None => {}
        }
        outcome
    }

    /// Applies the end-of-round replay choice.
    ///
    /// Ignored unless the previous round actually ended.
    pub fn resolve_replay(&mut self, choice: ReplayChoice) {
        if matches!(self.phase, RoundPhase::Won | RoundPhase::Lost) {
            self.phase = match choice {
                ReplayChoice::PlayAgain => RoundPhase::ChoosingLevel,
                ReplayChoice::Quit => RoundPhase::Finished,
            };
        }
    }
}

impl Default for RoundController {
    fn default() -> Self {
        Self::new()
    }
}
