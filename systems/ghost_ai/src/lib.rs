#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Uniform-random ghost planning system.
//!
//! Ghosts are intentionally unintelligent: each tick every ghost picks one
//! of the four cardinal directions with equal probability, with no memory of
//! its previous step and no pathing toward the player. Legality is not
//! checked here; the world rejects steps into walls, which doubles as the
//! "no fallback direction" rule.

use maze_chase_core::{Command, Direction};
use maze_chase_world::query::GhostView;
use rand::Rng;

/// Pure system that proposes one random step per ghost each tick.
#[derive(Debug, Default)]
pub struct GhostPlanner;

impl GhostPlanner {
    /// Emits one step command per ghost in identifier order, followed by a
    /// single collision-resolution request.
    ///
    /// The trailing [`Command::ResolveCollisions`] makes the world compare
    /// every ghost's coordinate against the player's only after the whole
    /// sweep completed.
    pub fn plan<R>(&self, rng: &mut R, ghosts: &GhostView, out: &mut Vec<Command>)
    where
        R: Rng + ?Sized,
    {
        for ghost in ghosts.iter() {
            let direction = Direction::ALL[rng.gen_range(0..Direction::ALL.len())];
            out.push(Command::StepGhost {
                ghost_id: ghost.id,
                direction,
            });
        }
        out.push(Command::ResolveCollisions);
    }
}
