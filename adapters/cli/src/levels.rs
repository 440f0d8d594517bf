//! Built-in level catalog embedded into the binary.
//!
//! Layout text lives under `assets/levels/`; the `P` and `M` characters in
//! those files parse as open floor and only mark where the spawn coordinates
//! below point at, keeping the files readable next to the constants.

use anyhow::{Context, Result};
use maze_chase_core::CellCoord;
use maze_chase_world::{Level, Spawns};

/// Number of levels shipped with the game.
pub(crate) const LEVEL_COUNT: u8 = 3;

/// A named layout bundled with its spawn coordinates.
pub(crate) struct LevelSpec {
    pub(crate) name: &'static str,
    text: &'static str,
    player: (u32, u32),
    ghosts: &'static [(u32, u32)],
}

impl LevelSpec {
    /// Parses and validates the bundled layout.
    pub(crate) fn load(&self) -> Result<Level> {
        let spawns = Spawns {
            player: CellCoord::new(self.player.0, self.player.1),
            ghosts: self
                .ghosts
                .iter()
                .map(|(column, row)| CellCoord::new(*column, *row))
                .collect(),
        };
        Level::parse(self.text, spawns)
            .with_context(|| format!("failed to load level `{}`", self.name))
    }
}

/// Looks up a bundled level by its one-based number.
pub(crate) fn built_in(number: u8) -> Option<LevelSpec> {
    match number {
        1 => Some(LevelSpec {
            name: "warren",
            text: include_str!("../assets/levels/level1.txt"),
            player: (9, 5),
            ghosts: &[(9, 3), (9, 7)],
        }),
        2 => Some(LevelSpec {
            name: "lattice",
            text: include_str!("../assets/levels/level2.txt"),
            player: (12, 9),
            ghosts: &[(8, 3), (12, 3), (8, 9)],
        }),
        3 => Some(LevelSpec {
            name: "gauntlet",
            text: include_str!("../assets/levels/level3.txt"),
            player: (11, 7),
            ghosts: &[(11, 5), (10, 7), (12, 7)],
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{built_in, LEVEL_COUNT};
    use maze_chase_world::query;
    use maze_chase_world::World;

    #[test]
    fn every_bundled_level_loads() {
        for number in 1..=LEVEL_COUNT {
            let spec = built_in(number).expect("catalog covers the advertised range");
            let level = spec.load().expect("bundled layouts are valid");
            let game = World::from_level(&level);
            assert!(
                query::pellets_remaining(&game) > 0,
                "level `{}` must start with pellets to eat",
                spec.name,
            );
            assert!(
                !query::ghost_view(&game).is_empty(),
                "level `{}` must field at least one ghost",
                spec.name,
            );
        }
    }

    #[test]
    fn numbers_outside_the_catalog_are_absent() {
        assert!(built_in(0).is_none());
        assert!(built_in(LEVEL_COUNT + 1).is_none());
    }
}
