//! Plain-text maze layouts parsed into validated level definitions.
//!
//! One line per row, one character per column: `+` is a wall, `.` a pellet,
//! `o` a power pellet, and any other character (including space) open floor.
//! Layouts must be rectangular; levels are expected to be enclosed by walls
//! on every edge, though the world treats out-of-range lookups as solid
//! regardless.

use maze_chase_core::{CellCoord, Occupant};
use thiserror::Error;

/// Spawn coordinates that accompany a maze layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Spawns {
    /// Cell the player starts on. Forced to open floor during world
    /// construction regardless of the layout's content there.
    pub player: CellCoord,
    /// Cells the ghosts start on, one ghost per entry.
    pub ghosts: Vec<CellCoord>,
}

/// Reasons a maze layout may be rejected at load time.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    /// The layout text contained no rows.
    #[error("level text contains no rows")]
    EmptyLevel,
    /// A row's width differed from the first row's width.
    #[error("row {row} holds {found} cells but the level is {expected} cells wide")]
    RaggedRows {
        /// Zero-based index of the offending row.
        row: usize,
        /// Width established by the first row.
        expected: usize,
        /// Width actually found.
        found: usize,
    },
    /// The layout exceeds the supported grid coordinate range.
    #[error("level dimensions {columns}x{rows} exceed the supported grid size")]
    DimensionsTooLarge {
        /// Number of columns found in the layout.
        columns: usize,
        /// Number of rows found in the layout.
        rows: usize,
    },
    /// A spawn coordinate lies outside the layout.
    #[error("spawn cell ({column}, {row}) lies outside the level bounds")]
    SpawnOutOfBounds {
        /// Column of the offending spawn cell.
        column: u32,
        /// Row of the offending spawn cell.
        row: u32,
    },
    /// A spawn coordinate is covered by a wall.
    #[error("spawn cell ({column}, {row}) is covered by a wall")]
    SpawnBlocked {
        /// Column of the offending spawn cell.
        column: u32,
        /// Row of the offending spawn cell.
        row: u32,
    },
}

/// A parsed, validated maze layout ready for world construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    columns: u32,
    rows: u32,
    cells: Vec<Occupant>,
    pellets_placed: u32,
    spawns: Spawns,
}

impl Level {
    /// Parses a layout from text and validates it together with the provided
    /// spawn coordinates.
    pub fn parse(text: &str, spawns: Spawns) -> Result<Self, LevelError> {
        let mut cells: Vec<Occupant> = Vec::new();
        let mut pellets_placed: u32 = 0;
        let mut width: usize = 0;
        let mut row_count: usize = 0;

        for (row, line) in text.lines().enumerate() {
            let found = line.chars().count();
            if row == 0 {
                width = found;
            } else if found != width {
                return Err(LevelError::RaggedRows {
                    row,
                    expected: width,
                    found,
                });
            }
            row_count += 1;
            cells.reserve(found);
            for ch in line.chars() {
                cells.push(match ch {
                    '+' => Occupant::Wall,
                    '.' => {
                        pellets_placed = pellets_placed.saturating_add(1);
                        Occupant::Pellet
                    }
                    'o' => Occupant::PowerPellet,
                    _ => Occupant::Empty,
                });
            }
        }

        if width == 0 || row_count == 0 {
            return Err(LevelError::EmptyLevel);
        }

        let (Ok(columns), Ok(rows)) = (u32::try_from(width), u32::try_from(row_count)) else {
            return Err(LevelError::DimensionsTooLarge {
                columns: width,
                rows: row_count,
            });
        };

        let level = Self {
            columns,
            rows,
            cells,
            pellets_placed,
            spawns,
        };
        level.validate_spawn(level.spawns.player)?;
        for ghost in &level.spawns.ghosts {
            level.validate_spawn(*ghost)?;
        }
        Ok(level)
    }

    fn validate_spawn(&self, cell: CellCoord) -> Result<(), LevelError> {
        if cell.column() >= self.columns || cell.row() >= self.rows {
            return Err(LevelError::SpawnOutOfBounds {
                column: cell.column(),
                row: cell.row(),
            });
        }
        if self.occupant(cell) == Occupant::Wall {
            return Err(LevelError::SpawnBlocked {
                column: cell.column(),
                row: cell.row(),
            });
        }
        Ok(())
    }

    /// Occupant loaded at the provided cell.
    #[must_use]
    pub fn occupant(&self, cell: CellCoord) -> Occupant {
        let index = cell.row() as usize * self.columns as usize + cell.column() as usize;
        self.cells.get(index).copied().unwrap_or(Occupant::Wall)
    }

    /// Grid dimensions as `(columns, rows)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    /// Number of pellets placed by the layout before spawn adjustments.
    #[must_use]
    pub const fn pellets_placed(&self) -> u32 {
        self.pellets_placed
    }

    /// Cell the player starts on.
    #[must_use]
    pub const fn player_spawn(&self) -> CellCoord {
        self.spawns.player
    }

    /// Cells the ghosts start on.
    #[must_use]
    pub fn ghost_spawns(&self) -> &[CellCoord] {
        &self.spawns.ghosts
    }
}

#[cfg(test)]
mod tests {
    use super::{Level, LevelError, Spawns};
    use maze_chase_core::{CellCoord, Occupant};

    fn no_ghosts(player: CellCoord) -> Spawns {
        Spawns {
            player,
            ghosts: Vec::new(),
        }
    }

    #[test]
    fn parse_maps_characters_to_occupants() {
        let level = Level::parse("+++++\n+.o +\n+++++", no_ghosts(CellCoord::new(3, 1)))
            .expect("valid layout");

        assert_eq!(level.dimensions(), (5, 3));
        assert_eq!(level.occupant(CellCoord::new(0, 0)), Occupant::Wall);
        assert_eq!(level.occupant(CellCoord::new(1, 1)), Occupant::Pellet);
        assert_eq!(level.occupant(CellCoord::new(2, 1)), Occupant::PowerPellet);
        assert_eq!(level.occupant(CellCoord::new(3, 1)), Occupant::Empty);
        assert_eq!(level.pellets_placed(), 1);
    }

    #[test]
    fn parse_treats_unrecognized_characters_as_empty() {
        let level = Level::parse("+++\n+x+\n+++", no_ghosts(CellCoord::new(1, 1)))
            .expect("valid layout");

        assert_eq!(level.occupant(CellCoord::new(1, 1)), Occupant::Empty);
    }

    #[test]
    fn parse_rejects_empty_text() {
        assert_eq!(
            Level::parse("", no_ghosts(CellCoord::new(0, 0))),
            Err(LevelError::EmptyLevel)
        );
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        assert_eq!(
            Level::parse("++++\n+.+\n++++", no_ghosts(CellCoord::new(1, 1))),
            Err(LevelError::RaggedRows {
                row: 1,
                expected: 4,
                found: 3,
            })
        );
    }

    #[test]
    fn parse_rejects_out_of_bounds_spawn() {
        assert_eq!(
            Level::parse("+++\n+.+\n+++", no_ghosts(CellCoord::new(7, 1))),
            Err(LevelError::SpawnOutOfBounds { column: 7, row: 1 })
        );
    }

    #[test]
    fn parse_rejects_spawn_on_wall() {
        let spawns = Spawns {
            player: CellCoord::new(1, 1),
            ghosts: vec![CellCoord::new(0, 0)],
        };
        assert_eq!(
            Level::parse("+++\n+.+\n+++", spawns),
            Err(LevelError::SpawnBlocked { column: 0, row: 0 })
        );
    }

    #[test]
    fn parse_strips_carriage_returns() {
        let level = Level::parse("+++\r\n+.+\r\n+++", no_ghosts(CellCoord::new(1, 1)))
            .expect("windows line endings are accepted");

        assert_eq!(level.dimensions(), (3, 3));
    }
}
