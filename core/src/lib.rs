#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Chase engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems and
//! adapters to react to deterministically. Systems consume event streams,
//! query immutable snapshots, and respond exclusively with new command
//! batches.

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Maze Chase.";

/// Number of empowered ticks granted by a single power pellet.
pub const POWER_PELLET_TICKS: u32 = 14;

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Requests that the player attempt a single step in the given direction.
    MovePlayer {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests that a ghost advance a single step in the given direction.
    StepGhost {
        /// Identifier of the ghost attempting to move.
        ghost_id: GhostId,
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests that ghost/player coordinate collisions be resolved after a
    /// full movement sweep.
    ResolveCollisions,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the player moved between two cells.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player occupies after completing the move.
        to: CellCoord,
    },
    /// Reports that the player's step was rejected by a solid occupant.
    PlayerBlocked {
        /// Cell the player remained on.
        cell: CellCoord,
        /// Direction of the rejected step.
        direction: Direction,
    },
    /// Confirms that a pellet was consumed.
    PelletEaten {
        /// Cell that held the pellet.
        cell: CellCoord,
        /// Pellets still uneaten after this consumption.
        remaining: u32,
    },
    /// Confirms that a power pellet was consumed.
    PowerPelletEaten {
        /// Cell that held the power pellet.
        cell: CellCoord,
        /// Empowered ticks available after the bonus was applied.
        power_ticks: u32,
    },
    /// Confirms that a ghost moved between two cells.
    GhostMoved {
        /// Identifier of the ghost that advanced.
        ghost_id: GhostId,
        /// Cell the ghost occupied before moving.
        from: CellCoord,
        /// Cell the ghost occupies after completing the move.
        to: CellCoord,
    },
    /// Confirms that an empowered player consumed a ghost.
    GhostEaten {
        /// Identifier of the ghost that was removed.
        ghost_id: GhostId,
        /// Cell the ghost occupied when it was consumed.
        cell: CellCoord,
    },
    /// Reports that a ghost caught the player while unempowered.
    PlayerCaught {
        /// Cell where the collision occurred.
        cell: CellCoord,
    },
    /// Announces that the occupant displayed at a cell changed and the cell
    /// should be repainted.
    CellChanged {
        /// Coordinate of the affected cell.
        cell: CellCoord,
    },
}

/// Abstract movement directions supplied by the input collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up,
    /// Movement toward increasing row indices.
    Down,
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Direction {
    /// All four cardinal directions in a stable order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// Unique identifier assigned to a ghost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GhostId(u32);

impl GhostId {
    /// Creates a new ghost identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// The thing currently present at a grid cell.
///
/// The variant set is closed: every cell always holds exactly one occupant,
/// and capability checks (`is_solid`, `is_edible`) are exhaustive matches so
/// adding a variant forces every rule to be revisited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Occupant {
    /// Open floor holding nothing.
    Empty,
    /// Impassable maze wall.
    Wall,
    /// A small pellet the player consumes to win.
    Pellet,
    /// A power pellet that temporarily flips predation.
    PowerPellet,
    /// A ghost pursuing the player.
    Ghost(GhostId),
    /// The player agent.
    Player {
        /// Direction the player last attempted to move in; affects the glyph
        /// only, never movement legality.
        facing: Direction,
    },
}

impl Occupant {
    /// Reports whether the occupant blocks entry via normal player movement.
    ///
    /// Ghosts are solid so the player never walks into an occupied cell;
    /// ghost/player collisions are detected by coordinate equality after
    /// independent moves instead.
    #[must_use]
    pub const fn is_solid(&self) -> bool {
        matches!(self, Self::Wall | Self::Ghost(_))
    }

    /// Reports whether the occupant may be consumed by the eat protocol.
    #[must_use]
    pub const fn is_edible(&self) -> bool {
        matches!(self, Self::Pellet | Self::PowerPellet | Self::Ghost(_))
    }

    /// Character used when presenting the occupant.
    ///
    /// The player's glyph tracks the facing direction; everything else is
    /// fixed per kind.
    #[must_use]
    pub const fn glyph(&self) -> char {
        match self {
            Self::Empty => ' ',
            Self::Wall => '+',
            Self::Pellet => '.',
            Self::PowerPellet => 'o',
            Self::Ghost(_) => 'M',
            Self::Player { facing } => match facing {
                Direction::Up => '^',
                Direction::Down => 'v',
                Direction::Left => '<',
                Direction::Right => '>',
            },
        }
    }

    /// Color used when presenting the occupant.
    #[must_use]
    pub const fn color(&self) -> GlyphColor {
        match self {
            Self::Empty => GlyphColor::from_rgb(0x00, 0x00, 0x00),
            Self::Wall => GlyphColor::from_rgb(0x58, 0x47, 0xff),
            Self::Pellet => GlyphColor::from_rgb(0xd9, 0xd9, 0xd9),
            Self::PowerPellet => GlyphColor::from_rgb(0xff, 0xc1, 0x07),
            Self::Ghost(_) => GlyphColor::from_rgb(0xc8, 0x2a, 0x36),
            Self::Player { .. } => GlyphColor::from_rgb(0xff, 0xd7, 0x00),
        }
    }
}

/// Visual color applied to an occupant's glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GlyphColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl GlyphColor {
    /// Creates a new glyph color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Terminal result of a single round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Every pellet was consumed.
    Won,
    /// The player was caught while unempowered.
    Lost,
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, Direction, GhostId, GlyphColor, Occupant, RoundOutcome};
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn ghost_id_round_trips_through_bincode() {
        assert_round_trip(&GhostId::new(42));
    }

    #[test]
    fn cell_coord_round_trips_through_bincode() {
        assert_round_trip(&CellCoord::new(5, 7));
    }

    #[test]
    fn occupant_round_trips_through_bincode() {
        assert_round_trip(&Occupant::Ghost(GhostId::new(3)));
        assert_round_trip(&Occupant::Player {
            facing: Direction::Left,
        });
    }

    #[test]
    fn round_outcome_round_trips_through_bincode() {
        assert_round_trip(&RoundOutcome::Won);
        assert_round_trip(&RoundOutcome::Lost);
    }

    #[test]
    fn walls_and_ghosts_are_solid() {
        assert!(Occupant::Wall.is_solid());
        assert!(Occupant::Ghost(GhostId::new(0)).is_solid());
        assert!(!Occupant::Empty.is_solid());
        assert!(!Occupant::Pellet.is_solid());
        assert!(!Occupant::PowerPellet.is_solid());
        assert!(!Occupant::Player {
            facing: Direction::Up
        }
        .is_solid());
    }

    #[test]
    fn pellets_and_ghosts_are_edible() {
        assert!(Occupant::Pellet.is_edible());
        assert!(Occupant::PowerPellet.is_edible());
        assert!(Occupant::Ghost(GhostId::new(1)).is_edible());
        assert!(!Occupant::Empty.is_edible());
        assert!(!Occupant::Wall.is_edible());
        assert!(!Occupant::Player {
            facing: Direction::Down
        }
        .is_edible());
    }

    #[test]
    fn player_glyph_tracks_facing() {
        let glyphs: Vec<char> = Direction::ALL
            .iter()
            .map(|facing| Occupant::Player { facing: *facing }.glyph())
            .collect();
        assert_eq!(glyphs, vec!['^', 'v', '<', '>']);
    }

    #[test]
    fn occupant_colors_are_distinct_per_kind() {
        let colors = [
            Occupant::Wall.color(),
            Occupant::Pellet.color(),
            Occupant::PowerPellet.color(),
            Occupant::Ghost(GhostId::new(0)).color(),
            Occupant::Player {
                facing: Direction::Up,
            }
            .color(),
        ];
        for (index, color) in colors.iter().enumerate() {
            for other in colors.iter().skip(index + 1) {
                assert_ne!(color, other);
            }
        }
    }

    #[test]
    fn glyph_color_exposes_components() {
        let color = GlyphColor::from_rgb(1, 2, 3);
        assert_eq!(color.red(), 1);
        assert_eq!(color.green(), 2);
        assert_eq!(color.blue(), 3);
    }
}
