#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Maze Chase.
//!
//! The world owns the maze grid and every actor on it. Adapters and systems
//! mutate it exclusively through [`apply`], which executes [`Command`] values
//! deterministically and reports the resulting [`Event`] stream. Read access
//! goes through the [`query`] module.

mod level;

pub use level::{Level, LevelError, Spawns};

use maze_chase_core::{
    CellCoord, Command, Direction, Event, GhostId, Occupant, POWER_PELLET_TICKS,
};

/// Rectangular field of occupants backing the simulation.
///
/// Every in-bounds coordinate holds exactly one occupant at all times; the
/// dense representation makes the invariant structural. Vacating callers are
/// responsible for writing an [`Occupant::Empty`] behind themselves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    columns: u32,
    rows: u32,
    cells: Vec<Occupant>,
}

impl Grid {
    /// Creates a grid of the given dimensions filled with open floor.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        let capacity_u64 = u64::from(columns) * u64::from(rows);
        let capacity = usize::try_from(capacity_u64).unwrap_or(0);
        Self {
            columns,
            rows,
            cells: vec![Occupant::Empty; capacity],
        }
    }

    /// Returns the occupant at the provided cell.
    ///
    /// Out-of-range coordinates read as walls so that edge lookups behave
    /// like blocked moves instead of panicking.
    #[must_use]
    pub fn at(&self, cell: CellCoord) -> Occupant {
        self.index(cell)
            .and_then(|index| self.cells.get(index).copied())
            .unwrap_or(Occupant::Wall)
    }

    /// Unconditionally overwrites the occupant at the provided cell.
    ///
    /// Out-of-range writes are ignored.
    pub fn set(&mut self, cell: CellCoord, occupant: Occupant) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.cells.get_mut(index) {
                *slot = occupant;
            }
        }
    }

    /// Provides the dimensions of the grid as `(columns, rows)`.
    #[must_use]
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() < self.columns && cell.row() < self.rows {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.columns).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }
}

/// Computes the cell one step from `cell` in `direction`.
///
/// Returns `None` when the step would leave the `columns` by `rows` field;
/// there is no wrap-around.
#[must_use]
pub fn neighbor(
    cell: CellCoord,
    direction: Direction,
    columns: u32,
    rows: u32,
) -> Option<CellCoord> {
    match direction {
        Direction::Up => (cell.row() > 0).then(|| CellCoord::new(cell.column(), cell.row() - 1)),
        Direction::Down => {
            (cell.row() + 1 < rows).then(|| CellCoord::new(cell.column(), cell.row() + 1))
        }
        Direction::Left => {
            (cell.column() > 0).then(|| CellCoord::new(cell.column() - 1, cell.row()))
        }
        Direction::Right => {
            (cell.column() + 1 < columns).then(|| CellCoord::new(cell.column() + 1, cell.row()))
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Player {
    cell: CellCoord,
    facing: Direction,
    power_ticks: u32,
    alive: bool,
}

#[derive(Clone, Copy, Debug)]
struct Ghost {
    id: GhostId,
    cell: CellCoord,
    /// Occupant covered by this ghost, restored when it leaves or is eaten.
    /// Never another ghost.
    understudy: Occupant,
}

/// Represents the authoritative Maze Chase world state.
#[derive(Clone, Debug)]
pub struct World {
    grid: Grid,
    player: Player,
    ghosts: Vec<Ghost>,
    pellets_remaining: u32,
}

impl World {
    /// Builds a fresh world from a validated level.
    ///
    /// The player spawn cell is forced to open floor regardless of what the
    /// layout placed there, and the pellet counter is discounted by one to
    /// compensate; this mirrors the level-loading rule the layouts were
    /// authored against. Each ghost records the occupant it covers so the
    /// cell can be restored once the ghost moves on.
    #[must_use]
    pub fn from_level(level: &Level) -> Self {
        let (columns, rows) = level.dimensions();
        let mut grid = Grid::new(columns, rows);
        for row in 0..rows {
            for column in 0..columns {
                let cell = CellCoord::new(column, row);
                grid.set(cell, level.occupant(cell));
            }
        }

        let player_spawn = level.player_spawn();
        grid.set(player_spawn, Occupant::Empty);
        let pellets_remaining = level.pellets_placed().saturating_sub(1);

        let facing = Direction::Left;
        grid.set(player_spawn, Occupant::Player { facing });
        let player = Player {
            cell: player_spawn,
            facing,
            power_ticks: 0,
            alive: true,
        };

        let mut ghosts = Vec::with_capacity(level.ghost_spawns().len());
        for (index, spawn) in level.ghost_spawns().iter().enumerate() {
            let id = GhostId::new(index as u32);
            let covered = grid.at(*spawn);
            let understudy = if matches!(covered, Occupant::Ghost(_)) {
                Occupant::Empty
            } else {
                covered
            };
            grid.set(*spawn, Occupant::Ghost(id));
            ghosts.push(Ghost {
                id,
                cell: *spawn,
                understudy,
            });
        }

        Self {
            grid,
            player,
            ghosts,
            pellets_remaining,
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::MovePlayer { direction } => move_player(world, direction, out_events),
        Command::StepGhost {
            ghost_id,
            direction,
        } => step_ghost(world, ghost_id, direction, out_events),
        Command::ResolveCollisions => resolve_collisions(world, out_events),
    }
}

fn move_player(world: &mut World, direction: Direction, out_events: &mut Vec<Event>) {
    if !world.player.alive {
        return;
    }

    let from = world.player.cell;
    let facing_changed = world.player.facing != direction;
    world.player.facing = direction;

    let (columns, rows) = world.grid.dimensions();
    let destination = neighbor(from, direction, columns, rows);
    let target = destination.map(|cell| world.grid.at(cell));

    match (destination, target) {
        (Some(destination), Some(target)) if !target.is_solid() => {
            // Eat before vacating: when consumption mutates the target cell
            // it must happen before any overwrite of grid state this move
            // performs.
            if target.is_edible() {
                eat(world, destination, target, out_events);
            }
            world.grid.set(from, Occupant::Empty);
            world.grid.set(destination, Occupant::Player { facing: direction });
            world.player.cell = destination;
            out_events.push(Event::PlayerMoved {
                from,
                to: destination,
            });
            out_events.push(Event::CellChanged { cell: from });
            out_events.push(Event::CellChanged { cell: destination });
        }
        _ => {
            // Facing updates even when the step is rejected; the glyph must
            // follow it.
            world.grid.set(from, Occupant::Player { facing: direction });
            out_events.push(Event::PlayerBlocked {
                cell: from,
                direction,
            });
            if facing_changed {
                out_events.push(Event::CellChanged { cell: from });
            }
        }
    }

    // Exactly one countdown decrement per move attempt, blocked or not.
    if world.player.power_ticks > 0 {
        world.player.power_ticks -= 1;
    }
}

/// Consumes an edible occupant on the player's behalf.
fn eat(world: &mut World, cell: CellCoord, target: Occupant, out_events: &mut Vec<Event>) {
    match target {
        Occupant::Pellet => {
            world.grid.set(cell, Occupant::Empty);
            world.pellets_remaining = world.pellets_remaining.saturating_sub(1);
            out_events.push(Event::PelletEaten {
                cell,
                remaining: world.pellets_remaining,
            });
            out_events.push(Event::CellChanged { cell });
        }
        Occupant::PowerPellet => {
            world.grid.set(cell, Occupant::Empty);
            world.player.power_ticks = world.player.power_ticks.saturating_add(POWER_PELLET_TICKS);
            out_events.push(Event::PowerPelletEaten {
                cell,
                power_ticks: world.player.power_ticks,
            });
            out_events.push(Event::CellChanged { cell });
        }
        Occupant::Ghost(ghost_id) => {
            if world.player.power_ticks > 0 {
                if let Some(index) = world.ghosts.iter().position(|ghost| ghost.id == ghost_id) {
                    let ghost = world.ghosts.remove(index);
                    world.grid.set(ghost.cell, ghost.understudy);
                    out_events.push(Event::GhostEaten {
                        ghost_id,
                        cell: ghost.cell,
                    });
                    out_events.push(Event::CellChanged { cell: ghost.cell });
                    if ghost.understudy.is_edible() {
                        eat(world, ghost.cell, ghost.understudy, out_events);
                    }
                }
            } else if world.player.alive {
                // A lethal collision is reported, never resolved into a map
                // change.
                world.player.alive = false;
                out_events.push(Event::PlayerCaught { cell });
            }
        }
        Occupant::Empty | Occupant::Wall | Occupant::Player { .. } => {}
    }
}

fn step_ghost(
    world: &mut World,
    ghost_id: GhostId,
    direction: Direction,
    out_events: &mut Vec<Event>,
) {
    let (columns, rows) = world.grid.dimensions();
    let Some(index) = world.ghosts.iter().position(|ghost| ghost.id == ghost_id) else {
        return;
    };

    let from = world.ghosts[index].cell;
    let Some(destination) = neighbor(from, direction, columns, rows) else {
        return;
    };
    if world.grid.at(destination) == Occupant::Wall {
        // No fallback direction is tried; the ghost simply stays put.
        return;
    }

    let understudy = world.ghosts[index].understudy;
    if !matches!(understudy, Occupant::Ghost(_)) {
        world.grid.set(from, understudy);
        out_events.push(Event::CellChanged { cell: from });
    }

    // Adopt whatever the destination displays, unless another ghost stands
    // there already; overwriting the reference then would permanently lose
    // track of the covered occupant.
    let target = world.grid.at(destination);
    if !matches!(target, Occupant::Ghost(_)) {
        world.ghosts[index].understudy = target;
    }

    world.grid.set(destination, Occupant::Ghost(ghost_id));
    world.ghosts[index].cell = destination;
    out_events.push(Event::GhostMoved {
        ghost_id,
        from,
        to: destination,
    });
    out_events.push(Event::CellChanged { cell: destination });
}

fn resolve_collisions(world: &mut World, out_events: &mut Vec<Event>) {
    // Stable snapshot: a ghost eaten mid-sweep must not corrupt iteration.
    let snapshot: Vec<GhostId> = world.ghosts.iter().map(|ghost| ghost.id).collect();
    for ghost_id in snapshot {
        let Some(ghost) = world.ghosts.iter().find(|ghost| ghost.id == ghost_id) else {
            continue;
        };
        if ghost.cell == world.player.cell {
            eat(world, ghost.cell, Occupant::Ghost(ghost_id), out_events);
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Grid, World};
    use maze_chase_core::{CellCoord, Direction, GhostId, Occupant, RoundOutcome};

    /// Provides read-only access to the maze grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Provides the grid dimensions as `(columns, rows)`.
    #[must_use]
    pub fn dimensions(world: &World) -> (u32, u32) {
        world.grid.dimensions()
    }

    /// Returns the occupant displayed at the provided cell.
    #[must_use]
    pub fn occupant(world: &World, cell: CellCoord) -> Occupant {
        world.grid.at(cell)
    }

    /// Number of pellets still uneaten.
    #[must_use]
    pub fn pellets_remaining(world: &World) -> u32 {
        world.pellets_remaining
    }

    /// Captures a read-only snapshot of the player's state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        PlayerSnapshot {
            cell: world.player.cell,
            facing: world.player.facing,
            power_ticks: world.player.power_ticks,
            alive: world.player.alive,
        }
    }

    /// Captures a read-only view of the ghosts inhabiting the maze.
    #[must_use]
    pub fn ghost_view(world: &World) -> GhostView {
        let mut snapshots: Vec<GhostSnapshot> = world
            .ghosts
            .iter()
            .map(|ghost| GhostSnapshot {
                id: ghost.id,
                cell: ghost.cell,
                understudy: ghost.understudy,
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        GhostView { snapshots }
    }

    /// Reports the round outcome once a terminal condition holds.
    ///
    /// Winning takes precedence: the pellet counter reaches zero during the
    /// player's half of the tick, before any collision can resolve.
    #[must_use]
    pub fn outcome(world: &World) -> Option<RoundOutcome> {
        if world.pellets_remaining == 0 {
            Some(RoundOutcome::Won)
        } else if !world.player.alive {
            Some(RoundOutcome::Lost)
        } else {
            None
        }
    }

    /// Immutable representation of the player's state used for queries.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct PlayerSnapshot {
        /// Cell the player currently occupies.
        pub cell: CellCoord,
        /// Direction the player last attempted to move in.
        pub facing: Direction,
        /// Empowered ticks remaining.
        pub power_ticks: u32,
        /// Whether the player is still alive.
        pub alive: bool,
    }

    /// Read-only snapshot describing all ghosts within the maze.
    #[derive(Clone, Debug, Default)]
    pub struct GhostView {
        snapshots: Vec<GhostSnapshot>,
    }

    impl GhostView {
        /// Iterator over the captured ghost snapshots in deterministic order.
        pub fn iter(&self) -> impl Iterator<Item = &GhostSnapshot> {
            self.snapshots.iter()
        }

        /// Number of ghosts captured by the view.
        #[must_use]
        pub fn len(&self) -> usize {
            self.snapshots.len()
        }

        /// Reports whether the view holds no ghosts.
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.snapshots.is_empty()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<GhostSnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single ghost's state used for queries.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct GhostSnapshot {
        /// Unique identifier assigned to the ghost.
        pub id: GhostId,
        /// Cell the ghost currently occupies.
        pub cell: CellCoord,
        /// Occupant the ghost is covering.
        pub understudy: Occupant,
    }
}
