use maze_chase_core::{CellCoord, Command, Direction};
use maze_chase_system_ghost_ai::GhostPlanner;
use maze_chase_world::{query, Level, Spawns, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn world_with_ghosts(ghosts: Vec<CellCoord>) -> World {
    let level = Level::parse(
        "+++++++\n+.....+\n+.....+\n+++++++",
        Spawns {
            player: CellCoord::new(1, 1),
            ghosts,
        },
    )
    .expect("test layout is valid");
    World::from_level(&level)
}

#[test]
fn plan_emits_one_step_per_ghost_and_resolves_last() {
    let world = world_with_ghosts(vec![CellCoord::new(4, 1), CellCoord::new(2, 2)]);
    let planner = GhostPlanner::default();
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
    let mut commands = Vec::new();

    planner.plan(&mut rng, &query::ghost_view(&world), &mut commands);

    assert_eq!(commands.len(), 3);
    assert_eq!(commands.last(), Some(&Command::ResolveCollisions));

    let stepped: Vec<u32> = commands
        .iter()
        .filter_map(|command| match command {
            Command::StepGhost { ghost_id, .. } => Some(ghost_id.get()),
            _ => None,
        })
        .collect();
    assert_eq!(stepped, vec![0, 1], "ghosts are planned in identifier order");

    for command in &commands {
        if let Command::StepGhost { direction, .. } = command {
            assert!(Direction::ALL.contains(direction));
        }
    }
}

#[test]
fn plan_is_deterministic_for_equal_seeds() {
    let world = world_with_ghosts(vec![
        CellCoord::new(4, 1),
        CellCoord::new(2, 2),
        CellCoord::new(5, 2),
    ]);
    let planner = GhostPlanner::default();

    let mut first = Vec::new();
    let mut second = Vec::new();
    planner.plan(
        &mut ChaCha8Rng::seed_from_u64(42),
        &query::ghost_view(&world),
        &mut first,
    );
    planner.plan(
        &mut ChaCha8Rng::seed_from_u64(42),
        &query::ghost_view(&world),
        &mut second,
    );

    assert_eq!(first, second);
}

#[test]
fn plan_without_ghosts_still_requests_collision_resolution() {
    let world = world_with_ghosts(Vec::new());
    let planner = GhostPlanner::default();
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut commands = Vec::new();

    planner.plan(&mut rng, &query::ghost_view(&world), &mut commands);

    assert_eq!(commands, vec![Command::ResolveCollisions]);
}
