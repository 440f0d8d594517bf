use maze_chase_core::{CellCoord, Command, Direction, GhostId, RoundOutcome};
use maze_chase_system_round::{ReplayChoice, RoundController, RoundPhase};
use maze_chase_world::{self as world, Level, Spawns, World};

fn corridor_world(ghosts: Vec<CellCoord>) -> World {
    let level = Level::parse(
        "+++++\n+..M+\n+++++",
        Spawns {
            player: CellCoord::new(1, 1),
            ghosts,
        },
    )
    .expect("test layout is valid");
    World::from_level(&level)
}

#[test]
fn controller_starts_choosing_a_level() {
    let controller = RoundController::new();
    assert_eq!(controller.phase(), RoundPhase::ChoosingLevel);
}

#[test]
fn observing_is_inert_outside_a_round() {
    let mut controller = RoundController::new();
    let game = corridor_world(Vec::new());

    assert_eq!(controller.observe(&game), None);
    assert_eq!(controller.phase(), RoundPhase::ChoosingLevel);
}

#[test]
fn winning_a_round_records_the_outcome() {
    let mut controller = RoundController::new();
    let mut game = corridor_world(Vec::new());
    controller.level_loaded();
    assert_eq!(controller.phase(), RoundPhase::Playing);

    assert_eq!(controller.observe(&game), None);

    let mut events = Vec::new();
    world::apply(
        &mut game,
        Command::MovePlayer {
            direction: Direction::Right,
        },
        &mut events,
    );

    assert_eq!(controller.observe(&game), Some(RoundOutcome::Won));
    assert_eq!(controller.phase(), RoundPhase::Won);
}

#[test]
fn losing_a_round_records_the_outcome() {
    let mut controller = RoundController::new();
    let mut game = corridor_world(vec![CellCoord::new(3, 1)]);
    controller.level_loaded();

    let mut events = Vec::new();
    for _ in 0..2 {
        world::apply(
            &mut game,
            Command::StepGhost {
                ghost_id: GhostId::new(0),
                direction: Direction::Left,
            },
            &mut events,
        );
    }
    world::apply(&mut game, Command::ResolveCollisions, &mut events);

    assert_eq!(controller.observe(&game), Some(RoundOutcome::Lost));
    assert_eq!(controller.phase(), RoundPhase::Lost);
}

#[test]
fn replaying_returns_to_level_selection() {
    let mut controller = RoundController::new();
    let mut game = corridor_world(Vec::new());
    controller.level_loaded();

    let mut events = Vec::new();
    world::apply(
        &mut game,
        Command::MovePlayer {
            direction: Direction::Right,
        },
        &mut events,
    );
    let _ = controller.observe(&game);

    controller.resolve_replay(ReplayChoice::PlayAgain);
    assert_eq!(controller.phase(), RoundPhase::ChoosingLevel);

    // A fresh round starts from scratch.
    controller.level_loaded();
    assert_eq!(controller.phase(), RoundPhase::Playing);
}

#[test]
fn quitting_finishes_the_session() {
    let mut controller = RoundController::new();
    let mut game = corridor_world(Vec::new());
    controller.level_loaded();

    let mut events = Vec::new();
    world::apply(
        &mut game,
        Command::MovePlayer {
            direction: Direction::Right,
        },
        &mut events,
    );
    let _ = controller.observe(&game);

    controller.resolve_replay(ReplayChoice::Quit);
    assert_eq!(controller.phase(), RoundPhase::Finished);

    // Terminal: further replay choices change nothing.
    controller.resolve_replay(ReplayChoice::PlayAgain);
    assert_eq!(controller.phase(), RoundPhase::Finished);
}
