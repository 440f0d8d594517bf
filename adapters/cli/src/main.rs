#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Maze Chase experience.
//!
//! Owns the outer prompt loop (level selection, play again) and wires the
//! authoritative world, the ghost planner, and the round controller to the
//! terminal rendering, input and audio collaborators. One tick is one
//! blocking direction read, one player move, one ghost sweep, and one
//! collision resolution; the world is never touched from anywhere else.

mod levels;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use maze_chase_core::{CellCoord, Command, RoundOutcome, WELCOME_BANNER};
use maze_chase_rendering::{
    cues_from_events, patches_from_events, AudioBackend, AudioCue, InputSource, NullAudio,
    PlayerInput, RenderingBackend, Scene, StatusLine,
};
use maze_chase_rendering_terminal::{TerminalBackend, TerminalBell, TerminalInput, Theme};
use maze_chase_system_ghost_ai::GhostPlanner;
use maze_chase_system_round::{ReplayChoice, RoundController, RoundPhase};
use maze_chase_world::{self as world, query, Level, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Parser)]
#[command(name = "maze-chase", about = "Turn-based terminal maze chase")]
struct Args {
    /// Level number to play; prompted for interactively when omitted.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3))]
    level: Option<u8>,

    /// Seed for the ghost direction generator; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Path to a TOML theme manifest overriding glyphs and colors.
    #[arg(long)]
    theme: Option<PathBuf>,

    /// Silence the terminal bell.
    #[arg(long)]
    quiet_audio: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let theme = match &args.theme {
        Some(path) => Theme::from_manifest_path(path)?,
        None => Theme::default(),
    };
    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    println!("{WELCOME_BANNER}");

    let mut controller = RoundController::new();
    let mut preselected = args.level;
    while controller.phase() != RoundPhase::Finished {
        let number = match preselected.take() {
            Some(number) => number,
            None => prompt_level()?,
        };
        let spec = levels::built_in(number).context("level number outside the catalog")?;
        let level = spec.load()?;
        tracing::info!(level = number, name = spec.name, "starting round");
        controller.level_loaded();

        let outcome = play_round(&level, &theme, &mut rng, args.quiet_audio, &mut controller)?;

        match outcome {
            None => break,
            Some(RoundOutcome::Won) => println!("You cleared the maze!"),
            Some(RoundOutcome::Lost) => println!("The ghosts got you."),
        }
        controller.resolve_replay(prompt_replay()?);
    }

    println!("Thanks for playing.");
    Ok(())
}

/// Runs one round to completion.
///
/// Returns `None` when the player abandoned the round instead of finishing
/// it. The terminal backend lives exactly as long as this call, so the
/// caller's shell is restored before any prompt is printed.
fn play_round(
    level: &Level,
    theme: &Theme,
    rng: &mut ChaCha8Rng,
    quiet_audio: bool,
    controller: &mut RoundController,
) -> Result<Option<RoundOutcome>> {
    let mut game = World::from_level(level);
    let planner = GhostPlanner::default();

    let mut backend = TerminalBackend::new()?;
    let mut input = TerminalInput;
    let mut audio: Box<dyn AudioBackend> = if quiet_audio {
        Box::new(NullAudio)
    } else {
        Box::new(TerminalBell::new())
    };

    audio.play(AudioCue::Intro);
    backend.begin_round(&scene_of(&game, theme)?)?;

    loop {
        let direction = match input.next_input()? {
            PlayerInput::Quit => {
                tracing::info!("round abandoned");
                return Ok(None);
            }
            PlayerInput::Move(direction) => direction,
        };

        let mut events = Vec::new();
        world::apply(&mut game, Command::MovePlayer { direction }, &mut events);

        let mut commands = Vec::new();
        planner.plan(rng, &query::ghost_view(&game), &mut commands);
        for command in commands {
            world::apply(&mut game, command, &mut events);
        }

        for cue in cues_from_events(&events) {
            audio.play(cue);
        }
        let patches = patches_from_events(&events, |cell| {
            theme.presentation(query::occupant(&game, cell))
        });
        backend.apply_patches(&patches, &status_of(&game))?;

        if let Some(outcome) = controller.observe(&game) {
            tracing::info!(?outcome, "round ended");
            return Ok(Some(outcome));
        }
    }
}

fn scene_of(game: &World, theme: &Theme) -> Result<Scene> {
    let grid = query::grid(game);
    let (columns, rows) = grid.dimensions();
    let mut cells = Vec::with_capacity(columns as usize * rows as usize);
    for row in 0..rows {
        for column in 0..columns {
            cells.push(theme.presentation(grid.at(CellCoord::new(column, row))));
        }
    }
    Ok(Scene::new(columns, rows, cells, status_of(game))?)
}

fn status_of(game: &World) -> StatusLine {
    let player = query::player(game);
    StatusLine {
        pellets_remaining: query::pellets_remaining(game),
        power_ticks: player.power_ticks,
        alive: player.alive,
    }
}

fn prompt_level() -> Result<u8> {
    loop {
        print!("Choose a level (1-{}): ", levels::LEVEL_COUNT);
        io::stdout().flush().context("failed to flush the prompt")?;
        let line = read_prompt_line()?;
        match line.trim().parse::<u8>() {
            Ok(number) if (1..=levels::LEVEL_COUNT).contains(&number) => return Ok(number),
            _ => println!("Pick a number between 1 and {}.", levels::LEVEL_COUNT),
        }
    }
}

fn prompt_replay() -> Result<ReplayChoice> {
    loop {
        print!("Play again? (y/n): ");
        io::stdout().flush().context("failed to flush the prompt")?;
        let line = read_prompt_line()?;
        match line.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(ReplayChoice::PlayAgain),
            "n" | "no" => return Ok(ReplayChoice::Quit),
            _ => println!("Answer y or n."),
        }
    }
}

fn read_prompt_line() -> Result<String> {
    let mut line = String::new();
    let bytes = io::stdin()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    if bytes == 0 {
        bail!("input stream closed");
    }
    Ok(line)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}
