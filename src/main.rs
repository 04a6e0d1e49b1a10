//! NPC Arena - Entry Point
//!
//! Loads the configuration, installs logging, and runs the interactive
//! menu on top of an [`Arena`].

use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use clap::Parser;
use npc_arena::core::config::SimulationConfig;
use npc_arena::core::error::Result;
use npc_arena::entity::Species;
use npc_arena::observer::Console;
use npc_arena::simulation::Arena;

/// Interactive arena of dragons, bulls and frogs
#[derive(Parser, Debug)]
#[command(name = "npc-arena")]
#[command(about = "Place creatures on a grid and watch them fight")]
struct Args {
    /// TOML configuration file
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Master seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Roster file used by save and load
    #[arg(long)]
    roster: Option<PathBuf>,

    /// Number of NPCs spawned by "initialize game"
    #[arg(long)]
    npcs: Option<usize>,
}

const MENU: &str = "\
=== NPC ARENA ===
  1 - Add NPC
  2 - List NPCs
  3 - Save roster
  4 - Load roster
  5 - Fight (synchronous, by range)
  6 - Initialize game with random NPCs
  7 - Start timed battle
  8 - Show map
  9 - Show survivors
  h - Help
  0 - Exit";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("npc_arena=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    tracing::info!(?config, "NPC Arena starting");

    let arena = Arena::new(config);
    let console = arena.console().clone();
    console.block(MENU);

    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        let Some(choice) = prompt(&console, &mut input, "> ")? else {
            break;
        };
        match choice.as_str() {
            "" => continue,
            "1" => add_npc(&arena, &console, &mut input)?,
            "2" => console.block(&arena.npc_listing()),
            "3" => save_roster(&arena, &console),
            "4" => {
                let loaded = arena.load_from_file(&arena.config().roster_path);
                console.line(&format!("Loaded {loaded} NPCs"));
            }
            "5" => run_fight(&arena, &console, &mut input)?,
            "6" => {
                let spawned = arena.initialize(arena.config().initial_npc_count);
                console.line(&format!("Game initialized with {spawned} NPCs"));
            }
            "7" => timed_battle(&arena, &console)?,
            "8" => console.block(&arena.render_map()),
            "9" => console.block(&arena.survivors_report()),
            "h" | "help" => console.block(MENU),
            "0" | "q" | "quit" => break,
            other => console.line(&format!("Unknown option '{other}'. Type h for help.")),
        }
    }

    arena.stop();
    console.line("Goodbye!");
    Ok(())
}

fn load_config(args: &Args) -> Result<SimulationConfig> {
    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_file(path)?,
        None => SimulationConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(roster) = &args.roster {
        config.roster_path = roster.clone();
    }
    if let Some(npcs) = args.npcs {
        config.initial_npc_count = npcs;
    }
    config.validate()?;
    Ok(config)
}

/// Print `label` and read one trimmed line; `None` at end of input
fn prompt(console: &Console, input: &mut impl BufRead, label: &str) -> Result<Option<String>> {
    console.partial(label);
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn add_npc(arena: &Arena, console: &Console, input: &mut impl BufRead) -> Result<()> {
    let Some(species) = prompt(console, input, "Species (dragon/frog/bull): ")? else {
        return Ok(());
    };
    let species: Species = match species.to_lowercase().parse() {
        Ok(species) => species,
        Err(e) => {
            console.line(&format!("Error: {e}"));
            return Ok(());
        }
    };
    let Some(name) = prompt(console, input, "Name: ")? else {
        return Ok(());
    };
    let name = if name.is_empty() {
        species.display_name().to_string()
    } else {
        name
    };

    let bounds = arena.bounds();
    let Some(x) = prompt(console, input, &format!("X (0-{}): ", bounds.width - 1))? else {
        return Ok(());
    };
    let Some(y) = prompt(console, input, &format!("Y (0-{}): ", bounds.height - 1))? else {
        return Ok(());
    };
    let (Ok(x), Ok(y)) = (x.parse::<i32>(), y.parse::<i32>()) else {
        console.line("Error: coordinates must be integers");
        return Ok(());
    };

    match arena.add_npc(species, &name, x, y) {
        Ok(npc) => console.line(&format!("Added {}", npc.info())),
        Err(e) => console.line(&format!("Error: {e}")),
    }
    Ok(())
}

fn save_roster(arena: &Arena, console: &Console) {
    let path: &Path = &arena.config().roster_path;
    match arena.save_to_file(path) {
        Ok(saved) => console.line(&format!("Saved {saved} NPCs to {}", path.display())),
        Err(e) => console.line(&format!("Error: {e}")),
    }
}

fn run_fight(arena: &Arena, console: &Console, input: &mut impl BufRead) -> Result<()> {
    let Some(range) = prompt(console, input, "Battle range: ")? else {
        return Ok(());
    };
    let range = match range.parse::<f64>() {
        Ok(range) if range >= 0.0 => range,
        _ => {
            console.line("Error: range must be a non-negative number");
            return Ok(());
        }
    };
    let report = arena.fight(range);
    console.line(&format!(
        "Battle finished. {} kills, {} NPCs remain.",
        report.kills.len(),
        arena.npc_count()
    ));
    Ok(())
}

/// Start, print a dot per second for the configured duration, stop, report.
fn timed_battle(arena: &Arena, console: &Console) -> Result<()> {
    let duration = arena.config().game_duration_secs;
    if !arena.start()? {
        console.line("Simulation already running");
        return Ok(());
    }
    console.line(&format!("Battle running for {duration} seconds..."));
    for _ in 0..duration {
        thread::sleep(Duration::from_secs(1));
        console.partial(".");
    }
    console.line("");
    arena.stop();
    console.line("=== GAME OVER ===");
    console.block(&arena.survivors_report());
    Ok(())
}
