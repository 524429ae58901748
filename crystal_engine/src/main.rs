#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** Crystal **
//! Scene tooling for the Crystal adventure engine: preflight checks and path queries.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use glam::Vec2;
use log::info;

use crystal_engine::data_paths::resolve_data_dir;
use crystal_engine::{CRYSTAL_VERSION, LoadedGame, ValidationResult, load_game};

#[derive(Parser)]
#[command(author, version, about = "Scene tooling for the Crystal adventure engine.")]
struct Cli {
    /// Directory holding `world.ron` and `engine.toml` (defaults to `CRYSTAL_DATA_DIR` or auto-detection).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
    /// Verbose logging and extra diagnostics.
    #[arg(long, global = true)]
    debug: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the preflight checks over every scene.
    Check {
        /// Fail on warnings as well as errors.
        #[arg(long)]
        strict: bool,
    },
    /// Find a walking path for the player.
    Path(PathArgs),
}

#[derive(Args)]
struct PathArgs {
    /// Scene id (defaults to the start scene).
    #[arg(long)]
    scene: Option<String>,
    /// Start point as `x,y`.
    #[arg(long, value_parser = parse_point)]
    from: Vec2,
    /// Destination as `x,y`.
    #[arg(long, value_parser = parse_point)]
    to: Vec2,
}

fn parse_point(text: &str) -> Result<Vec2, String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{text}'"))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad x coordinate '{x}': {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad y coordinate '{y}': {e}"))?;
    Ok(Vec2::new(x, y))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let default_filter = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();
    info!("Crystal engine {CRYSTAL_VERSION}");

    let data_dir = resolve_data_dir(cli.data_dir.as_deref());
    let game = load_game(&data_dir, cli.debug).with_context(|| format!("while loading game from '{}'", data_dir.display()))?;

    match cli.command {
        Commands::Check { strict } => check(&game, strict),
        Commands::Path(args) => path(&game, &args),
    }
}

fn check(game: &LoadedGame, strict: bool) -> Result<()> {
    println!(
        "{} {}",
        "Preflight:".bold(),
        game.world.game.title.bright_yellow()
    );
    let result = game.preflight();
    print_report(&result);

    if !result.passed() {
        bail!("preflight failed with {} error(s)", result.errors().len());
    }
    if strict && !result.warnings().is_empty() {
        bail!("preflight produced {} warning(s) in strict mode", result.warnings().len());
    }
    println!("{}", "Preflight passed.".green().bold());
    Ok(())
}

fn print_report(result: &ValidationResult) {
    for line in result.info() {
        println!("  {}", line.bright_black());
    }
    for line in result.warnings() {
        println!("  {} {line}", "warning:".yellow().bold());
    }
    for line in result.errors() {
        println!("  {} {line}", "error:".red().bold());
    }
}

fn path(game: &LoadedGame, args: &PathArgs) -> Result<()> {
    let scene_id = args
        .scene
        .clone()
        .unwrap_or_else(|| game.world.game.start_scene.clone());
    let grid = game.player_grid(&scene_id)?;

    let Some(waypoints) = grid.find_path(args.from, args.to) else {
        bail!(
            "no path from ({}, {}) to ({}, {}) in scene '{scene_id}'",
            args.from.x,
            args.from.y,
            args.to.x,
            args.to.y
        );
    };

    println!(
        "{} {} waypoint(s) in scene '{}'",
        "Path:".bold(),
        waypoints.len(),
        scene_id.bright_blue()
    );
    for (i, p) in waypoints.iter().enumerate() {
        println!("  {i:>3}: ({:.1}, {:.1})", p.x, p.y);
    }
    Ok(())
}
