//! `stepstar`: watch A* search a grid one expansion at a time.
//!
//! Logs go to stderr (`RUST_LOG=debug stepstar 2>log.txt`), so redirect
//! them when they are enabled.

mod app;
mod input;
mod term;
mod view;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use rand::{SeedableRng, rngs::StdRng};
use stepstar_core::{Grid, GridConfig, config::DEFAULT_SIZE};
use stepstar_search::HeuristicKind;

use crate::app::Shell;
use crate::term::Terminal;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Grid width in cells
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    width: i32,

    /// Grid height in cells
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    height: i32,

    /// Load the grid from an ASCII layout ('#' wall, '.' floor, 'S', 'E')
    #[arg(long, conflicts_with_all = ["width", "height"])]
    map: Option<PathBuf>,

    /// Fraction of cells to turn into walls at random (not with --map)
    #[arg(long, default_value_t = 0.0, conflicts_with = "map")]
    walls: f64,

    /// Seed for the random walls
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = HeuristicArg::Euclidean)]
    heuristic: HeuristicArg,

    /// Leave mouse events to the terminal
    #[arg(long)]
    no_mouse: bool,

    /// Milliseconds between steps while playing
    #[arg(long, default_value_t = 80)]
    tick_ms: u64,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum HeuristicArg {
    Euclidean,
    Manhattan,
}

impl From<HeuristicArg> for HeuristicKind {
    fn from(h: HeuristicArg) -> Self {
        match h {
            HeuristicArg::Euclidean => HeuristicKind::Euclidean,
            HeuristicArg::Manhattan => HeuristicKind::Manhattan,
        }
    }
}

fn build_grid(args: &Args) -> Result<Grid, Box<dyn std::error::Error>> {
    let mut grid = match &args.map {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Grid::parse(&text)?
        }
        None => Grid::from_config(&GridConfig::sized(args.width, args.height))?,
    };
    if args.walls > 0.0 {
        let seed = args.seed.unwrap_or_else(rand::random);
        log::info!("scattering walls at density {} with seed {seed}", args.walls);
        let mut rng = StdRng::seed_from_u64(seed);
        grid.scatter_walls(&mut rng, args.walls);
    }
    Ok(grid)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let grid = build_grid(&args)?;
    log::info!("grid {}x{}", grid.width(), grid.height());

    let mut shell = Shell::new(grid, args.heuristic.into());
    let tick = Duration::from_millis(args.tick_ms);
    let mut term = Terminal::init(!args.no_mouse)?;

    while !shell.quit() {
        let snap = shell.engine().snapshot();
        view::draw(
            term.out(),
            &snap,
            shell.cursor(),
            shell.message(),
            shell.playing(),
        )?;

        let timeout = shell.playing().then_some(tick);
        match term.next_event(timeout)? {
            Some(ev) => {
                if let Some(action) = input::to_action(&ev, shell.size()) {
                    shell.update(action);
                }
            }
            None => shell.tick(),
        }
    }
    Ok(())
}
