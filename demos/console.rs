use astar_grid::grid::parse_coordinate;
use astar_grid::{
    CellState, SearchConfig, SearchGrid, SearchResult, Session, SetupError, StepEvent, GRID_SIZE,
};
use clap::Parser;
use grid_util::point::Point;
use rand::prelude::*;
use std::time::Duration;

// Searches for paths on a 20x20 grid with randomly scattered obstacles, redrawing the grid after
// every step. The start walks to each target in turn.
//
//   cargo run --example console -- --start 00 JJ 0J
//   cargo run --example console -- -r --seed 3 --density 0.3 55 F2
//
// Legend: @ start, $ target, # obstacle, + open, - closed, * path.

#[derive(Parser, Debug)]
#[command(about = "Watch A* find its way across a grid")]
struct Args {
    /// Show only the final result of each search
    #[arg(short, long)]
    realtime: bool,
    /// Pause between steps in milliseconds
    #[arg(long, default_value_t = 750)]
    delay: u64,
    /// Seed for the obstacle layout
    #[arg(long)]
    seed: Option<u64>,
    /// Chance of a cell being an obstacle
    #[arg(long, default_value_t = 0.1)]
    density: f64,
    /// Start position as column and row digits
    #[arg(long, default_value = "00", value_parser = parse_point)]
    start: Point,
    /// Targets to visit in order
    #[arg(value_parser = parse_point, required = true)]
    targets: Vec<Point>,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(x), Some(y), None) => match (parse_coordinate(x), parse_coordinate(y)) {
            (Some(x), Some(y)) if (x as usize) < GRID_SIZE && (y as usize) < GRID_SIZE => {
                Ok(Point::new(x, y))
            }
            _ => Err(format!("{s} is not on the grid")),
        },
        _ => Err(format!("expected two digits, got {s}")),
    }
}

fn draw(grid: &SearchGrid) {
    print!("\x1B[2J\x1B[1;1H");
    println!("\n{grid}");
}

fn main() -> Result<(), SetupError> {
    let args = Args::parse();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut grid = SearchGrid::new(GRID_SIZE, GRID_SIZE);
    for p in grid.positions().collect::<Vec<_>>() {
        grid.set_blocked(p, rng.gen_bool(args.density));
    }
    let mut session = Session::new(grid, args.start)?;
    let config = SearchConfig {
        step_delay: (!args.realtime).then(|| Duration::from_millis(args.delay)),
        ..SearchConfig::default()
    };
    let realtime = args.realtime;
    let mut observer = |grid: &SearchGrid, _: StepEvent| {
        if !realtime {
            draw(grid);
        }
    };

    for target in args.targets {
        session.clear();
        if let Err(err) = session.place_target(target) {
            println!("Cannot place target: {err}");
            continue;
        }
        draw(session.grid());
        let report = session.run(&config, &mut observer)?;
        draw(session.grid());
        match report.result {
            SearchResult::PathFound(path) => {
                println!(
                    "Reached {} in {} steps, {} nodes expanded",
                    target,
                    path.len() - 1,
                    report.expanded
                );
                session.walk_to_target();
            }
            SearchResult::NoPathFound => {
                let explored = session.grid().count(CellState::Closed);
                println!("No path to target was found ({explored} cells explored)");
            }
        }
    }
    Ok(())
}
