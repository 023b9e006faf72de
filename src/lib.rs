//! # astar_grid
//!
//! Step-by-step [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) pathfinding on a small
//! grid with obstacles. Every move, diagonal or straight, costs one step and the remaining
//! distance is estimated with the
//! [Euclidean distance](https://en.wikipedia.org/wiki/Euclidean_distance). The search writes its
//! progress (open and closed cells, the final path) into the [SearchGrid] and reports each change
//! to a [SearchObserver], so the exploration can be drawn as it happens.
//!
//! ```
//! use astar_grid::{run_search, SearchGrid, SearchResult};
//! use grid_util::point::Point;
//!
//! let mut grid = SearchGrid::from_rows(&["     ", "     ", "## ##", "     ", "     "]);
//! let result = run_search(&mut grid, Point::new(0, 0), Point::new(4, 4)).unwrap();
//! assert!(result.path().unwrap().contains(&Point::new(2, 2)));
//! ```
mod error;
pub mod grid;
pub mod search;
pub mod session;

use grid_util::point::Point;
use itertools::Itertools;
use std::time::Duration;

pub use error::SetupError;
pub use grid::{CellState, SearchGrid};
pub use search::{
    run_search, AStar, NoopObserver, SearchConfig, SearchObserver, SearchReport, SearchResult,
    StepEvent,
};
pub use session::Session;

/// Side length of the grid used by the console demo.
pub const GRID_SIZE: usize = 20;

/// Pause between drawn steps when the search is animated.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(750);

/// Checks that a path only visits unblocked cells of the grid and that every step moves to one of
/// the eight neighbouring cells.
pub fn is_walkable_path(grid: &SearchGrid, path: &[Point]) -> bool {
    path.iter().all(|p| grid.in_bounds(*p) && !grid.is_blocked(*p))
        && path.iter().tuple_windows().all(|(a, b)| {
            let (dx, dy) = ((a.x - b.x).abs(), (a.y - b.y).abs());
            dx.max(dy) == 1
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walkable_paths() {
        let grid = SearchGrid::from_rows(&["  ", " #"]);
        let ok = [Point::new(0, 1), Point::new(0, 0), Point::new(1, 0)];
        assert!(is_walkable_path(&grid, &ok));
        assert!(!is_walkable_path(&grid, &[Point::new(0, 0), Point::new(1, 1)]));
        assert!(!is_walkable_path(&grid, &[Point::new(0, 0), Point::new(0, 0)]));
        assert!(!is_walkable_path(&grid, &[Point::new(0, 0), Point::new(2, 0)]));
        assert!(is_walkable_path(&grid, &[Point::new(1, 0)]));
    }
}
