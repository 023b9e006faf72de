use grid_util::point::Point;
use log::info;

use crate::error::SetupError;
use crate::grid::{CellState, SearchGrid};
use crate::search::{validate_endpoints, AStar, SearchConfig, SearchObserver, SearchReport};

/// A grid together with the start and target placed on it. The start persists across searches;
/// after a successful search it can walk onto the target, which then has to be placed anew.
#[derive(Clone, Debug)]
pub struct Session {
    grid: SearchGrid,
    start: Point,
    target: Option<Point>,
    /// Whether the last search reached the current target.
    last_found: bool,
}

impl Session {
    /// Places the start on a free cell of `grid`.
    pub fn new(mut grid: SearchGrid, start: Point) -> Result<Session, SetupError> {
        check_free(&grid, start)?;
        grid.reset();
        grid.clear_state(CellState::Start);
        grid.set_cell(start, CellState::Start);
        Ok(Session {
            grid,
            start,
            target: None,
            last_found: false,
        })
    }

    pub fn grid(&self) -> &SearchGrid {
        &self.grid
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn target(&self) -> Option<Point> {
        self.target
    }

    /// Places the target, replacing any earlier one.
    pub fn place_target(&mut self, target: Point) -> Result<(), SetupError> {
        validate_endpoints(&self.grid, self.start, target)?;
        if let Some(old) = self.target.take() {
            if self.grid.cell(old) == CellState::Target {
                self.grid.set_cell(old, CellState::Empty);
            }
        }
        self.grid.set_cell(target, CellState::Target);
        self.target = Some(target);
        self.last_found = false;
        Ok(())
    }

    /// Searches from the start to the placed target.
    pub fn run<O: SearchObserver>(
        &mut self,
        config: &SearchConfig,
        observer: &mut O,
    ) -> Result<SearchReport, SetupError> {
        let target = self.target.ok_or(SetupError::MissingTarget)?;
        let report =
            AStar::new(config.clone()).run(&mut self.grid, self.start, target, observer)?;
        self.last_found = report.result.is_found();
        Ok(report)
    }

    /// Moves the start onto the target, leaving the old start cell marked as part of the path.
    /// Returns false unless the last search found a path to the current target.
    pub fn walk_to_target(&mut self) -> bool {
        if !self.last_found {
            return false;
        }
        let Some(target) = self.target.take() else {
            return false;
        };
        self.last_found = false;
        info!("Moving start from {} to {}", self.start, target);
        self.grid.set_cell(self.start, CellState::Path);
        self.grid.set_cell(target, CellState::Start);
        self.start = target;
        true
    }

    /// Clears all search marks and the target.
    pub fn clear(&mut self) {
        self.target = None;
        self.last_found = false;
        self.grid.reset();
        self.grid.set_cell(self.start, CellState::Start);
    }

    pub fn into_grid(self) -> SearchGrid {
        self.grid
    }
}

fn check_free(grid: &SearchGrid, point: Point) -> Result<(), SetupError> {
    if !grid.in_bounds(point) {
        Err(SetupError::OutOfBounds(point))
    } else if grid.is_blocked(point) {
        Err(SetupError::Blocked(point))
    } else {
        Ok(())
    }
}
