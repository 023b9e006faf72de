//! A* search over a [SearchGrid], reporting every change it makes to the grid.
pub mod heuristic;
pub mod lists;
pub mod node;

use grid_util::point::Point;
use log::{debug, info, warn};
use std::thread;
use std::time::Duration;

use crate::error::SetupError;
use crate::grid::{CellState, SearchGrid, NEIGHBOUR_OFFSETS};
use lists::{ListKind, NodeLists};
use node::SearchNode;

/// Settings for a single search.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchConfig {
    /// Pause after every reported step. [None] runs the search at full speed.
    pub step_delay: Option<Duration>,
    /// Scales the Euclidean estimate.
    pub heuristic_factor: f32,
    /// Give up immediately when start and target are on different components instead of
    /// exhausting the reachable area first.
    pub skip_unreachable: bool,
}

impl SearchConfig {
    /// Pauses for [DEFAULT_STEP_DELAY](crate::DEFAULT_STEP_DELAY) after each step.
    pub fn animated() -> SearchConfig {
        SearchConfig {
            step_delay: Some(crate::DEFAULT_STEP_DELAY),
            ..SearchConfig::default()
        }
    }
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            step_delay: None,
            heuristic_factor: 1.0,
            skip_unreachable: false,
        }
    }
}

/// Outcome of a search. Not finding a path is a regular result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchResult {
    /// Positions from start to target, both included.
    PathFound(Vec<Point>),
    NoPathFound,
}

impl SearchResult {
    pub fn path(&self) -> Option<&[Point]> {
        match self {
            SearchResult::PathFound(path) => Some(path),
            SearchResult::NoPathFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchResult::PathFound(_))
    }

    /// Number of moves along the path.
    pub fn steps(&self) -> Option<usize> {
        self.path().map(|p| p.len().saturating_sub(1))
    }
}

/// Result of [AStar::run] together with some bookkeeping about the search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchReport {
    pub result: SearchResult,
    /// Nodes moved to the closed list.
    pub expanded: usize,
    /// Nodes superseded by a cheaper route.
    pub replaced: usize,
    /// The part of `replaced` that had already been closed.
    pub replaced_closed: usize,
}

/// A change the search just made to the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepEvent {
    /// A new position entered the open list.
    Discovered(Point),
    /// A position had all its neighbours considered and was closed.
    Expanded(Point),
    /// The target was taken from the open list.
    Reached(Point),
    /// A cell of the final path was marked.
    PathMarked(Point),
    /// The open list ran dry.
    Exhausted,
}

/// Receives the grid after every step, typically to draw it.
pub trait SearchObserver {
    fn on_step(&mut self, grid: &SearchGrid, event: StepEvent);
}

impl<F> SearchObserver for F
where
    F: FnMut(&SearchGrid, StepEvent),
{
    fn on_step(&mut self, grid: &SearchGrid, event: StepEvent) {
        self(grid, event)
    }
}

/// Observer that ignores every step.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {
    fn on_step(&mut self, _: &SearchGrid, _: StepEvent) {}
}

/// Checks that both endpoints lie on free cells of the grid and differ.
pub fn validate_endpoints(
    grid: &SearchGrid,
    start: Point,
    target: Point,
) -> Result<(), SetupError> {
    for p in [start, target] {
        if !grid.in_bounds(p) {
            return Err(SetupError::OutOfBounds(p));
        }
        if grid.is_blocked(p) {
            return Err(SetupError::Blocked(p));
        }
    }
    if start == target {
        return Err(SetupError::SameEndpoints(start));
    }
    Ok(())
}

/// Searches for a path at full speed without observing the steps.
pub fn run_search(
    grid: &mut SearchGrid,
    start: Point,
    target: Point,
) -> Result<SearchResult, SetupError> {
    AStar::default()
        .run(grid, start, target, &mut NoopObserver)
        .map(|report| report.result)
}

/// The search engine. Expands the cheapest open node until the target is taken from the open list,
/// leaving the explored area and the path marked on the grid.
#[derive(Clone, Debug, Default)]
pub struct AStar {
    pub config: SearchConfig,
}

impl AStar {
    pub fn new(config: SearchConfig) -> AStar {
        AStar { config }
    }

    fn estimate(&self, point: &Point, target: &Point) -> f32 {
        heuristic::euclidean(point, target) * self.config.heuristic_factor
    }

    fn notify<O: SearchObserver>(&self, observer: &mut O, grid: &SearchGrid, event: StepEvent) {
        observer.on_step(grid, event);
        if let Some(delay) = self.config.step_delay {
            thread::sleep(delay);
        }
    }

    /// Runs a search from `start` to `target`. Marks left by an earlier search are cleared first.
    pub fn run<O: SearchObserver>(
        &self,
        grid: &mut SearchGrid,
        start: Point,
        target: Point,
        observer: &mut O,
    ) -> Result<SearchReport, SetupError> {
        validate_endpoints(grid, start, target)?;
        grid.reset();
        grid.clear_state(CellState::Start);
        grid.set_cell(start, CellState::Start);
        grid.set_cell(target, CellState::Target);

        let reachable = grid.reachable(&start, &target);
        if self.config.skip_unreachable && !reachable {
            info!("{} is not reachable from {}", target, start);
            return Ok(SearchReport {
                result: SearchResult::NoPathFound,
                expanded: 0,
                replaced: 0,
                replaced_closed: 0,
            });
        }
        info!("Searching for a path from {} to {}", start, target);

        let mut lists = NodeLists::new();
        lists.insert(SearchNode::root(start, self.estimate(&start, &target)));
        let mut replaced = 0;
        let mut replaced_closed = 0;

        while let Some(current_id) = lists.best() {
            let current = lists.node(current_id).clone();
            if current.position == target {
                grid.set_cell(target, CellState::Target);
                self.notify(observer, grid, StepEvent::Reached(target));
                let path = lists.path_to(current_id);
                for &p in path.iter().rev() {
                    if p != start && p != target {
                        grid.set_cell(p, CellState::Path);
                        self.notify(observer, grid, StepEvent::PathMarked(p));
                    }
                }
                grid.set_cell(start, CellState::Start);
                info!(
                    "Found a path of {} steps after expanding {} nodes",
                    path.len() - 1,
                    lists.closed_len()
                );
                return Ok(SearchReport {
                    result: SearchResult::PathFound(path),
                    expanded: lists.closed_len(),
                    replaced,
                    replaced_closed,
                });
            }

            for (dx, dy) in NEIGHBOUR_OFFSETS {
                let neighbour = Point::new(current.position.x + dx, current.position.y + dy);
                if !grid.is_passable(neighbour) {
                    continue;
                }
                let list = match grid.cell(neighbour) {
                    CellState::Open => Some(ListKind::Open),
                    CellState::Closed => Some(ListKind::Closed),
                    _ => None,
                };
                let h = self.estimate(&neighbour, &target);
                match list {
                    Some(list) => {
                        if lists.replace_if_improved(list, neighbour, current_id, h) {
                            debug!("Cheaper route to {} through {}", neighbour, current.position);
                            replaced += 1;
                            if list == ListKind::Closed {
                                replaced_closed += 1;
                            }
                        }
                    }
                    None => {
                        lists.insert(SearchNode::child(neighbour, h, &current, current_id));
                        grid.set_cell(neighbour, CellState::Open);
                        self.notify(observer, grid, StepEvent::Discovered(neighbour));
                    }
                }
            }
            lists.close_best();
            grid.set_cell(current.position, CellState::Closed);
            self.notify(observer, grid, StepEvent::Expanded(current.position));
        }

        grid.set_cell(start, CellState::Start);
        self.notify(observer, grid, StepEvent::Exhausted);
        if reachable {
            warn!(
                "{} is reachable from {} but the search ran out of nodes",
                target, start
            );
        } else {
            info!("No path from {} to {}", start, target);
        }
        Ok(SearchReport {
            result: SearchResult::NoPathFound,
            expanded: lists.closed_len(),
            replaced,
            replaced_closed,
        })
    }
}
