use grid_util::point::Point;
use thiserror::Error;

/// Reasons a search refuses to start. None of these can arise once the search is running.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    #[error("{0} lies outside the grid")]
    OutOfBounds(Point),
    #[error("{0} is blocked")]
    Blocked(Point),
    #[error("start and target are both placed at {0}")]
    SameEndpoints(Point),
    #[error("no target has been placed")]
    MissingTarget,
}
