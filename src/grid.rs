use core::fmt;
use grid_util::grid::{Grid, SimpleGrid};
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;

/// The state of a single cell. Besides obstacles this records the progress of the most recent
/// search so that it can be drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Empty,
    Blocked,
    Open,
    Closed,
    Path,
    Start,
    Target,
}

impl CellState {
    /// Character used for the cell in the text rendering of a [SearchGrid].
    pub fn glyph(self) -> char {
        match self {
            CellState::Empty => ' ',
            CellState::Blocked => '#',
            CellState::Open => '+',
            CellState::Closed => '-',
            CellState::Path => '*',
            CellState::Start => '@',
            CellState::Target => '$',
        }
    }
    /// Marks left behind by a search, cleared by [SearchGrid::reset].
    pub fn is_search_mark(self) -> bool {
        matches!(
            self,
            CellState::Open | CellState::Closed | CellState::Path | CellState::Target
        )
    }
}

/// Legend digit for a row or column index, `0-9` followed by `A-Z`.
///
/// Only indices below 36 have a digit of their own. Larger ones wrap around, so the legend of a
/// wider grid repeats and [parse_coordinate] cannot tell those columns apart.
pub fn coordinate_digit(index: usize) -> char {
    char::from_digit(index as u32 % 36, 36)
        .unwrap_or('?')
        .to_ascii_uppercase()
}

/// Inverse of [coordinate_digit], case insensitive.
pub fn parse_coordinate(c: char) -> Option<i32> {
    c.to_digit(36).map(|d| d as i32)
}

/// The Moore neighbourhood in the order it is expanded during search: the four diagonals first,
/// then the four straight moves.
pub const NEIGHBOUR_OFFSETS: [(i32, i32); 8] = [
    (-1, 1),
    (-1, -1),
    (1, -1),
    (1, 1),
    (-1, 0),
    (0, -1),
    (1, 0),
    (0, 1),
];

/// [SearchGrid] holds the [CellState] of every cell together with a [UnionFind] over the
/// unblocked cells, so that it can be cheaply decided whether two points are connected at all.
/// Components are joined directly when a cell opens up and are marked dirty when a cell becomes
/// blocked, since that may split a component.
#[derive(Clone, Debug)]
pub struct SearchGrid {
    cells: SimpleGrid<CellState>,
    components: UnionFind<usize>,
    components_dirty: bool,
}

impl SearchGrid {
    /// Creates a grid of empty cells.
    pub fn new(width: usize, height: usize) -> SearchGrid {
        let mut grid = SearchGrid {
            cells: SimpleGrid::new(width, height, CellState::Empty),
            components: UnionFind::new(width * height),
            components_dirty: false,
        };
        grid.generate_components();
        grid
    }

    /// Builds a grid from rows of text where `#` is an obstacle and anything else is empty. Rows
    /// are read top to bottom as increasing `y`.
    pub fn from_rows(rows: &[&str]) -> SearchGrid {
        let height = rows.len();
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut grid = SearchGrid {
            cells: SimpleGrid::new(width, height, CellState::Empty),
            components: UnionFind::new(width * height),
            components_dirty: false,
        };
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                if c == '#' {
                    grid.cells
                        .set_point(Point::new(x as i32, y as i32), CellState::Blocked);
                }
            }
        }
        grid.generate_components();
        grid
    }

    pub fn width(&self) -> usize {
        self.cells.width()
    }

    pub fn height(&self) -> usize {
        self.cells.height()
    }

    pub fn in_bounds(&self, point: Point) -> bool {
        self.cells.point_in_bounds(point)
    }

    /// All points of the grid, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Point> {
        let (w, h) = (self.width() as i32, self.height() as i32);
        (0..h).flat_map(move |y| (0..w).map(move |x| Point::new(x, y)))
    }

    /// Panics if `point` is out of bounds.
    pub fn cell(&self, point: Point) -> CellState {
        assert!(self.in_bounds(point), "{} is outside the grid", point);
        self.cells.get_point(point)
    }

    /// Overwrites a cell. Moving a cell in or out of [CellState::Blocked] keeps the components up
    /// to date. Panics if `point` is out of bounds.
    pub fn set_cell(&mut self, point: Point, state: CellState) {
        let previous = self.cell(point);
        self.cells.set_point(point, state);
        match (previous == CellState::Blocked, state == CellState::Blocked) {
            (false, true) => self.components_dirty = true,
            (true, false) => self.join_neighbours(point),
            _ => {}
        }
    }

    /// Places or removes an obstacle.
    pub fn set_blocked(&mut self, point: Point, blocked: bool) {
        let state = if blocked {
            CellState::Blocked
        } else {
            CellState::Empty
        };
        self.set_cell(point, state);
    }

    pub fn is_blocked(&self, point: Point) -> bool {
        self.in_bounds(point) && self.cell(point) == CellState::Blocked
    }

    /// Whether the search may step onto `point`: it must lie on the grid and be neither an obstacle
    /// nor the start cell.
    pub fn is_passable(&self, point: Point) -> bool {
        self.in_bounds(point)
            && !matches!(self.cell(point), CellState::Blocked | CellState::Start)
    }

    /// Clears the marks of the last search. Obstacles and the start survive.
    pub fn reset(&mut self) {
        for p in self.positions().collect::<Vec<_>>() {
            if self.cells.get_point(p).is_search_mark() {
                self.cells.set_point(p, CellState::Empty);
            }
        }
    }

    /// Empties every cell in the given state.
    pub fn clear_state(&mut self, state: CellState) {
        for p in self.positions().collect::<Vec<_>>() {
            if self.cell(p) == state {
                self.set_cell(p, CellState::Empty);
            }
        }
    }

    /// Number of cells in the given state.
    pub fn count(&self, state: CellState) -> usize {
        self.positions().filter(|p| self.cell(*p) == state).count()
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn component(&mut self, point: &Point) -> usize {
        self.update();
        self.components.find(self.cells.get_ix_point(point))
    }

    /// Checks if two unblocked points are on the same 8-connected component.
    pub fn reachable(&mut self, start: &Point, goal: &Point) -> bool {
        if !self.in_bounds(*start) || !self.in_bounds(*goal) {
            return false;
        }
        if self.is_blocked(*start) || self.is_blocked(*goal) {
            return false;
        }
        self.update();
        let start_ix = self.cells.get_ix_point(start);
        let goal_ix = self.cells.get_ix_point(goal);
        self.components.equiv(start_ix, goal_ix)
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up unblocked neighbours.
    pub fn generate_components(&mut self) {
        let (w, h) = (self.width(), self.height());
        self.components = UnionFind::new(w * h);
        self.components_dirty = false;
        for point in self.positions().collect::<Vec<_>>() {
            if self.is_blocked(point) {
                continue;
            }
            let parent_ix = self.cells.get_ix_point(&point);
            // Looking forward is enough, the remaining pairs are covered from the other side.
            [
                Point::new(point.x, point.y + 1),
                Point::new(point.x + 1, point.y - 1),
                Point::new(point.x + 1, point.y),
                Point::new(point.x + 1, point.y + 1),
            ]
            .into_iter()
            .filter(|p| self.in_bounds(*p) && !self.is_blocked(*p))
            .collect::<Vec<_>>()
            .into_iter()
            .for_each(|p| {
                let ix = self.cells.get_ix_point(&p);
                self.components.union(parent_ix, ix);
            });
        }
    }

    fn join_neighbours(&mut self, point: Point) {
        let p_ix = self.cells.get_ix_point(&point);
        for (dx, dy) in NEIGHBOUR_OFFSETS {
            let n = Point::new(point.x + dx, point.y + dy);
            if self.in_bounds(n) && !self.is_blocked(n) {
                let n_ix = self.cells.get_ix_point(&n);
                self.components.union(p_ix, n_ix);
            }
        }
    }
}

impl Default for SearchGrid {
    fn default() -> SearchGrid {
        SearchGrid::new(crate::GRID_SIZE, crate::GRID_SIZE)
    }
}

impl fmt::Display for SearchGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let header: String = (0..self.width()).map(coordinate_digit).collect();
        writeln!(f, " {}", header)?;
        for y in 0..self.height() {
            let row: String = (0..self.width())
                .map(|x| self.cell(Point::new(x as i32, y as i32)).glyph())
                .collect();
            writeln!(f, "{}{}", coordinate_digit(y), row)?;
        }
        Ok(())
    }
}
