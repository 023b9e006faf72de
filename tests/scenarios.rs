use astar_grid::{
    is_walkable_path, run_search, AStar, CellState, NoopObserver, SearchConfig, SearchGrid,
    SearchResult, Session, SetupError, StepEvent, GRID_SIZE,
};
use grid_util::point::Point;

fn chebyshev(a: Point, b: Point) -> usize {
    (a.x - b.x).abs().max((a.y - b.y).abs()) as usize
}

/// Without obstacles every route takes as many steps as the Chebyshev distance.
#[test]
fn open_grid_paths_are_chebyshev_long() {
    let starts = [Point::new(0, 0), Point::new(7, 3), Point::new(19, 19), Point::new(12, 0)];
    let targets = [Point::new(19, 0), Point::new(4, 15), Point::new(10, 11), Point::new(0, 19)];
    for start in starts {
        for target in targets {
            let mut grid = SearchGrid::new(GRID_SIZE, GRID_SIZE);
            let result = run_search(&mut grid, start, target).unwrap();
            assert_eq!(result.steps(), Some(chebyshev(start, target)));
            let path = result.path().unwrap();
            assert_eq!(path.first(), Some(&start));
            assert_eq!(path.last(), Some(&target));
            assert!(is_walkable_path(&grid, path));
        }
    }
}

#[test]
fn scenario_open_five_by_five() {
    let mut grid = SearchGrid::new(5, 5);
    let result = run_search(&mut grid, Point::new(0, 0), Point::new(4, 4)).unwrap();
    assert_eq!(result.path().map(|p| p.len()), Some(5));
    assert_eq!(result.steps(), Some(4));
}

#[test]
fn scenario_wall_with_single_gap() {
    //  _____
    // |S    |
    // |     |
    // |## ##|
    // |     |
    // |    T|
    //  _____
    let mut grid = SearchGrid::from_rows(&["     ", "     ", "## ##", "     ", "     "]);
    let result = run_search(&mut grid, Point::new(0, 0), Point::new(4, 4)).unwrap();
    let path = result.path().unwrap();
    assert!(path.contains(&Point::new(2, 2)));
    assert!(is_walkable_path(&grid, path));
    assert_eq!(grid.cell(Point::new(2, 2)), CellState::Path);
}

#[test]
fn scenario_blocked_target_is_rejected() {
    let mut grid = SearchGrid::from_rows(&["     ", "     ", "     ", "     ", "    #"]);
    assert_eq!(
        run_search(&mut grid, Point::new(0, 0), Point::new(4, 4)),
        Err(SetupError::Blocked(Point::new(4, 4)))
    );
    let mut session = Session::new(grid, Point::new(0, 0)).unwrap();
    assert_eq!(
        session.place_target(Point::new(4, 4)),
        Err(SetupError::Blocked(Point::new(4, 4)))
    );
}

#[test]
fn enclosed_target_has_no_path() {
    let mut grid = SearchGrid::from_rows(&[
        "       ",
        "       ",
        "  ###  ",
        "  # #  ",
        "  ###  ",
        "       ",
        "       ",
    ]);
    let start = Point::new(0, 0);
    let target = Point::new(3, 3);
    let result = run_search(&mut grid, start, target).unwrap();
    assert_eq!(result, SearchResult::NoPathFound);
    // Everything outside the ring was explored, the start keeps its marker.
    assert_eq!(grid.count(CellState::Closed), 49 - 9 - 1);
    assert_eq!(grid.cell(start), CellState::Start);
    assert_eq!(grid.cell(target), CellState::Target);
}

#[test]
fn enclosed_corner_target_has_no_path() {
    let mut grid = SearchGrid::from_rows(&["    ", "    ", "  ##", "  # "]);
    let result = run_search(&mut grid, Point::new(0, 0), Point::new(3, 3)).unwrap();
    assert_eq!(result, SearchResult::NoPathFound);
}

#[test]
fn repeated_search_is_stable() {
    let mut grid = SearchGrid::from_rows(&[
        "        ",
        " ###### ",
        "      # ",
        " #### # ",
        " #    # ",
        " # #### ",
        " #      ",
        "        ",
    ]);
    let start = Point::new(2, 4);
    let target = Point::new(7, 7);
    let first = run_search(&mut grid, start, target).unwrap();
    let second = run_search(&mut grid, start, target).unwrap();
    assert!(first.is_found());
    assert_eq!(first.steps(), second.steps());
    assert!(is_walkable_path(&grid, first.path().unwrap()));
}

/// The estimate overrates diagonal moves, so a maze like this one hands out cheaper routes to
/// positions already listed, one of them closed.
#[test]
fn cheaper_routes_replace_listed_nodes() {
    // Only '#' is an obstacle; S and T mark the endpoints.
    let mut grid = SearchGrid::from_rows(&[
        "...###..#...S#..",
        "...#..#...##..#.",
        "....#.##.#..###.",
        ".##..##.....#...",
        "##.##..#..#..##.",
        "..#..#...#...##.",
        "##....#....#....",
        "....###..#....#.",
        "####.#.#...#....",
        "#.#..#.#..#.##.#",
        "##...#.#.###....",
        ".#.#..#......#..",
        "#.####....##..#.",
        "....T######...##",
        "...#.#..#..##...",
        "##...####.....#.",
    ]);
    let start = Point::new(12, 0);
    let target = Point::new(4, 13);
    let report = AStar::new(SearchConfig::default())
        .run(&mut grid, start, target, &mut NoopObserver)
        .unwrap();
    assert_eq!(report.replaced, 13);
    assert_eq!(report.replaced_closed, 1);
    let expected: Vec<Point> = [
        (12, 0),
        (12, 1),
        (11, 2),
        (10, 3),
        (9, 4),
        (8, 5),
        (7, 6),
        (7, 7),
        (6, 8),
        (6, 9),
        (6, 10),
        (5, 11),
        (4, 11),
        (3, 10),
        (2, 11),
        (1, 12),
        (2, 13),
        (3, 13),
        (4, 13),
    ]
    .into_iter()
    .map(|(x, y)| Point::new(x, y))
    .collect();
    let path = report.result.path().unwrap();
    assert_eq!(path, expected.as_slice());
    assert!(is_walkable_path(&grid, path));
    assert_eq!(grid.cell(start), CellState::Start);
    assert_eq!(grid.cell(target), CellState::Target);
}

#[test]
fn observer_sees_every_path_cell() {
    let mut grid = SearchGrid::from_rows(&["          ", " ######## ", "          "]);
    let start = Point::new(0, 0);
    let target = Point::new(9, 2);
    let mut marked = Vec::new();
    let mut expanded = 0;
    let report = AStar::new(SearchConfig::default())
        .run(&mut grid, start, target, &mut |g: &SearchGrid, e: StepEvent| match e {
            StepEvent::PathMarked(p) => {
                assert_eq!(g.cell(p), CellState::Path);
                marked.push(p)
            }
            StepEvent::Expanded(_) => expanded += 1,
            StepEvent::Reached(p) => {
                assert_eq!(p, target);
                assert_eq!(g.cell(p), CellState::Target);
            }
            _ => {}
        })
        .unwrap();
    let path = report.result.path().unwrap().to_vec();
    assert_eq!(marked.len(), path.len() - 2);
    assert_eq!(expanded, report.expanded);
    // Marks are laid from the target back towards the start.
    assert_eq!(marked.first(), path.get(path.len() - 2));
    assert_eq!(grid.count(CellState::Path), marked.len());
}

#[test]
fn a_second_search_clears_the_first() {
    let mut grid = SearchGrid::new(6, 6);
    run_search(&mut grid, Point::new(0, 0), Point::new(5, 5)).unwrap();
    run_search(&mut grid, Point::new(0, 5), Point::new(5, 5)).unwrap();
    assert_eq!(grid.cell(Point::new(0, 0)), CellState::Empty);
    assert_eq!(grid.count(CellState::Start), 1);
    assert_eq!(grid.count(CellState::Target), 1);
    for i in 1..5 {
        assert_eq!(grid.cell(Point::new(i, 5)), CellState::Path);
    }
}
