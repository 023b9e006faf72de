use grid_util::point::Point;

/// Straight-line distance from `point` to `target`.
pub fn euclidean(point: &Point, target: &Point) -> f32 {
    let dx = (point.x - target.x) as f32;
    let dy = (point.y - target.y) as f32;
    (dx * dx + dy * dy).sqrt()
}
