use crate::Position;

/// Plain Euclidean distance. Movement is resolved by the server, so there is
/// no pathing cost here.
pub fn distance(a: Position, b: Position) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Mean position of a group, or `None` for an empty group.
pub fn centroid(positions: impl IntoIterator<Item = Position>) -> Option<Position> {
    let (count, sum_x, sum_y) = positions
        .into_iter()
        .fold((0usize, 0.0, 0.0), |(n, sx, sy), p| (n + 1, sx + p.x, sy + p.y));
    if count == 0 {
        return None;
    }
    let n = count as f64;
    Some(Position::new(sum_x / n, sum_y / n))
}
