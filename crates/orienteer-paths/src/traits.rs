use orienteer_core::Point;

/// Minimal search interface: neighbor enumeration.
pub trait Pather {
    /// Append neighbors of `p` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// The length and cost of one move between adjacent cells.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Step {
    /// Ground distance covered, in meters.
    pub distance: f64,
    /// Search cost of the move. Always > 0.
    pub cost: f64,
}

/// Pather with weighted edges.
pub trait WeightedPather: Pather {
    /// Move from `from` to the adjacent `to`, or `None` if the move is
    /// not allowed.
    fn step(&self, from: Point, to: Point) -> Option<Step>;
}

/// Full A* pather.
pub trait AstarPather: WeightedPather {
    /// Heuristic estimate of the cost from `from` to `to`.
    fn estimate(&self, from: Point, to: Point) -> f64;
}
