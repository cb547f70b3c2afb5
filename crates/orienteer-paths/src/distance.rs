use orienteer_core::Point;

/// Chebyshev (L∞) distance between two points: the number of king moves
/// between them.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}
