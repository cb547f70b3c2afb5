use orienteer_core::{Error, Point, Range};

// ---------------------------------------------------------------------------
// Internal node for A* searches
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub(crate) struct Node {
    /// Cost so far.
    pub(crate) g: f64,
    /// Priority: `g` plus the heuristic estimate.
    pub(crate) f: f64,
    /// Ground distance travelled along the best path so far.
    pub(crate) dist: f64,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    pub(crate) open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0.0,
            f: 0.0,
            dist: 0.0,
            parent: usize::MAX,
            generation: 0,
            open: false,
        }
    }
}

/// Reference into the node array, ordered by `f` for use in `BinaryHeap`.
#[derive(Clone, Copy)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) f: f64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first; ties go to
        // the lower index so searches are deterministic.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NodeRef {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for NodeRef {}

// ---------------------------------------------------------------------------
// PathRange
// ---------------------------------------------------------------------------

/// Central coordinator for searches on a grid rectangle.
///
/// `PathRange` owns the A* node array and the flood-fill visit marks so that
/// repeated searches over the same terrain allocate nothing after the first
/// use. Each search bumps a generation counter instead of clearing them.
pub struct PathRange {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    // A* caches
    pub(crate) astar_nodes: Vec<Node>,
    pub(crate) astar_generation: u32,
    pub(crate) searches: u64,
    // bounded BFS caches
    pub(crate) bfs_marks: Vec<u32>,
    pub(crate) bfs_generation: u32,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Point>,
}

impl PathRange {
    /// Create a new `PathRange` for the given grid rectangle.
    pub fn new(rng: Range) -> Self {
        let len = rng.len();
        Self {
            rng,
            width: rng.width().max(0) as usize,
            astar_nodes: vec![Node::default(); len],
            astar_generation: 0,
            searches: 0,
            bfs_marks: vec![0; len],
            bfs_generation: 0,
            nbuf: Vec::with_capacity(8),
        }
    }

    /// The grid rectangle being used.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Number of A* searches run so far.
    #[inline]
    pub fn searches(&self) -> u64 {
        self.searches
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Point::new(x, y)
    }

    /// Flat index of `p`, or [`Error::OutOfBounds`].
    pub(crate) fn checked_idx(&self, p: Point) -> Result<usize, Error> {
        self.idx(p).ok_or(Error::OutOfBounds {
            point: p,
            width: self.rng.width(),
            height: self.rng.height(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn index_round_trip_with_offset_origin() {
        let pr = PathRange::new(Range::new(2, 3, 6, 8));
        let p = Point::new(4, 5);
        let i = pr.idx(p).unwrap();
        assert_eq!(i, 2 * 4 + 2);
        assert_eq!(pr.point(i), p);
        assert_eq!(pr.idx(Point::new(6, 5)), None);
        assert!(matches!(
            pr.checked_idx(Point::new(0, 0)),
            Err(Error::OutOfBounds { width: 4, height: 5, .. })
        ));
    }

    #[test]
    fn heap_pops_lowest_priority_first() {
        let mut open = BinaryHeap::new();
        open.push(NodeRef { idx: 3, f: 2.5 });
        open.push(NodeRef { idx: 1, f: 0.5 });
        open.push(NodeRef { idx: 7, f: 0.5 });
        open.push(NodeRef { idx: 0, f: 9.0 });
        let order: Vec<_> = std::iter::from_fn(|| open.pop()).map(|n| n.idx).collect();
        assert_eq!(order, vec![1, 7, 3, 0]);
    }
}
