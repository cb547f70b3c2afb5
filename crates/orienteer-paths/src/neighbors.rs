use orienteer_core::{Point, Range};

const MOORE: [Point; 8] = [
    Point::new(-1, -1),
    Point::new(0, -1),
    Point::new(1, -1),
    Point::new(-1, 0),
    Point::new(1, 0),
    Point::new(-1, 1),
    Point::new(0, 1),
    Point::new(1, 1),
];

const VON_NEUMANN: [Point; 4] = [
    Point::new(0, -1),
    Point::new(1, 0),
    Point::new(0, 1),
    Point::new(-1, 0),
];

/// Neighbor enumeration clipped to a grid rectangle.
///
/// Moore neighbors (8-way) drive path search and lake-edge detection; von
/// Neumann neighbors (4-way) drive the seasonal flood fills.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Neighbors {
    bounds: Range,
}

impl Neighbors {
    /// Create a helper for the given grid rectangle.
    pub fn new(bounds: Range) -> Self {
        Self { bounds }
    }

    /// The rectangle neighbors are clipped to.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Append the in-bounds 8-way neighbors of `p` to `buf`, row by row.
    pub fn moore_into(&self, p: Point, buf: &mut Vec<Point>) {
        for d in MOORE {
            let n = p + d;
            if self.bounds.contains(n) {
                buf.push(n);
            }
        }
    }

    /// Append the in-bounds 4-way neighbors of `p` to `buf`
    /// (up, right, down, left).
    pub fn von_neumann_into(&self, p: Point, buf: &mut Vec<Point>) {
        for d in VON_NEUMANN {
            let n = p + d;
            if self.bounds.contains(n) {
                buf.push(n);
            }
        }
    }

    /// Up to 8 in-bounds neighbors of `p`.
    pub fn moore(&self, p: Point) -> Vec<Point> {
        let mut buf = Vec::with_capacity(8);
        self.moore_into(p, &mut buf);
        buf
    }

    /// Up to 4 in-bounds axis-aligned neighbors of `p`.
    pub fn von_neumann(&self, p: Point) -> Vec<Point> {
        let mut buf = Vec::with_capacity(4);
        self.von_neumann_into(p, &mut buf);
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nb() -> Neighbors {
        Neighbors::new(Range::new(0, 0, 5, 4))
    }

    #[test]
    fn interior_cell_has_full_neighborhoods() {
        let p = Point::new(2, 2);
        let m = nb().moore(p);
        assert_eq!(m.len(), 8);
        assert!(!m.contains(&p));
        assert!(m.iter().all(|&n| p.is_adjacent(n)));
        assert_eq!(
            nb().von_neumann(p),
            vec![
                Point::new(2, 1),
                Point::new(3, 2),
                Point::new(2, 3),
                Point::new(1, 2)
            ]
        );
    }

    #[test]
    fn corners_are_clipped() {
        assert_eq!(
            nb().moore(Point::new(0, 0)),
            vec![Point::new(1, 0), Point::new(0, 1), Point::new(1, 1)]
        );
        assert_eq!(nb().moore(Point::new(4, 3)).len(), 3);
        assert_eq!(
            nb().von_neumann(Point::new(0, 0)),
            vec![Point::new(1, 0), Point::new(0, 1)]
        );
    }

    #[test]
    fn first_row_and_column_are_reachable() {
        let v = nb().von_neumann(Point::new(1, 1));
        assert!(v.contains(&Point::new(1, 0)));
        assert!(v.contains(&Point::new(0, 1)));
    }

    #[test]
    fn into_appends() {
        let mut buf = vec![Point::new(9, 9)];
        nb().moore_into(Point::new(2, 0), &mut buf);
        assert_eq!(buf.len(), 6);
        assert_eq!(buf[0], Point::new(9, 9));
    }
}
