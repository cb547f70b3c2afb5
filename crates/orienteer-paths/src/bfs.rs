use std::collections::VecDeque;

use orienteer_core::Point;

use crate::PathRange;
use crate::distance::chebyshev;
use crate::traits::Pather;

impl PathRange {
    /// Breadth-first flood from a single `source`, confined to the square of
    /// Chebyshev radius `radius` around it.
    ///
    /// Only cells strictly closer than `radius` to the source are reached:
    /// a cell whose offset in either axis equals `radius` is neither
    /// recorded nor expanded. Each call uses fresh visit marks, so two
    /// floods from different sources may reach the same cells.
    ///
    /// Reached points, the source first, are appended to `out` in visit
    /// order. Returns the number appended.
    pub fn bfs_within<P: Pather>(
        &mut self,
        pather: &P,
        source: Point,
        radius: i32,
        out: &mut Vec<Point>,
    ) -> usize {
        let Some(si) = self.idx(source) else {
            return 0;
        };
        if radius <= 0 {
            return 0;
        }

        self.bfs_generation = self.bfs_generation.wrapping_add(1);
        let cur_gen = self.bfs_generation;

        let start_len = out.len();
        let mut queue: VecDeque<usize> = VecDeque::new();
        self.bfs_marks[si] = cur_gen;
        queue.push_back(si);
        out.push(source);

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(ci) = queue.pop_front() {
            let cp = self.point(ci);

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.bfs_marks[ni] == cur_gen {
                    continue;
                }
                if chebyshev(source, np) >= radius {
                    continue;
                }
                self.bfs_marks[ni] = cur_gen;
                queue.push_back(ni);
                out.push(np);
            }
        }

        self.nbuf = nbuf;
        out.len() - start_len
    }
}
