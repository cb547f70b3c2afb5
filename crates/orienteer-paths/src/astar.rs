use std::collections::BinaryHeap;

use orienteer_core::{Error, Point, Result};

use crate::PathRange;
use crate::pathrange::NodeRef;
use crate::traits::AstarPather;

/// The outcome of one A* search between two waypoints.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Leg {
    /// Cells visited after the start, ending with the goal. Empty when the
    /// start already is the goal.
    pub path: Vec<Point>,
    /// Ground distance along `path`, in meters.
    pub distance: f64,
    /// Search cost of `path`.
    pub cost: f64,
    /// Nodes taken off the open set, the goal included.
    pub expanded: usize,
}

impl PathRange {
    /// Compute the cheapest path from `from` to `to` using A*.
    ///
    /// The returned [`Leg`] lists the path exclusive of `from` and inclusive
    /// of `to`, along with the ground distance accumulated while relaxing
    /// edges. Fails with [`Error::OutOfBounds`] if either endpoint lies
    /// outside the range, and with [`Error::NoPath`] once the open set runs
    /// dry without reaching `to`.
    pub fn astar_path<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
    ) -> Result<Leg> {
        let start_idx = self.checked_idx(from)?;
        let goal_idx = self.checked_idx(to)?;
        self.searches += 1;

        if start_idx == goal_idx {
            return Ok(Leg::default());
        }

        // Bump generation to lazily invalidate all nodes.
        self.astar_generation = self.astar_generation.wrapping_add(1);
        let cur_gen = self.astar_generation;

        // Initialise the start node.
        {
            let node = &mut self.astar_nodes[start_idx];
            node.g = 0.0;
            node.f = pather.estimate(from, to);
            node.dist = 0.0;
            node.parent = usize::MAX;
            node.generation = cur_gen;
            node.open = true;
        }

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        open.push(NodeRef {
            idx: start_idx,
            f: self.astar_nodes[start_idx].f,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut expanded = 0;

        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search false;
            };

            let ci = current.idx;

            // Skip stale entries.
            if self.astar_nodes[ci].generation != cur_gen || !self.astar_nodes[ci].open {
                continue;
            }
            expanded += 1;

            if ci == goal_idx {
                break 'search true;
            }

            self.astar_nodes[ci].open = false;
            let current_g = self.astar_nodes[ci].g;
            let current_dist = self.astar_nodes[ci].dist;
            let current_point = self.point(ci);

            nbuf.clear();
            pather.neighbors(current_point, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let Some(step) = pather.step(current_point, np) else {
                    continue;
                };
                let tentative_g = current_g + step.cost;

                let n = &mut self.astar_nodes[ni];
                if n.generation == cur_gen {
                    // Already reached this generation.
                    if tentative_g >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                }

                n.g = tentative_g;
                n.f = tentative_g + pather.estimate(np, to);
                n.dist = current_dist + step.distance;
                n.parent = ci;
                n.open = true;

                open.push(NodeRef { idx: ni, f: n.f });
            }
        };

        self.nbuf = nbuf;

        if !found {
            return Err(Error::NoPath { from, to });
        }

        // Reconstruct path, dropping the start.
        let mut path = Vec::new();
        let mut ci = goal_idx;
        while ci != start_idx {
            path.push(self.point(ci));
            ci = self.astar_nodes[ci].parent;
        }
        path.reverse();

        let goal = &self.astar_nodes[goal_idx];
        Ok(Leg {
            path,
            distance: goal.dist,
            cost: goal.g,
            expanded,
        })
    }
}
