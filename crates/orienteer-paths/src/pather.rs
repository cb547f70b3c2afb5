use orienteer_core::{Point, TerrainGrid};

use crate::cost::{CellScale, CostModel, MAX_DESCENT_GAIN};
use crate::distance::chebyshev;
use crate::neighbors::Neighbors;
use crate::traits::{AstarPather, Pather, Step, WeightedPather};

/// Scale factor of the reference diagonal estimate.
const REFERENCE_SCALE: f64 = 5.0;

/// How the A* search estimates the remaining cost to the goal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Heuristic {
    /// Diagonal step count over 5, divided by the speed of the cell being
    /// estimated. Can overestimate, so paths are not guaranteed optimal.
    Reference,
    /// Chebyshev step count times the shortest step length, divided by the
    /// fastest speed any move on the grid can reach. Never overestimates.
    #[default]
    Admissible,
}

/// [`AstarPather`] over a [`TerrainGrid`]: 8-way moves into traversable
/// cells, priced by the [`CostModel`].
#[derive(Copy, Clone, Debug)]
pub struct TerrainPather<'a> {
    cost: CostModel<'a>,
    nb: Neighbors,
    heuristic: Heuristic,
    // Admissible cost of a single king move.
    min_step_cost: f64,
}

impl<'a> TerrainPather<'a> {
    pub fn new(grid: &'a TerrainGrid, scale: CellScale, heuristic: Heuristic) -> Self {
        let top_speed = grid.speeds().max_speed() * MAX_DESCENT_GAIN;
        let min_step_cost = if top_speed > 0.0 {
            scale.min_step() / top_speed
        } else {
            0.0
        };
        Self {
            cost: CostModel::new(grid, scale),
            nb: Neighbors::new(grid.bounds()),
            heuristic,
            min_step_cost,
        }
    }
}

impl Pather for TerrainPather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        let grid = self.cost.grid();
        self.nb.moore_into(p, buf);
        buf.retain(|&n| grid.is_traversable(n));
    }
}

impl WeightedPather for TerrainPather<'_> {
    #[inline]
    fn step(&self, from: Point, to: Point) -> Option<Step> {
        self.cost.step(from, to)
    }
}

impl AstarPather for TerrainPather<'_> {
    fn estimate(&self, from: Point, to: Point) -> f64 {
        match self.heuristic {
            Heuristic::Reference => {
                let dx = (from.x - to.x).abs();
                let dy = (from.y - to.y).abs();
                let diag = (dx.min(dy) + (dx - dy).abs()) as f64 / REFERENCE_SCALE;
                match self.cost.grid().speed_at(from) {
                    Some(speed) if speed > 0.0 => diag / speed,
                    _ => 0.0,
                }
            }
            Heuristic::Admissible => chebyshev(from, to) as f64 * self.min_step_cost,
        }
    }
}
