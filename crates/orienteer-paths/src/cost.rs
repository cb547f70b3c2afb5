//! Traversal cost of a single move across the terrain.
//!
//! A move's cost is its ground distance divided by the effective speed at
//! the destination, where the destination's base speed is scaled down when
//! climbing and up when descending:
//!
//! ```text
//! effective = speed - speed * slope_degrees / 100
//! cost      = distance / effective
//! ```

use orienteer_core::{Error, Point, Result, TerrainGrid};

use crate::traits::Step;

/// Upper bound on `effective / speed`: the slope angle never drops below
/// -90°, so descending at most multiplies the base speed by 1.9.
pub const MAX_DESCENT_GAIN: f64 = 1.9;

/// Real-world size of one raster cell.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellScale {
    /// East-west extent of a cell (one x step), in meters.
    pub lon: f64,
    /// North-south extent of a cell (one y step), in meters.
    pub lat: f64,
}

impl Default for CellScale {
    fn default() -> Self {
        Self {
            lon: 10.29,
            lat: 7.55,
        }
    }
}

impl CellScale {
    /// Length of a diagonal step.
    #[inline]
    pub fn diagonal(self) -> f64 {
        self.lon.hypot(self.lat)
    }

    /// Length of the shortest possible step.
    #[inline]
    pub fn min_step(self) -> f64 {
        self.lon.min(self.lat)
    }
}

/// Distance, slope and speed between Moore-adjacent cells of a grid.
#[derive(Copy, Clone, Debug)]
pub struct CostModel<'a> {
    grid: &'a TerrainGrid,
    scale: CellScale,
}

impl<'a> CostModel<'a> {
    pub fn new(grid: &'a TerrainGrid, scale: CellScale) -> Self {
        Self { grid, scale }
    }

    #[inline]
    pub fn grid(&self) -> &'a TerrainGrid {
        self.grid
    }

    #[inline]
    pub fn scale(&self) -> CellScale {
        self.scale
    }

    /// Ground distance of the move `a -> b`.
    ///
    /// Fails with [`Error::InvalidEdge`] unless `b` is one of the eight
    /// cells around `a`.
    pub fn distance(&self, a: Point, b: Point) -> Result<f64> {
        self.check_adjacent(a, b)?;
        Ok(self.step_length(a, b))
    }

    /// Slope of the move `a -> b` in degrees; positive when climbing.
    ///
    /// This is `atan((elev(b) - elev(a)) / d)`, the reverse of the drop-based
    /// `atan((elev(a) - elev(b)) / d)`, so a climb lowers
    /// [`effective_speed`](Self::effective_speed) and a descent raises it.
    pub fn slope_angle_degrees(&self, a: Point, b: Point) -> Result<f64> {
        self.check_adjacent(a, b)?;
        let from = self.grid.get(a)?;
        let to = self.grid.get(b)?;
        Ok(slope_degrees(
            from.elevation,
            to.elevation,
            self.step_length(a, b),
        ))
    }

    /// Speed achieved entering `b` from `a`.
    pub fn effective_speed(&self, a: Point, b: Point) -> Result<f64> {
        let slope = self.slope_angle_degrees(a, b)?;
        let speed = self.grid.get(b)?.speed;
        Ok(speed - speed * slope / 100.0)
    }

    /// Cost of the move `a -> b`, or `None` when the slope leaves no
    /// positive finite speed and the move must be skipped.
    ///
    /// Fails with [`Error::InvalidEdge`] when the cells are not adjacent or
    /// `b` cannot be entered at all.
    pub fn edge_cost(&self, a: Point, b: Point) -> Result<Option<f64>> {
        let speed = self.effective_speed(a, b)?;
        if !self.grid.is_traversable(b) {
            return Err(Error::InvalidEdge { from: a, to: b });
        }
        let cost = self.step_length(a, b) / speed;
        Ok((speed > 0.0 && cost.is_finite()).then_some(cost))
    }

    /// Unchecked variant of [`edge_cost`](Self::edge_cost) used inside the
    /// search loop, where neighbor enumeration already guarantees
    /// adjacency. Returns `None` for blocked moves and for moves whose speed
    /// is not positive or whose cost is not finite.
    #[inline]
    pub fn step(&self, a: Point, b: Point) -> Option<Step> {
        debug_assert!(a.is_adjacent(b), "step between non-adjacent {a} and {b}");
        let from = self.grid.cell(a)?;
        let to = self.grid.cell(b)?;
        if !to.class.is_traversable() {
            return None;
        }
        let distance = self.step_length(a, b);
        let slope = slope_degrees(from.elevation, to.elevation, distance);
        let speed = to.speed - to.speed * slope / 100.0;
        let cost = distance / speed;
        (speed > 0.0 && cost.is_finite()).then_some(Step { distance, cost })
    }

    #[inline]
    fn step_length(&self, a: Point, b: Point) -> f64 {
        match ((b.x - a.x).abs(), (b.y - a.y).abs()) {
            (1, 1) => self.scale.diagonal(),
            (1, 0) => self.scale.lon,
            _ => self.scale.lat,
        }
    }

    fn check_adjacent(&self, a: Point, b: Point) -> Result<()> {
        if a.is_adjacent(b) {
            Ok(())
        } else {
            Err(Error::InvalidEdge { from: a, to: b })
        }
    }
}

#[inline]
fn slope_degrees(from: f64, to: f64, distance: f64) -> f64 {
    ((to - from) / distance).atan().to_degrees()
}
