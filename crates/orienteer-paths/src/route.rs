//! Chaining A* legs through an ordered list of waypoints.

use log::debug;
use orienteer_core::{Point, Result};

use crate::PathRange;
use crate::astar::Leg;
use crate::traits::AstarPather;

/// A planned route through every waypoint, in order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub waypoints: Vec<Point>,
    /// One leg per consecutive waypoint pair.
    pub legs: Vec<Leg>,
    /// Sum of the leg distances, in meters.
    pub distance: f64,
}

impl Route {
    /// Every cell of the route, starting at the first waypoint.
    pub fn path(&self) -> Vec<Point> {
        let mut path: Vec<Point> = self.waypoints.first().copied().into_iter().collect();
        for leg in &self.legs {
            path.extend_from_slice(&leg.path);
        }
        path
    }

    /// Sum of the leg search costs.
    pub fn cost(&self) -> f64 {
        self.legs.iter().map(|l| l.cost).sum()
    }

    /// Total nodes expanded across all legs.
    pub fn expanded(&self) -> usize {
        self.legs.iter().map(|l| l.expanded).sum()
    }
}

/// Plans a route leg by leg with a shared [`PathRange`].
pub struct RouteComposer<'a, P> {
    range: &'a mut PathRange,
    pather: &'a P,
}

impl<'a, P: AstarPather> RouteComposer<'a, P> {
    pub fn new(range: &'a mut PathRange, pather: &'a P) -> Self {
        Self { range, pather }
    }

    /// Plan a route through `waypoints`.
    ///
    /// Every waypoint is checked against the grid before any search runs.
    /// An `n`-waypoint route runs exactly `n - 1` searches; the first leg
    /// that fails fails the whole route.
    pub fn compose(&mut self, waypoints: &[Point]) -> Result<Route> {
        for &w in waypoints {
            self.range.checked_idx(w)?;
        }

        let mut route = Route {
            waypoints: waypoints.to_vec(),
            legs: Vec::with_capacity(waypoints.len().saturating_sub(1)),
            distance: 0.0,
        };
        for pair in waypoints.windows(2) {
            let leg = self.range.astar_path(self.pather, pair[0], pair[1])?;
            debug!(
                "leg {} -> {}: {:.1} m, {} cells, {} expanded",
                pair[0],
                pair[1],
                leg.distance,
                leg.path.len(),
                leg.expanded
            );
            route.distance += leg.distance;
            route.legs.push(leg);
        }
        Ok(route)
    }
}
