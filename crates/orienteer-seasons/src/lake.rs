//! Lake-edge detection: the seeds of the winter and spring floods.

use orienteer_core::{Point, TerrainClass, TerrainGrid};
use orienteer_paths::Neighbors;

/// A water cell touching land.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LakeEdge {
    /// The water cell.
    pub water: Point,
    /// Its first non-water Moore neighbor.
    pub shore: Point,
}

/// Find every lake edge with one row-major scan of the grid.
///
/// Classification is read from the grid's base snapshot, so the result does
/// not depend on any overlay currently applied. Each qualifying water cell
/// yields exactly one edge, paired with the first non-water neighbor in
/// [`Neighbors::moore_into`] order.
pub fn lake_edges(grid: &TerrainGrid) -> Vec<LakeEdge> {
    let nb = Neighbors::new(grid.bounds());
    let is_water = |p: Point| grid.base_class_at(p) == Some(TerrainClass::Water);
    let mut buf = Vec::with_capacity(8);
    let mut edges = Vec::new();

    for water in grid.bounds() {
        if !is_water(water) {
            continue;
        }
        buf.clear();
        nb.moore_into(water, &mut buf);
        if let Some(&shore) = buf.iter().find(|&&n| !is_water(n)) {
            edges.push(LakeEdge { water, shore });
        }
    }
    edges
}
