//! Terrain-aware route search.
//!
//! This crate turns a [`TerrainGrid`](orienteer_core::TerrainGrid) into
//! routes:
//!
//! - **Cost model** pricing single moves by distance, slope and terrain
//!   speed ([`CostModel`])
//! - **A\*** cheapest-path search between two points ([`PathRange::astar_path`])
//! - **Bounded BFS** floods used by the seasonal overlays ([`PathRange::bfs_within`])
//! - **Route composition** through an ordered waypoint list ([`RouteComposer`])
//!
//! All searches run through [`PathRange`], which owns and reuses internal
//! caches so that repeated queries incur no allocations after warm-up.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | bounded BFS |
//! | [`WeightedPather`] : [`Pather`] | move pricing |
//! | [`AstarPather`] : [`WeightedPather`] | A* |

mod astar;
mod bfs;
mod cost;
mod distance;
mod neighbors;
mod pather;
mod pathrange;
mod route;
mod traits;

pub use astar::Leg;
pub use cost::{CellScale, CostModel, MAX_DESCENT_GAIN};
pub use distance::chebyshev;
pub use neighbors::Neighbors;
pub use pather::{Heuristic, TerrainPather};
pub use pathrange::PathRange;
pub use route::{Route, RouteComposer};
pub use traits::{AstarPather, Pather, Step, WeightedPather};
