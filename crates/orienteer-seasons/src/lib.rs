//! Seasonal overlays for orienteering terrain.
//!
//! Each [`Season`] but summer rewrites part of a
//! [`TerrainGrid`](orienteer_core::TerrainGrid) before routes are planned:
//!
//! - **Fall** covers every cell bordering easy forest with leaves.
//! - **Winter** freezes lake water near the shore.
//! - **Spring** floods low land around the lakes.
//!
//! Winter and spring grow from [lake edges](lake_edges) with the bounded
//! flood fill of [`orienteer_paths::PathRange`]. A [`SeasonalTransformer`]
//! resets the grid before every season, so overlays never stack.

mod config;
mod lake;
mod season;
mod transformer;

pub use config::SeasonConfig;
pub use lake::{LakeEdge, lake_edges};
pub use season::Season;
pub use transformer::{OverlayReport, SeasonalTransformer};
