//! **orienteer-core** — terrain data model for seasonal route planning.
//!
//! This crate provides the types every other orienteer crate builds on:
//! integer geometry, the terrain legend with its speed table, the
//! restorable [`TerrainGrid`] raster, and the shared error taxonomy.

pub mod error;
pub mod geom;
pub mod terrain;
pub mod terrain_grid;

pub use error::{ConfigError, Error, Result};
pub use geom::{Point, Range};
pub use terrain::{MAX_SPEED, SpeedTable, TerrainClass};
pub use terrain_grid::{TerrainCell, TerrainGrid};
