//! Plan orienteering routes across a park in every season.
//!
//! An [`Expedition`] owns one terrain grid and plans a set of
//! [`NamedRoute`]s through it four times: once per [`Season`], after the
//! season's overlay has rewritten the terrain. Results come back as one
//! [`SeasonReport`] per season, and an [`ExpeditionObserver`] sees every
//! overlaid grid and every planned route as it happens.
//!
//! ```
//! use orienteer::{Expedition, ExpeditionConfig, NamedRoute, NoOpObserver, TerrainClass, loader};
//!
//! let config = ExpeditionConfig::default();
//! let elevations = loader::parse_elevations("0 0 0\n0 1 0\n0 0 0\n", 3, 3).unwrap();
//! let grid = config
//!     .grid(3, 3, vec![TerrainClass::OpenLand; 9], elevations)
//!     .unwrap();
//! let route = NamedRoute::parse("loop", "0 0\n2 2\n0 2\n").unwrap();
//!
//! let mut expedition = Expedition::new(grid, config);
//! let reports = expedition.run(&[route], &mut NoOpObserver);
//! assert_eq!(reports.len(), 4);
//! assert!(reports.iter().all(|r| r.failures() == 0));
//! ```

mod config;
mod expedition;
pub mod loader;

pub use config::ExpeditionConfig;
pub use expedition::{
    Expedition, ExpeditionObserver, NamedRoute, NoOpObserver, RouteOutcome, SeasonReport,
};
pub use orienteer_core::{
    ConfigError, Error, Point, Result, SpeedTable, TerrainClass, TerrainGrid,
};
pub use orienteer_paths::{CellScale, Heuristic, Leg, Route};
pub use orienteer_seasons::{OverlayReport, Season, SeasonConfig};
