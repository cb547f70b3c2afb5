use orienteer_core::{Result, SpeedTable, TerrainClass, TerrainGrid};
use orienteer_paths::{CellScale, Heuristic};
use orienteer_seasons::SeasonConfig;

/// Every tunable of an [`Expedition`](crate::Expedition).
///
/// The defaults reproduce the reference park survey: 10.29 m × 7.55 m
/// cells, the standard legend speeds, ice 7 cells and floods 15 cells out
/// from the shore.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExpeditionConfig {
    pub scale: CellScale,
    pub heuristic: Heuristic,
    pub seasons: SeasonConfig,
    pub speeds: SpeedTable,
}

impl ExpeditionConfig {
    /// Build a grid from row-major rasters using the configured speeds.
    pub fn grid(
        &self,
        width: i32,
        height: i32,
        classes: Vec<TerrainClass>,
        elevations: Vec<f64>,
    ) -> Result<TerrainGrid> {
        TerrainGrid::new(width, height, classes, elevations, self.speeds.clone())
    }

    /// Build a grid from a decoded legend image using the configured speeds.
    pub fn grid_from_rgb(
        &self,
        width: i32,
        height: i32,
        pixels: &[[u8; 3]],
        elevations: Vec<f64>,
    ) -> Result<TerrainGrid> {
        TerrainGrid::from_rgb(width, height, pixels, elevations, self.speeds.clone())
    }
}
