//! Terrain classes, their map colors, and the class → speed table.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::ConfigError;

/// Fastest speed factor any terrain class may carry.
pub const MAX_SPEED: f64 = 1.5;

/// Category of a terrain cell.
///
/// The first ten variants come from the base map legend. The last three are
/// seasonal overlay classes written by the season passes and removed again by
/// [`TerrainGrid::reset`](crate::TerrainGrid::reset).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TerrainClass {
    OpenLand,
    RoughMeadow,
    EasyForest,
    SlowRunForest,
    WalkForest,
    ImpassableVegetation,
    Water,
    PavedRoad,
    Footpath,
    OutOfBounds,
    /// Fall: trails next to easy forest buried under leaves.
    LeafCovered,
    /// Winter: ice close enough to the shore to walk on.
    FrozenWater,
    /// Spring: low ground swamped by rising lakes.
    Flooded,
}

impl TerrainClass {
    /// Every class, base legend first.
    pub const ALL: [TerrainClass; 13] = [
        TerrainClass::OpenLand,
        TerrainClass::RoughMeadow,
        TerrainClass::EasyForest,
        TerrainClass::SlowRunForest,
        TerrainClass::WalkForest,
        TerrainClass::ImpassableVegetation,
        TerrainClass::Water,
        TerrainClass::PavedRoad,
        TerrainClass::Footpath,
        TerrainClass::OutOfBounds,
        TerrainClass::LeafCovered,
        TerrainClass::FrozenWater,
        TerrainClass::Flooded,
    ];

    /// Map legend color.
    pub const fn rgb(self) -> [u8; 3] {
        match self {
            TerrainClass::OpenLand => [248, 148, 18],
            TerrainClass::RoughMeadow => [255, 192, 0],
            TerrainClass::EasyForest => [255, 255, 255],
            TerrainClass::SlowRunForest => [2, 208, 60],
            TerrainClass::WalkForest => [2, 136, 40],
            TerrainClass::ImpassableVegetation => [5, 73, 24],
            TerrainClass::Water => [0, 0, 255],
            TerrainClass::PavedRoad => [71, 51, 3],
            TerrainClass::Footpath => [0, 0, 0],
            TerrainClass::OutOfBounds => [205, 0, 101],
            TerrainClass::LeafCovered => [240, 128, 128],
            TerrainClass::FrozenWater => [92, 242, 237],
            TerrainClass::Flooded => [139, 101, 8],
        }
    }

    /// Look a legend color back up. Alpha, if any, must be stripped first.
    pub fn from_rgb(rgb: [u8; 3]) -> Result<TerrainClass, ConfigError> {
        Self::ALL
            .into_iter()
            .find(|c| c.rgb() == rgb)
            .ok_or(ConfigError::UnknownColor {
                r: rgb[0],
                g: rgb[1],
                b: rgb[2],
            })
    }

    /// Reference speed factor for the class.
    pub const fn default_speed(self) -> f64 {
        match self {
            TerrainClass::OpenLand => 1.2,
            TerrainClass::RoughMeadow => 0.45,
            TerrainClass::EasyForest => 0.85,
            TerrainClass::SlowRunForest => 0.65,
            TerrainClass::WalkForest => 0.55,
            TerrainClass::ImpassableVegetation => 0.0,
            TerrainClass::Water => 0.15,
            TerrainClass::PavedRoad => 1.5,
            TerrainClass::Footpath => 1.1,
            TerrainClass::OutOfBounds => 0.0,
            TerrainClass::LeafCovered => 0.4,
            TerrainClass::FrozenWater => 0.7,
            TerrainClass::Flooded => 0.2,
        }
    }

    /// Whether a route may enter a cell of this class.
    #[inline]
    pub const fn is_traversable(self) -> bool {
        !matches!(
            self,
            TerrainClass::OutOfBounds | TerrainClass::ImpassableVegetation
        )
    }

    /// Snake-case name.
    pub const fn name(self) -> &'static str {
        match self {
            TerrainClass::OpenLand => "open_land",
            TerrainClass::RoughMeadow => "rough_meadow",
            TerrainClass::EasyForest => "easy_forest",
            TerrainClass::SlowRunForest => "slow_run_forest",
            TerrainClass::WalkForest => "walk_forest",
            TerrainClass::ImpassableVegetation => "impassable_vegetation",
            TerrainClass::Water => "water",
            TerrainClass::PavedRoad => "paved_road",
            TerrainClass::Footpath => "footpath",
            TerrainClass::OutOfBounds => "out_of_bounds",
            TerrainClass::LeafCovered => "leaf_covered",
            TerrainClass::FrozenWater => "frozen_water",
            TerrainClass::Flooded => "flooded",
        }
    }
}

impl fmt::Display for TerrainClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// SpeedTable
// ---------------------------------------------------------------------------

/// Immutable terrain class → speed factor mapping.
///
/// Built once and handed to [`TerrainGrid::new`](crate::TerrainGrid::new).
/// The default table carries the reference speed of every class.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SpeedTable {
    speeds: BTreeMap<TerrainClass, f64>,
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self {
            speeds: TerrainClass::ALL
                .into_iter()
                .map(|c| (c, c.default_speed()))
                .collect(),
        }
    }
}

impl SpeedTable {
    /// A table with no entries.
    pub fn empty() -> Self {
        Self {
            speeds: BTreeMap::new(),
        }
    }

    /// Return a copy of the table with `class` mapped to `speed`.
    pub fn with(mut self, class: TerrainClass, speed: f64) -> Result<Self, ConfigError> {
        check_speed(class, speed)?;
        self.speeds.insert(class, speed);
        Ok(self)
    }

    /// Speed for `class`, if configured.
    #[inline]
    pub fn get(&self, class: TerrainClass) -> Option<f64> {
        self.speeds.get(&class).copied()
    }

    /// Speed for `class`, failing when the table has no entry for it.
    pub fn speed(&self, class: TerrainClass) -> Result<f64, ConfigError> {
        self.get(class).ok_or(ConfigError::MissingSpeed(class))
    }

    /// Largest speed in the table (0 for an empty table).
    pub fn max_speed(&self) -> f64 {
        self.speeds.values().copied().fold(0.0, f64::max)
    }

    /// Check every entry lies in `[0, MAX_SPEED]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (&class, &speed) in &self.speeds {
            check_speed(class, speed)?;
        }
        Ok(())
    }

    /// Iterate over `(class, speed)` pairs in class order.
    pub fn iter(&self) -> impl Iterator<Item = (TerrainClass, f64)> + '_ {
        self.speeds.iter().map(|(&c, &s)| (c, s))
    }
}

fn check_speed(class: TerrainClass, speed: f64) -> Result<(), ConfigError> {
    if (0.0..=MAX_SPEED).contains(&speed) {
        Ok(())
    } else {
        Err(ConfigError::SpeedOutOfRange { class, speed })
    }
}
