use std::fmt;

use orienteer_core::TerrainClass;

/// A season of the year. Each one but summer rewrites part of the map
/// before routes are planned.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Season {
    Summer,
    Fall,
    Winter,
    Spring,
}

impl Season {
    /// Every season, in the order they are planned.
    pub const ALL: [Season; 4] = [Season::Summer, Season::Fall, Season::Winter, Season::Spring];

    /// Class written by the season's overlay, if it has one.
    pub const fn overlay_class(self) -> Option<TerrainClass> {
        match self {
            Season::Summer => None,
            Season::Fall => Some(TerrainClass::LeafCovered),
            Season::Winter => Some(TerrainClass::FrozenWater),
            Season::Spring => Some(TerrainClass::Flooded),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Season::Summer => "summer",
            Season::Fall => "fall",
            Season::Winter => "winter",
            Season::Spring => "spring",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
