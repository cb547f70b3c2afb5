/// Tunables of the winter and spring floods.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SeasonConfig {
    /// Exclusive Chebyshev reach of the ice around each lake edge.
    pub winter_radius: i32,
    /// Exclusive Chebyshev reach of the flood around each lake edge.
    pub spring_radius: i32,
    /// How far above its lake edge a cell may sit and still flood.
    pub spring_rise_limit: f64,
}

impl Default for SeasonConfig {
    fn default() -> Self {
        Self {
            winter_radius: 7,
            spring_radius: 15,
            spring_rise_limit: 1.0,
        }
    }
}
