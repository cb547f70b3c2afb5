//! Error taxonomy shared by every orienteer crate.

use crate::geom::Point;
use crate::terrain::TerrainClass;

/// Convenience alias used throughout the workspace.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Problems with the data or tables a grid is built from.
///
/// These are fatal for the route or season that hit them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("grid size {width}x{height} is not positive")]
    InvalidSize { width: i32, height: i32 },

    #[error("{what}: expected {expected} values, got {got}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("no speed configured for terrain class {0}")]
    MissingSpeed(TerrainClass),

    #[error("speed {speed} for terrain class {class} is outside [0, 1.5]")]
    SpeedOutOfRange { class: TerrainClass, speed: f64 },

    #[error("elevation {value} at {point} is not finite")]
    NonFiniteElevation { point: Point, value: f64 },

    #[error("color #{r:02x}{g:02x}{b:02x} does not map to a terrain class")]
    UnknownColor { r: u8, g: u8, b: u8 },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
}

/// Errors reported by grid queries, searches and route planning.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{point} is outside the {width}x{height} grid")]
    OutOfBounds { point: Point, width: i32, height: i32 },

    #[error("no path from {from} to {to}")]
    NoPath { from: Point, to: Point },

    /// A cost was requested for a pair of cells that do not form a legal
    /// step. The planner never produces one.
    #[error("invalid edge {from} -> {to}")]
    InvalidEdge { from: Point, to: Point },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let e = Error::OutOfBounds {
            point: Point::new(400, 3),
            width: 395,
            height: 500,
        };
        assert_eq!(e.to_string(), "(400, 3) is outside the 395x500 grid");

        let e: Error = ConfigError::UnknownColor {
            r: 0xcd,
            g: 0x00,
            b: 0x65,
        }
        .into();
        assert_eq!(
            e.to_string(),
            "configuration error: color #cd0065 does not map to a terrain class"
        );
    }
}
