//! Text formats for elevation rasters and waypoint lists.

use orienteer_core::{ConfigError, Point};

/// Parse a whitespace-separated elevation raster, one row per line.
///
/// The first `height` non-blank lines are read; each must hold at least
/// `width` values, and any extra trailing columns are ignored. Rows past
/// `height` are ignored as well. NaN and infinite values are rejected.
/// Values come back row-major, ready for
/// [`TerrainGrid::new`](orienteer_core::TerrainGrid::new).
pub fn parse_elevations(text: &str, width: i32, height: i32) -> Result<Vec<f64>, ConfigError> {
    if width <= 0 || height <= 0 {
        return Err(ConfigError::InvalidSize { width, height });
    }
    let (w, h) = (width as usize, height as usize);
    let mut values = Vec::with_capacity(w * h);
    let mut rows = 0;

    for (i, line) in text.lines().enumerate() {
        if rows == h {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }
        let before = values.len();
        for token in line.split_whitespace().take(w) {
            let v = token.parse::<f64>().map_err(|e| ConfigError::Parse {
                line: i + 1,
                message: format!("bad elevation {token:?}: {e}"),
            })?;
            if !v.is_finite() {
                return Err(ConfigError::Parse {
                    line: i + 1,
                    message: format!("elevation {token:?} is not finite"),
                });
            }
            values.push(v);
        }
        let got = values.len() - before;
        if got < w {
            return Err(ConfigError::Parse {
                line: i + 1,
                message: format!("expected {w} elevations, found {got}"),
            });
        }
        rows += 1;
    }

    if rows < h {
        return Err(ConfigError::DimensionMismatch {
            what: "elevation rows",
            expected: h,
            got: rows,
        });
    }
    Ok(values)
}

/// Parse a waypoint list: one `x y` pair per line, blank lines skipped.
///
/// Points are not checked against any grid here; route planning rejects
/// the ones that fall outside.
pub fn parse_waypoints(text: &str) -> Result<Vec<Point>, ConfigError> {
    let mut points = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let mut fields = line.split_whitespace();
        let Some(x) = fields.next() else {
            continue;
        };
        let parse_err = |message: String| ConfigError::Parse {
            line: i + 1,
            message,
        };
        let (Some(y), None) = (fields.next(), fields.next()) else {
            return Err(parse_err(format!("expected \"x y\", found {:?}", line.trim())));
        };
        let coord = |s: &str| {
            s.parse::<i32>()
                .map_err(|e| parse_err(format!("bad coordinate {s:?}: {e}")))
        };
        points.push(Point::new(coord(x)?, coord(y)?));
    }
    Ok(points)
}
