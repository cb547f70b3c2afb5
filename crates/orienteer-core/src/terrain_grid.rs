//! The terrain raster searched by the planner and rewritten by the seasons.
//!
//! [`TerrainGrid`] owns one mutable cell buffer plus an immutable snapshot of
//! the cells it was built with. Seasonal overlays write into the buffer
//! through [`TerrainGrid::apply_overlay`]; [`TerrainGrid::reset`] copies the
//! snapshot back.

use crate::error::{ConfigError, Error, Result};
use crate::geom::{Point, Range};
use crate::terrain::{SpeedTable, TerrainClass};

/// One raster cell.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainCell {
    /// Height above sea level, in meters.
    pub elevation: f64,
    pub class: TerrainClass,
    /// Base speed factor, in `[0, 1.5]`.
    pub speed: f64,
}

/// A fixed-size terrain raster with a restorable base snapshot.
#[derive(Clone, Debug)]
pub struct TerrainGrid {
    bounds: Range,
    cells: Vec<TerrainCell>,
    base: Box<[TerrainCell]>,
    speeds: SpeedTable,
    overlays: usize,
}

impl TerrainGrid {
    /// Build a grid from row-major class and elevation rasters.
    ///
    /// Fails with a [`ConfigError`] when the size is not positive, when
    /// either raster does not hold exactly `width * height` values, when an
    /// elevation is NaN or infinite, or when a class present in the raster
    /// has no entry in `speeds`.
    pub fn new(
        width: i32,
        height: i32,
        classes: Vec<TerrainClass>,
        elevations: Vec<f64>,
        speeds: SpeedTable,
    ) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(ConfigError::InvalidSize { width, height }.into());
        }
        let len = (width as usize) * (height as usize);
        if classes.len() != len {
            return Err(ConfigError::DimensionMismatch {
                what: "terrain classes",
                expected: len,
                got: classes.len(),
            }
            .into());
        }
        if elevations.len() != len {
            return Err(ConfigError::DimensionMismatch {
                what: "elevations",
                expected: len,
                got: elevations.len(),
            }
            .into());
        }
        if let Some(i) = elevations.iter().position(|e| !e.is_finite()) {
            let w = width as usize;
            return Err(ConfigError::NonFiniteElevation {
                point: Point::new((i % w) as i32, (i / w) as i32),
                value: elevations[i],
            }
            .into());
        }
        speeds.validate()?;

        let cells = classes
            .into_iter()
            .zip(elevations)
            .map(|(class, elevation)| {
                Ok(TerrainCell {
                    elevation,
                    class,
                    speed: speeds.speed(class)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(Self {
            bounds: Range::new(0, 0, width, height),
            base: cells.clone().into_boxed_slice(),
            cells,
            speeds,
            overlays: 0,
        })
    }

    /// Build a grid from a decoded legend-colored raster.
    pub fn from_rgb(
        width: i32,
        height: i32,
        pixels: &[[u8; 3]],
        elevations: Vec<f64>,
        speeds: SpeedTable,
    ) -> Result<Self> {
        let classes = pixels
            .iter()
            .map(|&rgb| TerrainClass::from_rgb(rgb))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(width, height, classes, elevations, speeds)
    }

    /// A grid where every cell has the same class and elevation.
    pub fn uniform(
        width: i32,
        height: i32,
        class: TerrainClass,
        elevation: f64,
        speeds: SpeedTable,
    ) -> Result<Self> {
        let len = (width.max(0) as usize) * (height.max(0) as usize);
        Self::new(
            width,
            height,
            vec![class; len],
            vec![elevation; len],
            speeds,
        )
    }

    // -----------------------------------------------------------------------
    // Geometry
    // -----------------------------------------------------------------------

    /// The rectangle `[0, width) × [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: construction rejects empty grids.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    /// Flat row-major index of `p`, or `None` outside the grid.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(p.y as usize * self.width() as usize + p.x as usize)
    }

    /// Point for a flat row-major index.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let w = self.width() as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    fn out_of_bounds(&self, point: Point) -> Error {
        Error::OutOfBounds {
            point,
            width: self.width(),
            height: self.height(),
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The cell at `p`.
    pub fn get(&self, p: Point) -> Result<TerrainCell> {
        self.cell(p).copied().ok_or_else(|| self.out_of_bounds(p))
    }

    /// The cell at `p`, or `None` outside the grid.
    #[inline]
    pub fn cell(&self, p: Point) -> Option<&TerrainCell> {
        self.index(p).map(|i| &self.cells[i])
    }

    #[inline]
    pub fn class_at(&self, p: Point) -> Option<TerrainClass> {
        self.cell(p).map(|c| c.class)
    }

    #[inline]
    pub fn elevation_at(&self, p: Point) -> Option<f64> {
        self.cell(p).map(|c| c.elevation)
    }

    #[inline]
    pub fn speed_at(&self, p: Point) -> Option<f64> {
        self.cell(p).map(|c| c.speed)
    }

    /// Class at `p` as captured at construction, ignoring overlays.
    #[inline]
    pub fn base_class_at(&self, p: Point) -> Option<TerrainClass> {
        self.index(p).map(|i| self.base[i].class)
    }

    /// Whether a route may enter `p`. Points outside the grid never are.
    #[inline]
    pub fn is_traversable(&self, p: Point) -> bool {
        self.cell(p).is_some_and(|c| c.class.is_traversable())
    }

    /// The speed table the grid was built with.
    pub fn speeds(&self) -> &SpeedTable {
        &self.speeds
    }

    /// Iterate over `(Point, &TerrainCell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &TerrainCell)> + '_ {
        self.bounds.iter().zip(self.cells.iter())
    }

    /// Current class raster, row-major.
    pub fn classes(&self) -> Vec<TerrainClass> {
        self.cells.iter().map(|c| c.class).collect()
    }

    /// Current class raster rendered with the legend colors, row-major.
    pub fn to_rgb(&self) -> Vec<[u8; 3]> {
        self.cells.iter().map(|c| c.class.rgb()).collect()
    }

    // -----------------------------------------------------------------------
    // Overlay state
    // -----------------------------------------------------------------------

    /// Reclassify `p`. The only way cells change after construction.
    pub fn apply_overlay(&mut self, p: Point, class: TerrainClass, speed: f64) -> Result<()> {
        let i = self.index(p).ok_or_else(|| self.out_of_bounds(p))?;
        let cell = &mut self.cells[i];
        cell.class = class;
        cell.speed = speed;
        self.overlays += 1;
        Ok(())
    }

    /// Restore every cell to the construction-time snapshot.
    pub fn reset(&mut self) {
        self.cells.copy_from_slice(&self.base);
        self.overlays = 0;
    }

    /// Number of overlay writes since construction or the last reset.
    pub fn overlay_count(&self) -> usize {
        self.overlays
    }

    /// Whether the grid is known to match its snapshot.
    pub fn is_pristine(&self) -> bool {
        self.overlays == 0
    }
}
