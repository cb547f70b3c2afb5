use log::debug;
use orienteer_core::{Point, Range, Result, TerrainClass, TerrainGrid};
use orienteer_paths::{Neighbors, PathRange, Pather};

use crate::config::SeasonConfig;
use crate::lake::{LakeEdge, lake_edges};
use crate::season::Season;

/// What one [`SeasonalTransformer::apply`] call did to the grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverlayReport {
    pub season: Season,
    /// Lake edges the floods started from. Zero for summer and fall.
    pub seeds: usize,
    /// Planned cell writes, duplicates across seeds included.
    pub writes: usize,
    /// Distinct cells reclassified.
    pub reclassified: usize,
}

impl OverlayReport {
    fn untouched(season: Season) -> Self {
        Self {
            season,
            seeds: 0,
            writes: 0,
            reclassified: 0,
        }
    }
}

/// 4-way moves across the lake.
struct Ice<'a> {
    grid: &'a TerrainGrid,
    nb: Neighbors,
}

impl Pather for Ice<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        self.nb.von_neumann_into(p, buf);
        buf.retain(|&n| self.grid.base_class_at(n) == Some(TerrainClass::Water));
    }
}

/// 4-way moves onto enterable dry land no more than `rise_limit` above the
/// lake edge.
struct Meltwater<'a> {
    grid: &'a TerrainGrid,
    nb: Neighbors,
    seed_elevation: f64,
    rise_limit: f64,
}

impl Pather for Meltwater<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        self.nb.von_neumann_into(p, buf);
        buf.retain(|&n| {
            let Some(cell) = self.grid.cell(n) else {
                return false;
            };
            let Some(class) = self.grid.base_class_at(n) else {
                return false;
            };
            class != TerrainClass::Water
                && class.is_traversable()
                && self.seed_elevation - cell.elevation > -self.rise_limit
        });
    }
}

/// Rewrites a [`TerrainGrid`] for a season.
///
/// Every plan is computed from the grid's base snapshot and only written
/// once complete, so the cells one seed reaches never depend on another
/// seed's writes. The flood-fill caches are kept between calls.
pub struct SeasonalTransformer {
    config: SeasonConfig,
    range: Option<PathRange>,
}

impl SeasonalTransformer {
    pub fn new(config: SeasonConfig) -> Self {
        Self {
            config,
            range: None,
        }
    }

    pub fn config(&self) -> &SeasonConfig {
        &self.config
    }

    /// Reset `grid`, then write the overlay of `season` into it.
    ///
    /// Overlays never compose: whatever an earlier call wrote is gone
    /// before the new season is planned. Fails if the grid's speed table
    /// has no entry for the overlay class.
    pub fn apply(&mut self, grid: &mut TerrainGrid, season: Season) -> Result<OverlayReport> {
        grid.reset();
        let Some(class) = season.overlay_class() else {
            return Ok(OverlayReport::untouched(season));
        };
        let speed = grid.speeds().speed(class)?;

        let mut cells = Vec::new();
        let seeds = self.plan(grid, season, &mut cells);
        let writes = cells.len();
        cells.sort_unstable();
        cells.dedup();
        for &p in &cells {
            grid.apply_overlay(p, class, speed)?;
        }

        debug!(
            "{season}: {seeds} lake edges, {writes} writes, {} cells now {class}",
            cells.len()
        );
        Ok(OverlayReport {
            season,
            seeds,
            writes,
            reclassified: cells.len(),
        })
    }

    /// Append the cells `season` reclassifies to `out`, without touching
    /// `grid`. A cell may be listed more than once. Returns the number of
    /// lake edges used as seeds.
    pub fn plan(&mut self, grid: &TerrainGrid, season: Season, out: &mut Vec<Point>) -> usize {
        match season {
            Season::Summer => 0,
            Season::Fall => {
                fallen_leaves(grid, out);
                0
            }
            Season::Winter => {
                let edges = lake_edges(grid);
                self.freeze(grid, &edges, out);
                edges.len()
            }
            Season::Spring => {
                let edges = lake_edges(grid);
                self.flood(grid, &edges, out);
                edges.len()
            }
        }
    }

    fn freeze(&mut self, grid: &TerrainGrid, edges: &[LakeEdge], out: &mut Vec<Point>) {
        let radius = self.config.winter_radius;
        let ice = Ice {
            grid,
            nb: Neighbors::new(grid.bounds()),
        };
        let range = self.range_for(grid.bounds());
        for edge in edges {
            range.bfs_within(&ice, edge.water, radius, out);
        }
    }

    fn flood(&mut self, grid: &TerrainGrid, edges: &[LakeEdge], out: &mut Vec<Point>) {
        let SeasonConfig {
            spring_radius: radius,
            spring_rise_limit: rise_limit,
            ..
        } = self.config;
        let nb = Neighbors::new(grid.bounds());
        let range = self.range_for(grid.bounds());
        let mut reached = Vec::new();
        for edge in edges {
            let Some(seed_elevation) = grid.elevation_at(edge.water) else {
                continue;
            };
            let melt = Meltwater {
                grid,
                nb,
                seed_elevation,
                rise_limit,
            };
            reached.clear();
            range.bfs_within(&melt, edge.water, radius, &mut reached);
            // The lake cell itself stays water.
            out.extend(reached.iter().skip(1));
        }
    }

    fn range_for(&mut self, bounds: Range) -> &mut PathRange {
        if self.range.as_ref().map(PathRange::range) != Some(bounds) {
            self.range = Some(PathRange::new(bounds));
        }
        self.range.get_or_insert_with(|| PathRange::new(bounds))
    }
}

impl Default for SeasonalTransformer {
    fn default() -> Self {
        Self::new(SeasonConfig::default())
    }
}

/// Every enterable non-forest cell touching easy forest.
fn fallen_leaves(grid: &TerrainGrid, out: &mut Vec<Point>) {
    let nb = Neighbors::new(grid.bounds());
    let is_forest = |p: Point| grid.base_class_at(p) == Some(TerrainClass::EasyForest);
    let is_open = |p: Point| grid.base_class_at(p).is_some_and(TerrainClass::is_traversable);
    let mut buf = Vec::with_capacity(8);
    for p in grid.bounds() {
        if !is_forest(p) {
            continue;
        }
        buf.clear();
        nb.moore_into(p, &mut buf);
        out.extend(buf.iter().copied().filter(|&n| !is_forest(n) && is_open(n)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orienteer_core::{ConfigError, Error, SpeedTable, TerrainCell};
    use orienteer_paths::chebyshev;
    use rand::{RngExt, SeedableRng};

    /// Parse a map: `~` water, `F` easy forest, `#` out of bounds, `X`
    /// impassable vegetation, `.` open land. Elevations come from `elev`.
    fn map(rows: &[&str], elev: impl Fn(Point) -> f64) -> TerrainGrid {
        let h = rows.len() as i32;
        let w = rows[0].len() as i32;
        let mut classes = Vec::new();
        let mut elevations = Vec::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                classes.push(match c {
                    '~' => TerrainClass::Water,
                    'F' => TerrainClass::EasyForest,
                    '#' => TerrainClass::OutOfBounds,
                    'X' => TerrainClass::ImpassableVegetation,
                    _ => TerrainClass::OpenLand,
                });
                elevations.push(elev(Point::new(x as i32, y as i32)));
            }
        }
        TerrainGrid::new(w, h, classes, elevations, SpeedTable::default()).unwrap()
    }

    fn flat(rows: &[&str]) -> TerrainGrid {
        map(rows, |_| 0.0)
    }

    fn snapshot(grid: &TerrainGrid) -> Vec<TerrainCell> {
        grid.iter().map(|(_, c)| *c).collect()
    }

    fn cells_of(grid: &TerrainGrid, class: TerrainClass) -> Vec<Point> {
        grid.iter()
            .filter(|(_, c)| c.class == class)
            .map(|(p, _)| p)
            .collect()
    }

    #[test]
    fn summer_only_resets() {
        let mut g = flat(&["~~..", "~~.."]);
        g.apply_overlay(Point::new(3, 1), TerrainClass::Flooded, 0.14)
            .unwrap();
        let report = SeasonalTransformer::default()
            .apply(&mut g, Season::Summer)
            .unwrap();
        assert_eq!(report, OverlayReport::untouched(Season::Summer));
        assert!(g.is_pristine());
        assert_eq!(g.class_at(Point::new(3, 1)), Some(TerrainClass::OpenLand));
    }

    #[test]
    fn fall_rings_the_forest() {
        let mut g = flat(&[
            ".....", //
            ".FF~.",
            ".....",
            "....F",
        ]);
        let report = SeasonalTransformer::default()
            .apply(&mut g, Season::Fall)
            .unwrap();
        assert_eq!(report.seeds, 0);
        let leaves = cells_of(&g, TerrainClass::LeafCovered);
        assert_eq!(report.reclassified, leaves.len());
        // Ring around the pair, water included, plus three cells around the
        // corner tree.
        assert_eq!(leaves.len(), 10 + 3 - 1);
        assert!(leaves.contains(&Point::new(3, 1)));
        assert!(leaves.contains(&Point::new(3, 2)));
        assert_eq!(cells_of(&g, TerrainClass::EasyForest).len(), 3);
        assert!(report.writes > report.reclassified);
        let speed = g.speed_at(Point::new(0, 0)).unwrap();
        assert_eq!(speed, TerrainClass::LeafCovered.default_speed());
    }

    #[test]
    fn winter_freezes_within_radius_only() {
        // A long lake whose only edge cells are at the west end.
        let row_edge = "..~~~~~~~~~~~~~~~~~~";
        let row_mid = "..~~~~~~~~~~~~~~~~~~";
        let mut g = flat(&[row_edge, row_mid, row_edge]);
        let mut t = SeasonalTransformer::default();
        let edges = lake_edges(&g);
        let report = t.apply(&mut g, Season::Winter).unwrap();
        assert_eq!(report.seeds, edges.len());

        let frozen = cells_of(&g, TerrainClass::FrozenWater);
        assert!(!frozen.is_empty());
        for p in &frozen {
            assert!(edges.iter().any(|e| chebyshev(e.water, *p) < 7));
        }
        // Every edge sits in x = 2, so ice stops short of x = 9.
        assert!(frozen.iter().all(|p| p.x < 9));
        assert_eq!(g.class_at(Point::new(8, 1)), Some(TerrainClass::FrozenWater));
        assert_eq!(g.class_at(Point::new(9, 1)), Some(TerrainClass::Water));
        assert_eq!(cells_of(&g, TerrainClass::OpenLand).len(), 6);
    }

    #[test]
    fn winter_radius_is_configurable() {
        let mut g = flat(&["..~~~~~~", "..~~~~~~"]);
        let cfg = SeasonConfig {
            winter_radius: 2,
            ..SeasonConfig::default()
        };
        SeasonalTransformer::new(cfg)
            .apply(&mut g, Season::Winter)
            .unwrap();
        let frozen = cells_of(&g, TerrainClass::FrozenWater);
        assert!(frozen.iter().all(|p| p.x <= 3));
        assert_eq!(frozen.len(), 4);
    }

    #[test]
    fn spring_respects_the_rise_limit() {
        // Land to the east climbs 0.4 per column from the lake.
        let rows = ["~~............", "~~............", "~~............"];
        let mut g = map(&rows, |p| if p.x < 2 { 0.0 } else { 0.4 * (p.x - 1) as f64 });
        let report = SeasonalTransformer::default()
            .apply(&mut g, Season::Spring)
            .unwrap();
        assert_eq!(report.seeds, 3);

        let flooded = cells_of(&g, TerrainClass::Flooded);
        // Columns 2 (0.4) and 3 (0.8) are below the limit; column 4 (1.2) is not.
        assert_eq!(flooded.len(), 6);
        assert!(flooded.iter().all(|p| p.x == 2 || p.x == 3));
        // The lake itself never floods.
        assert_eq!(cells_of(&g, TerrainClass::Water).len(), 6);
    }

    #[test]
    fn spring_stops_at_the_radius_and_the_map_edge() {
        let mut row = String::from("~");
        row.push_str(&".".repeat(20));
        row.push('#');
        let rows = [row.as_str(), row.as_str()];
        let mut g = map(&rows, |p| -(p.x as f64));
        SeasonalTransformer::default()
            .apply(&mut g, Season::Spring)
            .unwrap();
        let flooded = cells_of(&g, TerrainClass::Flooded);
        assert!(flooded.iter().all(|p| p.x < 15));
        assert_eq!(flooded.len(), 2 * 14);
        assert_eq!(g.class_at(Point::new(21, 0)), Some(TerrainClass::OutOfBounds));
    }

    #[test]
    fn seasons_do_not_compose() {
        let mut g = flat(&[
            "......", //
            ".~~~~.",
            ".~~~~.",
            "......",
        ]);
        let pristine = snapshot(&g);
        let mut t = SeasonalTransformer::default();
        t.apply(&mut g, Season::Winter).unwrap();
        assert!(!cells_of(&g, TerrainClass::FrozenWater).is_empty());
        t.apply(&mut g, Season::Spring).unwrap();
        assert!(cells_of(&g, TerrainClass::FrozenWater).is_empty());
        assert!(!cells_of(&g, TerrainClass::Flooded).is_empty());
        g.reset();
        assert_eq!(snapshot(&g), pristine);
    }

    #[test]
    fn missing_overlay_speed_is_a_config_error() {
        let speeds = SpeedTable::empty()
            .with(TerrainClass::Water, 0.0)
            .unwrap()
            .with(TerrainClass::OpenLand, 1.0)
            .unwrap();
        let mut g = TerrainGrid::new(
            2,
            1,
            vec![TerrainClass::Water, TerrainClass::OpenLand],
            vec![0.0, 0.0],
            speeds,
        )
        .unwrap();
        let err = SeasonalTransformer::default()
            .apply(&mut g, Season::Winter)
            .unwrap_err();
        assert_eq!(
            err,
            Error::Config(ConfigError::MissingSpeed(TerrainClass::FrozenWater))
        );
        assert!(g.is_pristine());
    }

    #[test]
    fn plan_leaves_the_grid_alone() {
        let g = flat(&["F..", "~~."]);
        let mut out = Vec::new();
        let mut t = SeasonalTransformer::default();
        assert_eq!(t.plan(&g, Season::Fall, &mut out), 0);
        assert_eq!(out.len(), 3);
        assert_eq!(t.plan(&g, Season::Winter, &mut out), 2);
        assert!(g.is_pristine());
    }

    #[test]
    fn fall_leaves_blocked_cells_alone() {
        let mut g = flat(&[
            "#F..", //
            "XF..",
            "....",
        ]);
        SeasonalTransformer::default()
            .apply(&mut g, Season::Fall)
            .unwrap();
        assert_eq!(g.class_at(Point::new(0, 0)), Some(TerrainClass::OutOfBounds));
        assert_eq!(
            g.class_at(Point::new(0, 1)),
            Some(TerrainClass::ImpassableVegetation)
        );
        assert!(!g.is_traversable(Point::new(0, 0)));
        assert!(!g.is_traversable(Point::new(0, 1)));
        assert_eq!(
            cells_of(&g, TerrainClass::LeafCovered),
            vec![
                Point::new(2, 0),
                Point::new(2, 1),
                Point::new(0, 2),
                Point::new(1, 2),
                Point::new(2, 2)
            ]
        );
    }

    #[test]
    fn winter_leaves_blocked_cells_alone() {
        let mut g = flat(&[
            "~~X.", //
            "~~#.",
        ]);
        SeasonalTransformer::default()
            .apply(&mut g, Season::Winter)
            .unwrap();
        assert_eq!(cells_of(&g, TerrainClass::FrozenWater).len(), 4);
        assert!(!g.is_traversable(Point::new(2, 0)));
        assert!(!g.is_traversable(Point::new(2, 1)));
    }

    #[test]
    fn spring_leaves_blocked_cells_alone() {
        let mut g = flat(&[
            "~X..", //
            "~..#",
        ]);
        SeasonalTransformer::default()
            .apply(&mut g, Season::Spring)
            .unwrap();
        assert_eq!(
            cells_of(&g, TerrainClass::Flooded),
            vec![
                Point::new(2, 0),
                Point::new(3, 0),
                Point::new(1, 1),
                Point::new(2, 1)
            ]
        );
        assert_eq!(
            g.class_at(Point::new(1, 0)),
            Some(TerrainClass::ImpassableVegetation)
        );
        assert_eq!(g.class_at(Point::new(3, 1)), Some(TerrainClass::OutOfBounds));
    }

    #[test]
    fn random_terrain_keeps_overlay_bounds() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let cfg = SeasonConfig::default();
        let mut t = SeasonalTransformer::new(cfg);
        for _ in 0..8 {
            let (w, h) = (rng.random_range(10..40), rng.random_range(10..40));
            let len = (w * h) as usize;
            let classes: Vec<_> = (0..len)
                .map(|_| match rng.random_range(0..8u32) {
                    0..=2 => TerrainClass::Water,
                    3 | 4 => TerrainClass::EasyForest,
                    5 => TerrainClass::ImpassableVegetation,
                    6 => TerrainClass::OutOfBounds,
                    _ => TerrainClass::OpenLand,
                })
                .collect();
            let elevations: Vec<f64> = (0..len).map(|_| rng.random_range(0.0..4.0)).collect();
            let mut g =
                TerrainGrid::new(w, h, classes, elevations, SpeedTable::default()).unwrap();
            let pristine = snapshot(&g);
            let edges = lake_edges(&g);
            let blocked: Vec<_> = g
                .iter()
                .filter(|(_, c)| !c.class.is_traversable())
                .map(|(p, _)| p)
                .collect();
            let still_blocked = |g: &TerrainGrid| blocked.iter().all(|&p| !g.is_traversable(p));

            t.apply(&mut g, Season::Fall).unwrap();
            assert!(still_blocked(&g));

            t.apply(&mut g, Season::Winter).unwrap();
            assert!(still_blocked(&g));
            for p in cells_of(&g, TerrainClass::FrozenWater) {
                assert_eq!(g.base_class_at(p), Some(TerrainClass::Water));
                assert!(
                    edges
                        .iter()
                        .any(|e| chebyshev(e.water, p) < cfg.winter_radius)
                );
            }

            t.apply(&mut g, Season::Spring).unwrap();
            assert!(still_blocked(&g));
            for p in cells_of(&g, TerrainClass::Flooded) {
                let elev = g.elevation_at(p).unwrap();
                assert!(edges.iter().any(|e| {
                    chebyshev(e.water, p) < cfg.spring_radius
                        && g.elevation_at(e.water).unwrap() - elev > -cfg.spring_rise_limit
                }));
            }

            g.reset();
            assert_eq!(snapshot(&g), pristine);
        }
    }
}
