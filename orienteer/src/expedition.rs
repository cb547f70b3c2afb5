use log::{info, warn};
use orienteer_core::{ConfigError, Error, Point, Result, TerrainGrid};
use orienteer_paths::{PathRange, Route, RouteComposer, TerrainPather};
use orienteer_seasons::{OverlayReport, Season, SeasonalTransformer};

use crate::config::ExpeditionConfig;
use crate::loader::parse_waypoints;

/// An ordered list of waypoints to plan in every season.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedRoute {
    pub name: String,
    pub waypoints: Vec<Point>,
}

impl NamedRoute {
    pub fn new(name: impl Into<String>, waypoints: Vec<Point>) -> Self {
        Self {
            name: name.into(),
            waypoints,
        }
    }

    /// Read the waypoints from text in the [`parse_waypoints`] format.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(name, parse_waypoints(text)?))
    }
}

/// The result of planning one route in one season.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteOutcome {
    pub name: String,
    pub result: Result<Route>,
}

/// Everything that happened during one season.
#[derive(Clone, Debug, PartialEq)]
pub struct SeasonReport {
    pub season: Season,
    /// The overlay, or the error that prevented it. No route is planned
    /// when this is an error.
    pub overlay: Result<OverlayReport>,
    /// One outcome per route, in the order the routes were given.
    pub routes: Vec<RouteOutcome>,
}

impl SeasonReport {
    /// The outcome for route `name`, if it was planned.
    pub fn route(&self, name: &str) -> Option<&Result<Route>> {
        self.routes
            .iter()
            .find(|r| r.name == name)
            .map(|r| &r.result)
    }

    /// Number of routes that could not be planned.
    pub fn failures(&self) -> usize {
        self.routes.iter().filter(|r| r.result.is_err()).count()
    }
}

/// Hooks called while an [`Expedition`] runs. Every method defaults to a
/// no-op; renderers and writers implement the ones they need.
pub trait ExpeditionObserver {
    /// The season's overlay is in place and routes are about to be planned.
    fn overlay_applied(&mut self, _season: Season, _grid: &TerrainGrid) {}
    fn route_planned(&mut self, _season: Season, _name: &str, _route: &Route) {}
    fn route_failed(&mut self, _season: Season, _name: &str, _error: &Error) {}
}

pub struct NoOpObserver;
impl ExpeditionObserver for NoOpObserver {}

/// Plans a set of routes over one terrain grid in every season.
///
/// The grid is only ever modified by the seasonal overlay and is reset
/// once each season is done, so planning a season never depends on the
/// seasons planned before it.
pub struct Expedition {
    grid: TerrainGrid,
    config: ExpeditionConfig,
    range: PathRange,
    transformer: SeasonalTransformer,
}

impl Expedition {
    pub fn new(grid: TerrainGrid, config: ExpeditionConfig) -> Self {
        Self {
            range: PathRange::new(grid.bounds()),
            transformer: SeasonalTransformer::new(config.seasons),
            grid,
            config,
        }
    }

    pub fn grid(&self) -> &TerrainGrid {
        &self.grid
    }

    pub fn config(&self) -> &ExpeditionConfig {
        &self.config
    }

    /// Number of A* searches run so far.
    pub fn searches(&self) -> u64 {
        self.range.searches()
    }

    /// Plan every route in every season, in [`Season::ALL`] order.
    pub fn run(
        &mut self,
        routes: &[NamedRoute],
        observer: &mut impl ExpeditionObserver,
    ) -> Vec<SeasonReport> {
        Season::ALL
            .into_iter()
            .map(|season| self.plan_season(season, routes, &mut *observer))
            .collect()
    }

    /// Apply the overlay of `season`, plan each route on the result, then
    /// restore the grid.
    ///
    /// A route that cannot be planned is reported and skipped; the rest
    /// are still attempted.
    pub fn plan_season(
        &mut self,
        season: Season,
        routes: &[NamedRoute],
        observer: &mut impl ExpeditionObserver,
    ) -> SeasonReport {
        let overlay = match self.transformer.apply(&mut self.grid, season) {
            Ok(overlay) => overlay,
            Err(e) => {
                warn!("{season}: overlay failed, skipping season: {e}");
                self.grid.reset();
                return SeasonReport {
                    season,
                    overlay: Err(e),
                    routes: Vec::new(),
                };
            }
        };
        observer.overlay_applied(season, &self.grid);

        let outcomes = {
            let pather = TerrainPather::new(&self.grid, self.config.scale, self.config.heuristic);
            let mut composer = RouteComposer::new(&mut self.range, &pather);
            routes
                .iter()
                .map(|r| {
                    let result = composer.compose(&r.waypoints);
                    match &result {
                        Ok(route) => {
                            info!(
                                "{season} {}: {:.1} m over {} legs, {} nodes expanded",
                                r.name,
                                route.distance,
                                route.legs.len(),
                                route.expanded()
                            );
                            observer.route_planned(season, &r.name, route);
                        }
                        Err(e) => {
                            warn!("{season} {}: {e}", r.name);
                            observer.route_failed(season, &r.name, e);
                        }
                    }
                    RouteOutcome {
                        name: r.name.clone(),
                        result,
                    }
                })
                .collect()
        };

        self.grid.reset();
        SeasonReport {
            season,
            overlay: Ok(overlay),
            routes: outcomes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orienteer_core::{SpeedTable, TerrainClass};

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl ExpeditionObserver for Recorder {
        fn overlay_applied(&mut self, season: Season, grid: &TerrainGrid) {
            self.events
                .push(format!("{season} overlay {}", grid.overlay_count()));
        }

        fn route_planned(&mut self, season: Season, name: &str, _route: &Route) {
            self.events.push(format!("{season} {name} ok"));
        }

        fn route_failed(&mut self, season: Season, name: &str, _error: &Error) {
            self.events.push(format!("{season} {name} failed"));
        }
    }

    fn meadow() -> TerrainGrid {
        ExpeditionConfig::default()
            .grid(6, 4, vec![TerrainClass::OpenLand; 24], vec![0.0; 24])
            .unwrap()
    }

    #[test]
    fn failed_route_does_not_stop_the_season() {
        let mut exp = Expedition::new(meadow(), ExpeditionConfig::default());
        let routes = [
            NamedRoute::new("off-map", vec![Point::new(0, 0), Point::new(9, 9)]),
            NamedRoute::new("across", vec![Point::new(0, 0), Point::new(5, 3)]),
        ];
        let mut rec = Recorder::default();
        let report = exp.plan_season(Season::Summer, &routes, &mut rec);
        assert_eq!(report.failures(), 1);
        assert!(matches!(
            report.route("off-map"),
            Some(Err(Error::OutOfBounds { .. }))
        ));
        assert!(matches!(report.route("across"), Some(Ok(_))));
        assert_eq!(
            rec.events,
            vec!["summer overlay 0", "summer off-map failed", "summer across ok"]
        );
        assert_eq!(exp.searches(), 1);
    }

    #[test]
    fn overlay_failure_skips_the_season() {
        let speeds = SpeedTable::empty()
            .with(TerrainClass::OpenLand, 1.0)
            .unwrap()
            .with(TerrainClass::EasyForest, 0.8)
            .unwrap();
        let mut classes = vec![TerrainClass::OpenLand; 9];
        classes[4] = TerrainClass::EasyForest;
        let grid = TerrainGrid::new(3, 3, classes, vec![0.0; 9], speeds).unwrap();
        let mut exp = Expedition::new(grid, ExpeditionConfig::default());
        let routes = [NamedRoute::new("r", vec![Point::new(0, 0), Point::new(2, 2)])];

        let reports = exp.run(&routes, &mut NoOpObserver);
        assert_eq!(reports.len(), 4);
        // Summer needs no overlay speeds.
        assert!(reports[0].overlay.is_ok());
        assert_eq!(reports[0].failures(), 0);
        for report in &reports[1..] {
            assert!(matches!(
                report.overlay,
                Err(Error::Config(ConfigError::MissingSpeed(_)))
            ));
            assert!(report.routes.is_empty());
        }
        assert!(exp.grid().is_pristine());
    }

    #[test]
    fn named_route_parses_waypoints() {
        let r = NamedRoute::parse("brown", "1 2\n3 4\n").unwrap();
        assert_eq!(r.waypoints, vec![Point::new(1, 2), Point::new(3, 4)]);
        assert!(NamedRoute::parse("bad", "1\n").is_err());
    }
}
