//! One triangulation run: validation, projection reference, resection and
//! bounding box

use tracing::{debug, warn};

use crate::algorithms::{bounds, validate_bearing_pair, ProjectionReference, ResectionStrategy, Triangulator};
use crate::api::types::TriangulationReport;
use crate::core::{GeoCoordinate, Observation};
use crate::utils::config::{ConfigError, TriangulationConfig};
use crate::validation::{validate_coordinate, TriangulationError, TriangulationResult};

pub struct TriangulationSession {
    config: TriangulationConfig,
    strategy: Box<dyn ResectionStrategy>,
}

impl TriangulationSession {
    pub fn new(config: TriangulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let strategy = config.resection_strategy()?;
        Ok(Self { config, strategy })
    }

    /// Replace the configured strategy
    pub fn with_strategy(mut self, strategy: Box<dyn ResectionStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Triangulate two or three observations.
    ///
    /// Every input check runs before the projection reference is built, and
    /// any failure aborts the whole run.
    pub fn run(&self, observations: &[Observation]) -> TriangulationResult<TriangulationReport> {
        let pairs = self.strategy.pairs(observations.len())?;
        for observation in observations {
            validate_coordinate(&observation.coordinate)?;
        }
        for &(i, j) in &pairs {
            validate_bearing_pair(i, observations[i].bearing, j, observations[j].bearing)?;
        }

        let known: Vec<GeoCoordinate> = observations.iter().map(|o| o.coordinate).collect();
        let reference = ProjectionReference::centroid_of(&known)?;
        debug!(lat = reference.lat, lon = reference.lon, "projection reference");

        let triangulator = Triangulator::new(reference).with_intersector(self.config.intersector());
        let resection = triangulator.resect(observations, self.strategy.as_ref())?;

        if self.config.flag_rays_behind_observer {
            for fix in resection.fixes.iter().filter(|f| f.behind_observer) {
                warn!(
                    first = fix.pair.0,
                    second = fix.pair.1,
                    "intersection lies behind an observer; bearings may be reversed"
                );
            }
        }

        let fixes: Vec<GeoCoordinate> = resection.fixes.iter().map(|f| f.position).collect();
        let bounds = bounds(&known, &fixes)
            .ok_or(TriangulationError::InvalidObservationCount { count: observations.len() })?;

        Ok(TriangulationReport {
            observations: observations.to_vec(),
            reference,
            strategy: resection.strategy,
            fixes: resection.fixes,
            centroid: resection.centroid,
            bounds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{CyclicPairResection, PairFix};
    use crate::core::Bearing;

    fn obs(lat: f64, lon: f64, degrees: f64) -> Observation {
        Observation::new(GeoCoordinate::new(lat, lon), Bearing::new(degrees).unwrap())
    }

    fn session() -> TriangulationSession {
        TriangulationSession::new(TriangulationConfig::default()).unwrap()
    }

    #[test]
    fn test_pair_mode() {
        let report = session().run(&[obs(0.0, 0.0, 90.0), obs(1.0, 1.0, 180.0)]).unwrap();
        assert_eq!(report.fixes.len(), 1);
        assert_eq!(report.reference.lat, 0.5);
        assert_eq!(report.reference.lon, 0.5);

        let fix = report.fixes[0].position;
        assert!(fix.lat.abs() < 1e-12);
        assert!((fix.lon - 1.0).abs() < 1e-12);
        // With a single fix the centroid is the fix itself
        assert_eq!(report.centroid, fix);
    }

    #[test]
    fn test_triple_mode() {
        let report = session()
            .run(&[
                obs(32.1230, 45.4760, 45.0),
                obs(32.1240, 45.4780, 200.0),
                obs(32.1250, 45.4765, 120.0),
            ])
            .unwrap();
        assert_eq!(report.fixes.len(), 3);
        assert_eq!(report.strategy, "cyclic-pair");

        let all: Vec<_> = report.known_coordinates().into_iter().chain(report.fix_coordinates()).collect();
        assert!(all.iter().all(|c| report.bounds.contains(c)));
    }

    #[test]
    fn test_bounds_cover_far_fix() {
        // Shallow angle puts the fix well outside the two observers
        let report = session().run(&[obs(0.0, 0.0, 80.0), obs(0.01, 0.0, 100.0)]).unwrap();
        let fix = report.fixes[0].position;
        assert!(fix.lon > 0.02);
        assert_eq!(report.bounds.max_lon, fix.lon);
    }

    #[test]
    fn test_rejections() {
        let s = session();
        assert!(matches!(
            s.run(&[obs(0.0, 0.0, 45.0), obs(1.0, 1.0, 225.0)]),
            Err(TriangulationError::InvalidBearingPair { .. })
        ));
        assert!(matches!(
            s.run(&[obs(0.0, 0.0, 45.0)]),
            Err(TriangulationError::InvalidObservationCount { count: 1 })
        ));
        let four = [obs(0.0, 0.0, 1.0), obs(0.0, 1.0, 2.0), obs(1.0, 0.0, 3.0), obs(1.0, 1.0, 4.0)];
        assert!(matches!(
            s.run(&four),
            Err(TriangulationError::InvalidObservationCount { count: 4 })
        ));
        assert!(matches!(
            s.run(&[obs(91.0, 0.0, 10.0), obs(0.0, 0.0, 20.0)]),
            Err(TriangulationError::MalformedInput { .. })
        ));
        assert!(matches!(
            s.run(&[obs(89.999, 0.0, 10.0), obs(89.9995, 1.0, 20.0)]),
            Err(TriangulationError::DegenerateProjection { .. })
        ));
    }

    #[test]
    fn test_fix_beyond_pole_rejected() {
        // Nearly parallel northward rays converge past the pole
        let result = session().run(&[obs(80.0, 0.0, 0.2), obs(80.0, 1.0, 359.8)]);
        assert!(matches!(
            result,
            Err(TriangulationError::FixOutOfRange { first: 0, second: 1, .. })
        ));
    }

    #[test]
    fn test_tolerance_from_config() {
        let config = TriangulationConfig::default().with_parallel_tolerance(5.0);
        let s = TriangulationSession::new(config).unwrap();
        assert!(matches!(
            s.run(&[obs(0.0, 0.0, 30.0), obs(0.0, 1.0, 33.0)]),
            Err(TriangulationError::ParallelLines { .. })
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = TriangulationConfig::default().with_strategy("unknown");
        assert!(TriangulationSession::new(config).is_err());
    }

    #[derive(Debug)]
    struct FirstFixOnly;

    impl ResectionStrategy for FirstFixOnly {
        fn name(&self) -> &'static str {
            "first-fix"
        }

        fn pairs(&self, count: usize) -> TriangulationResult<Vec<(usize, usize)>> {
            CyclicPairResection.pairs(count)
        }

        fn fuse(&self, fixes: &[PairFix]) -> Option<GeoCoordinate> {
            fixes.first().map(|f| f.position)
        }
    }

    #[test]
    fn test_pluggable_strategy() {
        let s = session().with_strategy(Box::new(FirstFixOnly));
        let report = s
            .run(&[
                obs(32.1230, 45.4760, 45.0),
                obs(32.1240, 45.4780, 200.0),
                obs(32.1250, 45.4765, 120.0),
            ])
            .unwrap();
        assert_eq!(report.strategy, "first-fix");
        assert_eq!(report.centroid, report.fixes[0].position);
    }
}
