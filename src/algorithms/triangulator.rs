//! Pairwise bearing triangulation
//!
//! Converts both bearings to slopes, projects both observers around the run's
//! reference, intersects the two lines and projects the intersection back.

use serde::Serialize;
use tracing::{debug, info};

use crate::algorithms::bearing::bearing_to_slope;
use crate::algorithms::intersection::LineIntersector;
use crate::algorithms::projection::ProjectionReference;
use crate::algorithms::resection::ResectionStrategy;
use crate::core::{Bearing, GeoCoordinate, Observation, PlanarPoint};
use crate::validation::{validate_coordinate, TriangulationError, TriangulationResult};

/// Numerical slack when deciding whether a fix lies behind an observer
const BEHIND_OBSERVER_EPSILON: f64 = 1e-12;

/// Reject bearings that are identical or exactly opposite. `first` and
/// `second` are the observation indices, used for reporting only.
pub fn validate_bearing_pair(
    first: usize,
    bearing_first: Bearing,
    second: usize,
    bearing_second: Bearing,
) -> TriangulationResult<()> {
    let diff = (bearing_first.degrees() - bearing_second.degrees()).abs();
    if diff == 0.0 || diff == 180.0 {
        return Err(TriangulationError::InvalidBearingPair {
            first,
            second,
            bearing_first: bearing_first.degrees(),
            bearing_second: bearing_second.degrees(),
        });
    }
    Ok(())
}

/// Result of intersecting one pair of observations
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairFix {
    /// Indices of the two observations used
    pub pair: (usize, usize),
    /// Intersection in geographic coordinates
    pub position: GeoCoordinate,
    /// Intersection in the run's planar frame
    #[serde(skip)]
    pub planar: PlanarPoint,
    /// True when the fix lies on the back-bearing of either observer
    pub behind_observer: bool,
}

/// Fixes of every pair chosen by a resection strategy, plus their fusion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resection {
    pub strategy: &'static str,
    pub fixes: Vec<PairFix>,
    pub centroid: GeoCoordinate,
}

/// Triangulates observation pairs against one fixed projection reference
#[derive(Debug, Clone, Copy)]
pub struct Triangulator {
    reference: ProjectionReference,
    intersector: LineIntersector,
}

impl Triangulator {
    pub fn new(reference: ProjectionReference) -> Self {
        Self {
            reference,
            intersector: LineIntersector::default(),
        }
    }

    pub fn with_intersector(mut self, intersector: LineIntersector) -> Self {
        self.intersector = intersector;
        self
    }

    /// Intersection of the bearing lines from two known coordinates
    pub fn triangulate(
        &self,
        coord1: &GeoCoordinate,
        bearing1: Bearing,
        coord2: &GeoCoordinate,
        bearing2: Bearing,
    ) -> TriangulationResult<GeoCoordinate> {
        let fix = self.fix(
            (0, 1),
            &Observation::new(*coord1, bearing1),
            &Observation::new(*coord2, bearing2),
        )?;
        Ok(fix.position)
    }

    /// Full pairwise fix, including the ray direction check. Fails when the
    /// intersection lands outside valid geographic coordinates.
    pub fn fix(
        &self,
        pair: (usize, usize),
        first: &Observation,
        second: &Observation,
    ) -> TriangulationResult<PairFix> {
        validate_bearing_pair(pair.0, first.bearing, pair.1, second.bearing)?;
        validate_coordinate(&first.coordinate)?;
        validate_coordinate(&second.coordinate)?;

        let slope1 = bearing_to_slope(first.bearing);
        let slope2 = bearing_to_slope(second.bearing);

        let point1 = self.reference.forward(&first.coordinate);
        let point2 = self.reference.forward(&second.coordinate);
        debug!(
            ?pair,
            x1 = point1.x, y1 = point1.y, slope1 = slope1.value(),
            x2 = point2.x, y2 = point2.y, slope2 = slope2.value(),
            "projected observation pair"
        );

        let planar = self.intersector.intersect(&point1, slope1, &point2, slope2)?;
        let position = self.reference.inverse(&planar);
        if !position.is_valid() {
            return Err(TriangulationError::FixOutOfRange {
                first: pair.0,
                second: pair.1,
                lat: position.lat,
                lon: position.lon,
            });
        }

        let behind_observer = is_behind(&planar, &point1, first.bearing)
            || is_behind(&planar, &point2, second.bearing);

        Ok(PairFix { pair, position, planar, behind_observer })
    }

    /// Run every pair the strategy selects and fuse the fixes.
    ///
    /// All bearing pairs are validated before any projection happens.
    pub fn resect(
        &self,
        observations: &[Observation],
        strategy: &dyn ResectionStrategy,
    ) -> TriangulationResult<Resection> {
        let pairs = strategy.pairs(observations.len())?;
        for &(i, j) in &pairs {
            validate_bearing_pair(i, observations[i].bearing, j, observations[j].bearing)?;
        }

        let mut fixes = Vec::with_capacity(pairs.len());
        for (i, j) in pairs {
            let fix = self.fix((i, j), &observations[i], &observations[j])?;
            info!(
                first = i,
                second = j,
                lat = fix.position.lat,
                lon = fix.position.lon,
                "triangulated pair"
            );
            fixes.push(fix);
        }

        let centroid = strategy
            .fuse(&fixes)
            .ok_or(TriangulationError::InvalidObservationCount { count: observations.len() })?;
        info!(lat = centroid.lat, lon = centroid.lon, strategy = strategy.name(), "fused fixes");

        Ok(Resection { strategy: strategy.name(), fixes, centroid })
    }
}

fn is_behind(fix: &PlanarPoint, observer: &PlanarPoint, bearing: Bearing) -> bool {
    (fix - observer).dot(&bearing.direction()) < -BEHIND_OBSERVER_EPSILON
}
