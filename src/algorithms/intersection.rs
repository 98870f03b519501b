//! Intersection of two bearing lines in the planar frame

use std::f64::consts::PI;

use tracing::debug;

use crate::algorithms::bearing::Slope;
use crate::core::{PlanarPoint, DEFAULT_PARALLEL_TOLERANCE_DEG};
use crate::validation::{TriangulationError, TriangulationResult};

/// Intersects lines given as (point, slope) pairs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineIntersector {
    /// Inclination difference (radians) below which lines count as parallel
    parallel_tolerance_rad: f64,
}

impl Default for LineIntersector {
    fn default() -> Self {
        Self::new(DEFAULT_PARALLEL_TOLERANCE_DEG)
    }
}

impl LineIntersector {
    pub fn new(parallel_tolerance_deg: f64) -> Self {
        Self {
            parallel_tolerance_rad: parallel_tolerance_deg.abs().to_radians(),
        }
    }

    pub fn parallel_tolerance_deg(&self) -> f64 {
        self.parallel_tolerance_rad.to_degrees()
    }

    /// Angle between the two lines, in `[0, π/2]`
    pub fn angle_between(slope1: Slope, slope2: Slope) -> f64 {
        let diff = (slope1.inclination() - slope2.inclination()).abs();
        diff.min(PI - diff)
    }

    /// Single intersection point of the two lines.
    ///
    /// Fails with `ParallelLines` when the lines share an axis tag or their
    /// inclinations are within tolerance of each other.
    pub fn intersect(
        &self,
        point1: &PlanarPoint,
        slope1: Slope,
        point2: &PlanarPoint,
        slope2: Slope,
    ) -> TriangulationResult<PlanarPoint> {
        let angle = Self::angle_between(slope1, slope2);
        if angle < self.parallel_tolerance_rad {
            return Err(TriangulationError::ParallelLines {
                inclination_difference_deg: angle.to_degrees(),
            });
        }

        let intercept = |m: f64, p: &PlanarPoint| p.y - m * p.x;

        let point = match (slope1, slope2) {
            (Slope::Vertical { .. }, Slope::Vertical { .. }) | (Slope::Horizontal, Slope::Horizontal) => {
                return Err(TriangulationError::ParallelLines { inclination_difference_deg: 0.0 });
            }
            (Slope::Vertical { .. }, Slope::Horizontal) => PlanarPoint::new(point1.x, point2.y),
            (Slope::Vertical { .. }, Slope::Finite(m2)) => {
                let x = point1.x;
                PlanarPoint::new(x, m2 * x + intercept(m2, point2))
            }
            (Slope::Horizontal, Slope::Vertical { .. }) => PlanarPoint::new(point2.x, point1.y),
            (Slope::Finite(m1), Slope::Vertical { .. }) => {
                let x = point2.x;
                PlanarPoint::new(x, m1 * x + intercept(m1, point1))
            }
            (Slope::Horizontal, Slope::Finite(m2)) => {
                let y = point1.y;
                PlanarPoint::new((y - intercept(m2, point2)) / m2, y)
            }
            (Slope::Finite(m1), Slope::Horizontal) => {
                let y = point2.y;
                PlanarPoint::new((y - intercept(m1, point1)) / m1, y)
            }
            (Slope::Finite(m1), Slope::Finite(m2)) => {
                let b1 = intercept(m1, point1);
                let b2 = intercept(m2, point2);
                let x = (b2 - b1) / (m1 - m2);
                PlanarPoint::new(x, m1 * x + b1)
            }
        };

        debug!(
            x = point.x,
            y = point.y,
            angle_deg = angle.to_degrees(),
            "lines intersected"
        );
        Ok(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::bearing::bearing_to_slope;
    use crate::core::Bearing;

    fn slope(degrees: f64) -> Slope {
        bearing_to_slope(Bearing::new(degrees).unwrap())
    }

    fn assert_close(actual: PlanarPoint, expected: PlanarPoint) {
        assert!(
            (actual - expected).norm() < 1e-9,
            "expected {:?}, got {:?}", expected, actual
        );
    }

    #[test]
    fn test_vertical_and_horizontal() {
        let intersector = LineIntersector::default();
        let p1 = PlanarPoint::new(-0.5, -0.5);
        let p2 = PlanarPoint::new(0.5, 0.5);

        // East from p1, south from p2
        let result = intersector.intersect(&p1, slope(90.0), &p2, slope(180.0)).unwrap();
        assert_close(result, PlanarPoint::new(0.5, -0.5));

        // Same lines with roles swapped
        let result = intersector.intersect(&p2, slope(180.0), &p1, slope(90.0)).unwrap();
        assert_close(result, PlanarPoint::new(0.5, -0.5));
    }

    #[test]
    fn test_vertical_and_finite() {
        let intersector = LineIntersector::default();
        let p1 = PlanarPoint::new(2.0, 0.0);
        let p2 = PlanarPoint::new(0.0, 0.0);
        let result = intersector.intersect(&p1, slope(0.0), &p2, slope(45.0)).unwrap();
        assert_close(result, PlanarPoint::new(2.0, 2.0));

        let result = intersector.intersect(&p2, slope(45.0), &p1, slope(0.0)).unwrap();
        assert_close(result, PlanarPoint::new(2.0, 2.0));
    }

    #[test]
    fn test_horizontal_and_finite() {
        let intersector = LineIntersector::default();
        let p1 = PlanarPoint::new(0.0, 3.0);
        let p2 = PlanarPoint::new(0.0, 0.0);
        let result = intersector.intersect(&p1, slope(270.0), &p2, slope(45.0)).unwrap();
        assert_close(result, PlanarPoint::new(3.0, 3.0));

        let result = intersector.intersect(&p2, slope(135.0), &p1, slope(90.0)).unwrap();
        assert_close(result, PlanarPoint::new(-3.0, 3.0));
    }

    #[test]
    fn test_general_case() {
        let intersector = LineIntersector::default();
        let p1 = PlanarPoint::new(0.0, 0.0);
        let p2 = PlanarPoint::new(2.0, 0.0);
        // NE from the origin, NW from (2, 0) meet at (1, 1)
        let result = intersector.intersect(&p1, slope(45.0), &p2, slope(315.0)).unwrap();
        assert_close(result, PlanarPoint::new(1.0, 1.0));
    }

    #[test]
    fn test_parallel_axis_lines_rejected() {
        let intersector = LineIntersector::default();
        let p1 = PlanarPoint::new(0.0, 0.0);
        let p2 = PlanarPoint::new(1.0, 1.0);
        assert!(matches!(
            intersector.intersect(&p1, slope(0.0), &p2, slope(180.0)),
            Err(TriangulationError::ParallelLines { .. })
        ));
        assert!(matches!(
            intersector.intersect(&p1, slope(90.0), &p2, slope(270.0)),
            Err(TriangulationError::ParallelLines { .. })
        ));
    }

    #[test]
    fn test_near_parallel_rejected() {
        let intersector = LineIntersector::default();
        let p1 = PlanarPoint::new(0.0, 0.0);
        let p2 = PlanarPoint::new(1.0, 0.0);
        let err = intersector
            .intersect(&p1, slope(30.0), &p2, slope(30.0000001))
            .unwrap_err();
        match err {
            TriangulationError::ParallelLines { inclination_difference_deg } => {
                assert!(inclination_difference_deg < 1e-6);
            }
            other => panic!("unexpected error {:?}", other),
        }

        // A real one-degree spread is fine
        assert!(intersector.intersect(&p1, slope(30.0), &p2, slope(31.0)).is_ok());
    }

    #[test]
    fn test_custom_tolerance() {
        let intersector = LineIntersector::new(2.0);
        assert!((intersector.parallel_tolerance_deg() - 2.0).abs() < 1e-12);
        let p1 = PlanarPoint::new(0.0, 0.0);
        let p2 = PlanarPoint::new(1.0, 0.0);
        assert!(intersector.intersect(&p1, slope(30.0), &p2, slope(31.0)).is_err());
        assert!(intersector.intersect(&p1, slope(30.0), &p2, slope(40.0)).is_ok());
    }

    #[test]
    fn test_angle_between_wraps() {
        let angle = LineIntersector::angle_between(slope(1.0), slope(179.0));
        assert!((angle.to_degrees() - 2.0).abs() < 1e-9);
    }
}
