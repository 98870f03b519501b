//! Compass bearing to planar slope conversion
//!
//! Bearings run clockwise from north while planar slopes are rise over run
//! with north on the y-axis, so each quadrant needs its own remapping. The
//! four axis-aligned bearings map to tagged variants rather than to float
//! sentinels, so intersection code never compares against infinity.

use std::f64::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

use crate::core::Bearing;

/// Slope of a bearing line in the projected frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Slope {
    /// North-south line. `north` records whether the bearing was 0° or 180°.
    Vertical { north: bool },
    /// East-west line (90° or 270°)
    Horizontal,
    /// Any other line
    Finite(f64),
}

impl Slope {
    /// Exact IEEE value: `+inf` for due north, `-inf` for due south, `0` for
    /// due east/west
    pub fn value(&self) -> f64 {
        match *self {
            Slope::Vertical { north: true } => f64::INFINITY,
            Slope::Vertical { north: false } => f64::NEG_INFINITY,
            Slope::Horizontal => 0.0,
            Slope::Finite(m) => m,
        }
    }

    /// Angle of the line against the x-axis folded into `[0, π)`
    pub fn inclination(&self) -> f64 {
        match *self {
            Slope::Vertical { .. } => FRAC_PI_2,
            Slope::Horizontal => 0.0,
            Slope::Finite(m) => {
                let angle = m.atan();
                if angle < 0.0 { angle + PI } else { angle }
            }
        }
    }

    /// y-intercept of the line through `(x, y)`; `None` for vertical lines
    pub fn intercept(&self, x: f64, y: f64) -> Option<f64> {
        match *self {
            Slope::Vertical { .. } => None,
            Slope::Horizontal => Some(y),
            Slope::Finite(m) => Some(y - m * x),
        }
    }

    /// Folds degenerate finite values back onto the axis variants
    fn normalized(m: f64) -> Self {
        if m == 0.0 {
            Slope::Horizontal
        } else if m.is_infinite() {
            Slope::Vertical { north: m > 0.0 }
        } else {
            Slope::Finite(m)
        }
    }
}

/// Convert a compass bearing into the slope of its line in the planar frame
pub fn bearing_to_slope(bearing: Bearing) -> Slope {
    let degrees = bearing.degrees();
    let rad = bearing.radians();

    if degrees == 0.0 {
        Slope::Vertical { north: true }
    } else if degrees < 90.0 {
        Slope::normalized(1.0 / rad.tan())
    } else if degrees == 90.0 {
        Slope::Horizontal
    } else if degrees < 180.0 {
        Slope::normalized(-(rad - FRAC_PI_2).tan())
    } else if degrees == 180.0 {
        Slope::Vertical { north: false }
    } else if degrees < 270.0 {
        Slope::normalized(1.0 / (rad - PI).tan())
    } else if degrees == 270.0 {
        Slope::Horizontal
    } else {
        Slope::normalized(-(rad - 3.0 * FRAC_PI_2).tan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slope(degrees: f64) -> Slope {
        bearing_to_slope(Bearing::new(degrees).unwrap())
    }

    #[test]
    fn test_axis_bearings_are_exact() {
        assert_eq!(slope(0.0), Slope::Vertical { north: true });
        assert_eq!(slope(0.0).value(), f64::INFINITY);
        assert_eq!(slope(90.0), Slope::Horizontal);
        assert_eq!(slope(90.0).value(), 0.0);
        assert_eq!(slope(180.0), Slope::Vertical { north: false });
        assert_eq!(slope(180.0).value(), f64::NEG_INFINITY);
        assert_eq!(slope(270.0), Slope::Horizontal);
        assert_eq!(slope(270.0).value(), 0.0);
    }

    #[test]
    fn test_diagonal_quadrants() {
        // NE and SW share the rising diagonal, SE and NW the falling one
        assert!((slope(45.0).value() - 1.0).abs() < 1e-12);
        assert!((slope(135.0).value() + 1.0).abs() < 1e-12);
        assert!((slope(225.0).value() - 1.0).abs() < 1e-12);
        assert!((slope(315.0).value() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_quadrant_formulas() {
        let b: f64 = 30.0;
        assert!((slope(b).value() - 1.0 / b.to_radians().tan()).abs() < 1e-12);

        let b: f64 = 120.0;
        assert!((slope(b).value() + (b - 90.0).to_radians().tan()).abs() < 1e-12);

        let b: f64 = 200.0;
        assert!((slope(b).value() - 1.0 / (b - 180.0).to_radians().tan()).abs() < 1e-12);

        let b: f64 = 300.0;
        assert!((slope(b).value() + (b - 270.0).to_radians().tan()).abs() < 1e-12);
    }

    #[test]
    fn test_slope_matches_direction_vector() {
        for degrees in [10.0, 60.0, 100.0, 170.0, 190.0, 250.0, 280.0, 350.0] {
            let bearing = Bearing::new(degrees).unwrap();
            let dir = bearing.direction();
            let expected = dir.y / dir.x;
            let actual = bearing_to_slope(bearing).value();
            assert!(
                (actual - expected).abs() < 1e-9 * expected.abs().max(1.0),
                "bearing {}: {} vs {}", degrees, actual, expected
            );
        }
    }

    #[test]
    fn test_inclination_folding() {
        assert_eq!(slope(0.0).inclination(), FRAC_PI_2);
        assert_eq!(slope(270.0).inclination(), 0.0);
        assert!((slope(45.0).inclination() - PI / 4.0).abs() < 1e-12);
        assert!((slope(135.0).inclination() - 3.0 * PI / 4.0).abs() < 1e-12);
        // Opposite bearings describe the same line
        assert!((slope(30.0).inclination() - slope(210.0).inclination()).abs() < 1e-12);
    }

    #[test]
    fn test_intercept() {
        assert_eq!(slope(0.0).intercept(1.0, 2.0), None);
        assert_eq!(slope(90.0).intercept(1.0, 2.0), Some(2.0));
        let b = slope(45.0).intercept(1.0, 3.0).unwrap();
        assert!((b - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_near_axis_bearing_stays_finite() {
        let s = slope(1e-9);
        assert!(matches!(s, Slope::Finite(m) if m > 1e9));
    }
}
