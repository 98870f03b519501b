//! Equirectangular projection around a run-scoped reference point
//!
//! The reference is an immutable value built once per triangulation run and
//! handed to every forward/inverse call. Accuracy degrades with distance from
//! the reference and with latitude, since longitude is scaled by the cosine
//! of the reference latitude only.

use serde::Serialize;

use crate::core::{GeoCoordinate, PlanarPoint, MIN_PROJECTION_COSINE};
use crate::validation::{TriangulationError, TriangulationResult};

/// Reference point for forward and inverse projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectionReference {
    /// Reference latitude (degrees)
    pub lat: f64,
    /// Reference longitude (degrees)
    pub lon: f64,
    /// Cosine of the reference latitude
    #[serde(skip)]
    cos_lat: f64,
}

impl ProjectionReference {
    pub fn new(lat: f64, lon: f64) -> TriangulationResult<Self> {
        let cos_lat = lat.to_radians().cos();
        if !cos_lat.is_finite() || cos_lat < MIN_PROJECTION_COSINE {
            return Err(TriangulationError::DegenerateProjection { reference_lat: lat });
        }
        Ok(Self { lat, lon, cos_lat })
    }

    /// Reference at the arithmetic mean of `coordinates`
    pub fn centroid_of(coordinates: &[GeoCoordinate]) -> TriangulationResult<Self> {
        if coordinates.is_empty() {
            return Err(TriangulationError::InvalidObservationCount { count: 0 });
        }
        let n = coordinates.len() as f64;
        let (sum_lat, sum_lon) = coordinates
            .iter()
            .fold((0.0, 0.0), |(lat, lon), c| (lat + c.lat, lon + c.lon));
        Self::new(sum_lat / n, sum_lon / n)
    }

    pub fn as_coordinate(&self) -> GeoCoordinate {
        GeoCoordinate::new(self.lat, self.lon)
    }

    /// Geographic to planar
    pub fn forward(&self, coordinate: &GeoCoordinate) -> PlanarPoint {
        PlanarPoint::new(
            (coordinate.lon - self.lon) * self.cos_lat,
            coordinate.lat - self.lat,
        )
    }

    /// Planar to geographic
    pub fn inverse(&self, point: &PlanarPoint) -> GeoCoordinate {
        GeoCoordinate::new(point.y + self.lat, point.x / self.cos_lat + self.lon)
    }
}
