//! Core data types for bearing triangulation

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Point in the local equirectangular plane (x east, y north, both in
/// reference-scaled degrees)
pub type PlanarPoint = Vector2<f64>;

/// Geographic position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub lat: f64,
    pub lon: f64,
}

impl GeoCoordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// True when both components are finite and inside the geographic ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Compass bearing, degrees clockwise from north in `[0, 360)`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Bearing(f64);

impl Bearing {
    /// Returns `None` for non-finite values and values outside `[0, 360)`
    pub fn new(degrees: f64) -> Option<Self> {
        if degrees.is_finite() && (0.0..360.0).contains(&degrees) {
            Some(Self(degrees))
        } else {
            None
        }
    }

    pub fn degrees(self) -> f64 {
        self.0
    }

    pub fn radians(self) -> f64 {
        self.0.to_radians()
    }

    /// Unit direction of the bearing in the planar frame (x east, y north)
    pub fn direction(self) -> PlanarPoint {
        let rad = self.radians();
        Vector2::new(rad.sin(), rad.cos())
    }
}

impl TryFrom<f64> for Bearing {
    type Error = String;

    fn try_from(degrees: f64) -> Result<Self, Self::Error> {
        Bearing::new(degrees).ok_or_else(|| format!("bearing {} outside [0, 360)", degrees))
    }
}

impl From<Bearing> for f64 {
    fn from(bearing: Bearing) -> f64 {
        bearing.0
    }
}

/// A known position together with the bearing observed from it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub coordinate: GeoCoordinate,
    pub bearing: Bearing,
}

impl Observation {
    pub fn new(coordinate: GeoCoordinate, bearing: Bearing) -> Self {
        Self { coordinate, bearing }
    }
}
