//! Bounding box over known and triangulated coordinates, for map rendering

use serde::Serialize;

use crate::core::GeoCoordinate;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub max_lat: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub min_lon: f64,
}

impl BoundingBox {
    /// Degenerate box around a single coordinate
    pub fn around(coordinate: &GeoCoordinate) -> Self {
        Self {
            max_lat: coordinate.lat,
            min_lat: coordinate.lat,
            max_lon: coordinate.lon,
            min_lon: coordinate.lon,
        }
    }

    pub fn include(&mut self, coordinate: &GeoCoordinate) {
        self.max_lat = self.max_lat.max(coordinate.lat);
        self.min_lat = self.min_lat.min(coordinate.lat);
        self.max_lon = self.max_lon.max(coordinate.lon);
        self.min_lon = self.min_lon.min(coordinate.lon);
    }

    pub fn contains(&self, coordinate: &GeoCoordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&coordinate.lat)
            && (self.min_lon..=self.max_lon).contains(&coordinate.lon)
    }
}

/// Box spanning both the known and the triangulated coordinates, `None` when
/// both are empty
pub fn bounds(known: &[GeoCoordinate], triangulated: &[GeoCoordinate]) -> Option<BoundingBox> {
    let mut all = known.iter().chain(triangulated);
    let first = all.next()?;
    Some(all.fold(BoundingBox::around(first), |mut bbox, c| {
        bbox.include(c);
        bbox
    }))
}
