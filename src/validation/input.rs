//! Parsing and range validation of user-supplied coordinates and bearings

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Bearing, GeoCoordinate, Observation, MAX_OBSERVATIONS, MIN_OBSERVATIONS};
use crate::validation::{TriangulationError, TriangulationResult};

/// Which coordinate component an angle belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    fn field(self) -> &'static str {
        match self {
            Axis::Latitude => "latitude",
            Axis::Longitude => "longitude",
        }
    }

    fn limit(self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }

    /// Sign implied by a hemisphere letter, `None` if the letter is not valid
    /// for this axis
    fn hemisphere_sign(self, letter: char) -> Option<f64> {
        match (self, letter.to_ascii_uppercase()) {
            (Axis::Latitude, 'N') | (Axis::Longitude, 'E') => Some(1.0),
            (Axis::Latitude, 'S') | (Axis::Longitude, 'W') => Some(-1.0),
            _ => None,
        }
    }
}

/// Observation as it appears in JSON input files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawObservation {
    pub coordinate: RawCoordinate,
    pub bearing: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCoordinate {
    pub lat: f64,
    pub lon: f64,
}

/// Top-level JSON input document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationFile {
    pub observations: Vec<RawObservation>,
}

/// Parses text input into validated observations
#[derive(Debug, Clone, Copy, Default)]
pub struct InputParser;

impl InputParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse `"lat, lon"`; each component may be decimal or D°M'S" notation
    pub fn parse_coordinate(&self, text: &str) -> TriangulationResult<GeoCoordinate> {
        let parts: Vec<&str> = text.split(',').collect();
        if parts.len() != 2 {
            return Err(TriangulationError::malformed(
                "coordinate",
                text,
                "expected 'latitude, longitude'",
            ));
        }
        let lat = self.parse_angle(parts[0], Axis::Latitude)?;
        let lon = self.parse_angle(parts[1], Axis::Longitude)?;
        Ok(GeoCoordinate::new(lat, lon))
    }

    /// Parse a single latitude or longitude and check its range
    pub fn parse_angle(&self, text: &str, axis: Axis) -> TriangulationResult<f64> {
        let trimmed = text.trim();
        let malformed = |reason: &str| TriangulationError::malformed(axis.field(), trimmed, reason);

        if trimmed.is_empty() {
            return Err(malformed("empty value"));
        }

        let mut sign = 1.0;
        let mut body = trimmed;

        if let Some(last) = body.chars().last().filter(|c| c.is_ascii_alphabetic()) {
            sign = axis
                .hemisphere_sign(last)
                .ok_or_else(|| malformed("invalid hemisphere letter"))?;
            body = body[..body.len() - last.len_utf8()].trim_end();
        } else if let Some(first) = body.chars().next().filter(|c| c.is_ascii_alphabetic()) {
            sign = axis
                .hemisphere_sign(first)
                .ok_or_else(|| malformed("invalid hemisphere letter"))?;
            body = body[first.len_utf8()..].trim_start();
        }

        if let Some(rest) = body.strip_prefix('-') {
            if sign < 0.0 {
                return Err(malformed("both a minus sign and a southern/western hemisphere"));
            }
            sign = -1.0;
            body = rest;
        }

        let magnitude = if body.contains('°') {
            parse_dms(body).ok_or_else(|| malformed("invalid degrees-minutes-seconds value"))?
        } else {
            body.trim()
                .parse::<f64>()
                .map_err(|_| malformed("not a number"))?
        };

        let value = sign * magnitude;
        if !value.is_finite() || value.abs() > axis.limit() {
            return Err(malformed(&format!("must be within ±{}", axis.limit())));
        }
        Ok(value)
    }

    /// Parse a bearing in decimal degrees, `[0, 360)`
    pub fn parse_bearing(&self, text: &str) -> TriangulationResult<Bearing> {
        let trimmed = text.trim();
        let value: f64 = trimmed
            .parse()
            .map_err(|_| TriangulationError::malformed("bearing", trimmed, "not a number"))?;
        Self::bearing(value, trimmed)
    }

    /// Pair up coordinate and bearing texts into observations
    pub fn parse_observations<S: AsRef<str>>(
        &self,
        coordinates: &[S],
        bearings: &[S],
    ) -> TriangulationResult<Vec<Observation>> {
        if coordinates.len() != bearings.len() {
            return Err(TriangulationError::malformed(
                "observations",
                format!("{} coordinates, {} bearings", coordinates.len(), bearings.len()),
                "each coordinate needs exactly one bearing",
            ));
        }
        check_count(coordinates.len())?;

        coordinates
            .iter()
            .zip(bearings)
            .map(|(coordinate, bearing)| {
                Ok(Observation::new(
                    self.parse_coordinate(coordinate.as_ref())?,
                    self.parse_bearing(bearing.as_ref())?,
                ))
            })
            .collect()
    }

    /// Parse a JSON observation document
    pub fn parse_json(&self, content: &str) -> TriangulationResult<Vec<Observation>> {
        let file: ObservationFile = serde_json::from_str(content)
            .map_err(|e| TriangulationError::malformed("input file", "<json>", e.to_string()))?;
        check_count(file.observations.len())?;

        file.observations
            .into_iter()
            .map(|raw| {
                let coordinate = GeoCoordinate::new(raw.coordinate.lat, raw.coordinate.lon);
                validate_coordinate(&coordinate)?;
                let bearing = Self::bearing(raw.bearing, &raw.bearing.to_string())?;
                Ok(Observation::new(coordinate, bearing))
            })
            .collect()
    }

    /// Read and parse a JSON observation file
    pub fn load_json<P: AsRef<Path>>(&self, path: P) -> TriangulationResult<Vec<Observation>> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            TriangulationError::malformed("input file", path.display().to_string(), e.to_string())
        })?;
        self.parse_json(&content)
    }

    fn bearing(value: f64, text: &str) -> TriangulationResult<Bearing> {
        Bearing::new(value)
            .ok_or_else(|| TriangulationError::malformed("bearing", text, "must be within [0, 360)"))
    }
}

/// Range check for coordinates that did not come through text parsing
pub fn validate_coordinate(coordinate: &GeoCoordinate) -> TriangulationResult<()> {
    if !coordinate.lat.is_finite() || coordinate.lat.abs() > 90.0 {
        return Err(TriangulationError::malformed(
            "latitude",
            coordinate.lat.to_string(),
            "must be within ±90",
        ));
    }
    if !coordinate.lon.is_finite() || coordinate.lon.abs() > 180.0 {
        return Err(TriangulationError::malformed(
            "longitude",
            coordinate.lon.to_string(),
            "must be within ±180",
        ));
    }
    Ok(())
}

fn check_count(count: usize) -> TriangulationResult<()> {
    if !(MIN_OBSERVATIONS..=MAX_OBSERVATIONS).contains(&count) {
        return Err(TriangulationError::InvalidObservationCount { count });
    }
    Ok(())
}

/// Unsigned degrees-minutes-seconds, e.g. `32°7'25.5"`. Minutes and seconds
/// may be omitted but must be below 60 when present. The seconds mark is
/// optional after minutes.
fn parse_dms(text: &str) -> Option<f64> {
    let (degrees, rest) = text.split_once('°')?;
    let degrees: f64 = degrees.trim().parse().ok()?;

    let (minutes, rest, has_minutes) = match rest.split_once(|c: char| c == '\'' || c == '′') {
        Some((m, r)) => (m.trim().parse::<f64>().ok()?, r, true),
        None => (0.0, rest, false),
    };
    let (seconds, rest) = match rest.split_once(|c: char| c == '"' || c == '″') {
        Some((s, r)) => (s.trim().parse::<f64>().ok()?, r),
        // Seconds may drop the closing mark: 32°7'25.5
        None if has_minutes && !rest.trim().is_empty() => (rest.trim().parse::<f64>().ok()?, ""),
        None => (0.0, rest),
    };

    if !rest.trim().is_empty() || !(0.0..60.0).contains(&minutes) || !(0.0..60.0).contains(&seconds) {
        return None;
    }
    Some(degrees + minutes / 60.0 + seconds / 3600.0)
}
