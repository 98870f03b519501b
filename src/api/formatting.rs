//! Report output: text lines, JSON, and a map overlay for renderers

use serde::Serialize;

use crate::algorithms::BoundingBox;
use crate::api::types::{OutputFormat, TriangulationReport};
use crate::core::GeoCoordinate;

/// Segment colors, indexed by fix label position
pub const SEGMENT_COLORS: [&str; 6] = ["red", "green", "blue", "orange", "cyan", "purple"];

/// Closest zoom a renderer should use
pub const MAX_ZOOM: u8 = 20;

/// Human-readable text formatter
#[derive(Debug, Clone, Copy)]
pub struct TextFormatter {
    /// Decimal places for coordinates
    pub precision: usize,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self { precision: 6 }
    }
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn format_report(&self, report: &TriangulationReport) -> String {
        let p = self.precision;
        let mut output = String::new();

        for (i, observation) in report.observations.iter().enumerate() {
            output.push_str(&format!(
                "Point {} - Lat: {:.p$} Lon: {:.p$} Bearing: {}\n",
                TriangulationReport::observation_label(i),
                observation.coordinate.lat,
                observation.coordinate.lon,
                observation.bearing.degrees(),
            ));
        }

        for (i, fix) in report.fixes.iter().enumerate() {
            output.push_str(&format!(
                "Triangulated Point {} - Lat: {:.p$} Lon: {:.p$}",
                report.fix_label(i),
                fix.position.lat,
                fix.position.lon,
            ));
            if fix.behind_observer {
                output.push_str(" (behind observer)");
            }
            output.push('\n');
        }

        output.push_str(&format!(
            "Average triangulated value - Lat: {:.p$} Lon: {:.p$}\n",
            report.centroid.lat, report.centroid.lon,
        ));
        if report.has_fix_behind_observer() {
            output.push_str("Note: at least one intersection lies behind an observer; check for reversed bearings\n");
        }
        output
    }
}

/// JSON formatter for structured output
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter {
    /// Pretty print JSON
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn format_json<T: Serialize>(&self, value: &T) -> Result<String, serde_json::Error> {
        if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Known,
    Fix,
    Centroid,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub label: char,
    pub kind: MarkerKind,
    pub position: GeoCoordinate,
}

/// Line from an observer to a fix
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub from: GeoCoordinate,
    pub to: GeoCoordinate,
    pub color: &'static str,
}

/// What a map renderer needs to draw one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapOverlay {
    pub center: GeoCoordinate,
    pub zoom: u8,
    pub bounds: BoundingBox,
    pub markers: Vec<Marker>,
    pub segments: Vec<Segment>,
}

impl MapOverlay {
    pub fn from_report(report: &TriangulationReport) -> Self {
        let known = report.observations.len();
        let mut markers = Vec::with_capacity(known + report.fixes.len() + 1);
        let mut segments = Vec::with_capacity(report.fixes.len() * 2);

        for (i, observation) in report.observations.iter().enumerate() {
            markers.push(Marker {
                label: TriangulationReport::observation_label(i),
                kind: MarkerKind::Known,
                position: observation.coordinate,
            });
        }

        for (i, fix) in report.fixes.iter().enumerate() {
            markers.push(Marker {
                label: report.fix_label(i),
                kind: MarkerKind::Fix,
                position: fix.position,
            });
            let color = SEGMENT_COLORS[(known + i) % SEGMENT_COLORS.len()];
            for observer in [fix.pair.0, fix.pair.1] {
                segments.push(Segment {
                    from: report.observations[observer].coordinate,
                    to: fix.position,
                    color,
                });
            }
        }

        markers.push(Marker {
            label: 'T',
            kind: MarkerKind::Centroid,
            position: report.centroid,
        });

        Self {
            center: report.reference.as_coordinate(),
            zoom: zoom_for(&report.bounds),
            bounds: report.bounds,
            markers,
            segments,
        }
    }
}

/// Web-map zoom at which the box spans roughly one 256px tile
pub fn zoom_for(bounds: &BoundingBox) -> u8 {
    let span = (bounds.max_lat - bounds.min_lat).max(bounds.max_lon - bounds.min_lon);
    if !(span > 0.0) {
        return MAX_ZOOM;
    }
    (360.0 / span).log2().floor().clamp(0.0, MAX_ZOOM as f64) as u8
}

/// Render a report in the requested format
pub fn render(report: &TriangulationReport, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(TextFormatter::new().format_report(report)),
        OutputFormat::Json => JsonFormatter::pretty().format_json(report),
        OutputFormat::Overlay => JsonFormatter::pretty().format_json(&MapOverlay::from_report(report)),
    }
}
