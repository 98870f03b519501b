//! Report types handed to output formatters and map renderers

use serde::{Deserialize, Serialize};

use crate::algorithms::{BoundingBox, PairFix, ProjectionReference};
use crate::core::{GeoCoordinate, Observation};

/// Report format written by the command-line tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable lines
    Text,
    /// Pretty-printed JSON report
    Json,
    /// JSON map overlay for a renderer
    Overlay,
}

/// Everything one triangulation run produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriangulationReport {
    pub observations: Vec<Observation>,
    pub reference: ProjectionReference,
    pub strategy: &'static str,
    pub fixes: Vec<PairFix>,
    pub centroid: GeoCoordinate,
    pub bounds: BoundingBox,
}

impl TriangulationReport {
    /// Label of the `index`th known point: A, B, C
    pub fn observation_label(index: usize) -> char {
        label(index)
    }

    /// Label of the `index`th fix, continuing after the known points
    pub fn fix_label(&self, index: usize) -> char {
        label(self.observations.len() + index)
    }

    pub fn known_coordinates(&self) -> Vec<GeoCoordinate> {
        self.observations.iter().map(|o| o.coordinate).collect()
    }

    pub fn fix_coordinates(&self) -> Vec<GeoCoordinate> {
        self.fixes.iter().map(|f| f.position).collect()
    }

    pub fn has_fix_behind_observer(&self) -> bool {
        self.fixes.iter().any(|f| f.behind_observer)
    }
}

fn label(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}
