//! Bearing Triangulation
//!
//! Locates an unknown position from compass bearings observed at two or three
//! known coordinates, using an equirectangular projection around the mean of
//! the known points.

pub mod core;
pub mod algorithms;
pub mod validation;
pub mod utils;
pub mod api;

// Re-export commonly used types
pub use crate::core::{Bearing, GeoCoordinate, Observation, PlanarPoint};
pub use algorithms::{
    bearing_to_slope, bounds, BoundingBox, CyclicPairResection, LineIntersector, PairFix,
    ProjectionReference, Resection, ResectionStrategy, Slope, Triangulator,
};
pub use validation::{InputParser, TriangulationError, TriangulationResult};
pub use utils::{ConfigError, TriangulationConfig};
pub use api::{render, MapOverlay, OutputFormat, TriangulationReport, TriangulationSession};
