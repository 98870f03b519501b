//! Error taxonomy and input validation

pub mod error;
pub mod input;

pub use error::{TriangulationError, TriangulationResult};
pub use input::{validate_coordinate, Axis, InputParser, ObservationFile, RawObservation};
