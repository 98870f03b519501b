//! Run-level API and report formatting

pub mod types;
pub mod session;
pub mod formatting;

pub use types::{OutputFormat, TriangulationReport};
pub use session::TriangulationSession;
pub use formatting::{render, JsonFormatter, MapOverlay, TextFormatter};
