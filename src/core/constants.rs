//! Numeric constants and defaults

/// Default tolerance (degrees) below which two line inclinations are parallel
pub const DEFAULT_PARALLEL_TOLERANCE_DEG: f64 = 1e-6;

/// Smallest cosine of the reference latitude the projection accepts
pub const MIN_PROJECTION_COSINE: f64 = 1e-3;

/// Fewest observations a run accepts
pub const MIN_OBSERVATIONS: usize = 2;

/// Most observations a run accepts
pub const MAX_OBSERVATIONS: usize = 3;
