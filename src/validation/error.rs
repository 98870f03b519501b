use std::fmt;

/// Failures of a triangulation run. None of them are retryable: the
/// computation is deterministic, so the same input fails the same way.
#[derive(Debug, Clone, PartialEq)]
pub enum TriangulationError {
    /// Two bearings used together are identical or exactly opposite
    InvalidBearingPair {
        first: usize,
        second: usize,
        bearing_first: f64,
        bearing_second: f64,
    },
    /// Converted lines are parallel (or within tolerance of it)
    ParallelLines { inclination_difference_deg: f64 },
    /// Input text or value could not be used
    MalformedInput {
        field: String,
        value: String,
        reason: String,
    },
    /// Run needs two or three observations
    InvalidObservationCount { count: usize },
    /// Reference latitude too close to a pole for the planar approximation
    DegenerateProjection { reference_lat: f64 },
    /// Intersection reprojects outside the geographic ranges
    FixOutOfRange {
        first: usize,
        second: usize,
        lat: f64,
        lon: f64,
    },
}

impl TriangulationError {
    pub fn malformed(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        TriangulationError::MalformedInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Errors caused by what the user supplied, as opposed to geometry that
    /// turned out unsolvable
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            TriangulationError::MalformedInput { .. }
                | TriangulationError::InvalidObservationCount { .. }
                | TriangulationError::InvalidBearingPair { .. }
        )
    }
}

impl fmt::Display for TriangulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriangulationError::InvalidBearingPair { first, second, bearing_first, bearing_second } => {
                write!(
                    f,
                    "Bearings cannot be 0 or 180 degrees apart: point {} ({}°) and point {} ({}°)",
                    first + 1, bearing_first, second + 1, bearing_second
                )
            }
            TriangulationError::ParallelLines { inclination_difference_deg } => {
                write!(f, "No unique intersection: lines are parallel (difference {:e}°)", inclination_difference_deg)
            }
            TriangulationError::MalformedInput { field, value, reason } => {
                write!(f, "Malformed {} '{}': {}", field, value, reason)
            }
            TriangulationError::InvalidObservationCount { count } => {
                write!(f, "Expected 2 or 3 observations, got {}", count)
            }
            TriangulationError::DegenerateProjection { reference_lat } => {
                write!(f, "Reference latitude {:.6}° is too close to a pole for planar projection", reference_lat)
            }
            TriangulationError::FixOutOfRange { first, second, lat, lon } => {
                write!(
                    f,
                    "Intersection of points {} and {} falls outside valid coordinates (lat {:.6}, lon {:.6})",
                    first + 1, second + 1, lat, lon
                )
            }
        }
    }
}

impl std::error::Error for TriangulationError {}

/// Result type for triangulation operations
pub type TriangulationResult<T> = Result<T, TriangulationError>;
