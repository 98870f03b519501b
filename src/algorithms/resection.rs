//! Resection strategies: which observation pairs to triangulate and how to
//! combine their fixes into one estimate

use std::fmt;

use crate::algorithms::triangulator::PairFix;
use crate::core::{GeoCoordinate, MAX_OBSERVATIONS, MIN_OBSERVATIONS};
use crate::validation::{TriangulationError, TriangulationResult};

/// Policy for combining pairwise triangulation results
pub trait ResectionStrategy: fmt::Debug {
    /// Stable identifier, also used in configuration files
    fn name(&self) -> &'static str;

    /// Observation index pairs to triangulate for `count` observations
    fn pairs(&self, count: usize) -> TriangulationResult<Vec<(usize, usize)>>;

    /// Single estimate from the pairwise fixes; `None` when there are none
    fn fuse(&self, fixes: &[PairFix]) -> Option<GeoCoordinate>;
}

/// Triangulates cyclic adjacent pairs (1,2), (2,3), (3,1) and takes the
/// unweighted mean of the fixes. Two observations give the single pair (1,2).
///
/// A heuristic, not a least-squares fit.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CyclicPairResection;

impl CyclicPairResection {
    pub const NAME: &'static str = "cyclic-pair";
}

impl ResectionStrategy for CyclicPairResection {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn pairs(&self, count: usize) -> TriangulationResult<Vec<(usize, usize)>> {
        match count {
            2 => Ok(vec![(0, 1)]),
            n if (MIN_OBSERVATIONS..=MAX_OBSERVATIONS).contains(&n) => {
                Ok((0..n).map(|i| (i, (i + 1) % n)).collect())
            }
            n => Err(TriangulationError::InvalidObservationCount { count: n }),
        }
    }

    fn fuse(&self, fixes: &[PairFix]) -> Option<GeoCoordinate> {
        if fixes.is_empty() {
            return None;
        }
        let n = fixes.len() as f64;
        let (lat, lon) = fixes
            .iter()
            .fold((0.0, 0.0), |(lat, lon), fix| (lat + fix.position.lat, lon + fix.position.lon));
        Some(GeoCoordinate::new(lat / n, lon / n))
    }
}

/// Look up a strategy by its configured name
pub fn strategy_from_name(name: &str) -> Option<Box<dyn ResectionStrategy>> {
    match name {
        CyclicPairResection::NAME => Some(Box::new(CyclicPairResection)),
        _ => None,
    }
}
