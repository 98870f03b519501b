//! Triangulation algorithms

pub mod bearing;
pub mod projection;
pub mod intersection;
pub mod triangulator;
pub mod resection;
pub mod bounds;

pub use bearing::{bearing_to_slope, Slope};
pub use projection::ProjectionReference;
pub use intersection::LineIntersector;
pub use triangulator::{validate_bearing_pair, PairFix, Resection, Triangulator};
pub use resection::{strategy_from_name, CyclicPairResection, ResectionStrategy};
pub use bounds::{bounds, BoundingBox};
