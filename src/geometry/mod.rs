pub mod boundary;
pub mod curve;
pub mod curve_loop;

pub use boundary::BoundarySegment;
pub use curve::{shared_endpoint, ArcSegment, Curve, LineSegment, Segment};
pub use curve_loop::CurveLoop;
