mod close;
mod overlap;
mod polygon_from_points;
mod profile;
mod rebuild;

pub use close::CloseCurveLoop;
pub use overlap::{ResolveOverlaps, MAX_OVERLAP_PASSES};
pub use polygon_from_points::PolygonFromPoints;
pub use profile::validate_profile;
pub use rebuild::RebuildCurveLoop;
