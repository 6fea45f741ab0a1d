mod bounds;
mod rectangular;
mod room;
mod section;

pub use bounds::{oriented_bounds, Aabb, OrientedBounds};
pub use rectangular::{fit_rectangle, RectangleFit};
pub use room::RoomDescriptor;
pub use section::SectionProperties;
