use crate::host::ElementId;

use super::curve::Segment;

/// A piece of a space boundary together with the element that produced it.
#[derive(Debug, Clone)]
pub struct BoundarySegment {
    /// The boundary curve.
    pub segment: Segment,
    /// The bounding element, if the boundary comes from one (room separation
    /// lines have no owner).
    pub owner: Option<ElementId>,
}

impl BoundarySegment {
    /// Creates a boundary segment owned by `owner`.
    #[must_use]
    pub fn new(segment: Segment, owner: Option<ElementId>) -> Self {
        Self { segment, owner }
    }
}
