use crate::geometry::{BoundarySegment, Curve, Segment};
use crate::math::{Point3, Vector3};
use crate::operations::analysis::Aabb;

use super::ElementId;

/// An enclosed space as reported by the host's boundary source.
#[derive(Debug, Clone, Default)]
pub struct Space {
    /// Room name, used as the label type.
    pub name: String,
    pub level: Option<ElementId>,
    /// Explicit location point placed inside the space.
    pub location: Option<Point3>,
    /// Room height, when the host reports one.
    pub height: Option<f64>,
    /// Boundary loops, outer perimeter first.
    pub boundaries: Vec<Vec<BoundarySegment>>,
}

impl Space {
    /// Creates an unplaced space with no boundaries.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: ElementId) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: Point3) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    /// Appends a boundary loop.
    #[must_use]
    pub fn with_boundary(mut self, boundary: Vec<BoundarySegment>) -> Self {
        self.boundaries.push(boundary);
        self
    }

    /// Representative interior point: the location point if placed,
    /// otherwise the center of the boundary's bounding box.
    #[must_use]
    pub fn center(&self) -> Option<Point3> {
        if let Some(location) = self.location {
            return Some(location);
        }
        let points: Vec<Point3> = self
            .boundaries
            .iter()
            .flatten()
            .flat_map(|b| [b.segment.start(), b.segment.end()])
            .collect();
        let bounds = Aabb::from_points(&points)?;
        let z = points.first().map_or(0.0, |p| p.z);
        let c = bounds.center();
        Some(Point3::new(c.x, c.y, z))
    }

    /// Unit vector from the midpoint of `curve`'s chord toward [`Space::center`].
    ///
    /// Returns `None` when the space has no center or the midpoint coincides with it.
    #[must_use]
    pub fn inward_direction(&self, curve: &Segment) -> Option<Vector3> {
        let mid = nalgebra::center(&curve.start(), &curve.end());
        let center = self.center()?;
        (center - mid).try_normalize(f64::EPSILON)
    }

    /// Room height, falling back to `default` when the host reports none.
    #[must_use]
    pub fn height_or(&self, default: f64) -> f64 {
        self.height.unwrap_or(default)
    }

    /// Boundary pieces owned by an element accepted by `is_base`, per loop
    /// and in loop order. Loops without such pieces are left out.
    #[must_use]
    pub fn boundaries_owned_by<F>(&self, is_base: F) -> Vec<Vec<&BoundarySegment>>
    where
        F: Fn(ElementId) -> bool,
    {
        self.boundaries
            .iter()
            .map(|boundary| {
                boundary
                    .iter()
                    .filter(|b| b.owner.is_some_and(&is_base))
                    .collect::<Vec<_>>()
            })
            .filter(|owned| !owned.is_empty())
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    fn square_space() -> Space {
        let corners = [p(0.0, 0.0), p(4.0, 0.0), p(4.0, 2.0), p(0.0, 2.0)];
        let boundary = (0..4)
            .map(|i| {
                let seg = Segment::line(corners[i], corners[(i + 1) % 4]).unwrap();
                BoundarySegment::new(seg, None)
            })
            .collect();
        Space::new("Office").with_boundary(boundary)
    }

    #[test]
    fn center_falls_back_to_bounding_box() {
        let space = square_space();
        let c = space.center().unwrap();
        assert_relative_eq!(c.x, 2.0);
        assert_relative_eq!(c.y, 1.0);

        let placed = square_space().with_location(p(1.0, 1.5));
        assert_relative_eq!(placed.center().unwrap().x, 1.0);
    }

    #[test]
    fn inward_direction_points_to_center() {
        let space = square_space();
        let bottom = Segment::line(p(0.0, 0.0), p(4.0, 0.0)).unwrap();
        let dir = space.inward_direction(&bottom).unwrap();
        assert_relative_eq!(dir.y, 1.0);
        assert!(Space::new("Empty").inward_direction(&bottom).is_none());
    }

    #[test]
    fn height_defaults() {
        assert_relative_eq!(Space::new("A").height_or(3.0), 3.0);
        assert_relative_eq!(Space::new("A").with_height(2.7).height_or(3.0), 2.7);
    }

    #[test]
    fn owned_pieces_keep_their_loops() {
        let mut ids: slotmap::SlotMap<ElementId, ()> = slotmap::SlotMap::with_key();
        let (wall, separator) = (ids.insert(()), ids.insert(()));
        let piece = |x: f64, owner| {
            BoundarySegment::new(Segment::line(p(x, 0.0), p(x + 1.0, 0.0)).unwrap(), owner)
        };
        let space = Space::new("Office")
            .with_boundary(vec![piece(0.0, Some(wall)), piece(1.0, None), piece(2.0, Some(wall))])
            .with_boundary(vec![piece(5.0, Some(separator))]);

        let owned = space.boundaries_owned_by(|id| id == wall);
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].len(), 2);
        assert_relative_eq!(owned[0][1].segment.start().x, 2.0);
    }
}
