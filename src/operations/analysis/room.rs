use std::hash::{Hash, Hasher};

use crate::error::{ContourError, Result};
use crate::geometry::CurveLoop;
use crate::math::{Point3, Vector3, RECTANGULAR_TOLERANCE};
use crate::naming::room_label;

use super::bounds::{oriented_bounds, Aabb, OrientedBounds};
use super::rectangular::{fit_rectangle, RectangleFit};
use super::section::SectionProperties;

/// Read-only geometric descriptor of one enclosed space.
///
/// The first contour is the outer perimeter, any further contours are
/// islands. Section properties are computed from the outer perimeter once at
/// construction. Two descriptors are equal when their labels are equal.
#[derive(Debug, Clone)]
pub struct RoomDescriptor {
    type_name: String,
    sequence: u32,
    label: String,
    contours: Vec<CurveLoop>,
    section: SectionProperties,
}

impl RoomDescriptor {
    /// Creates a descriptor from the outer perimeter.
    ///
    /// # Errors
    ///
    /// Returns `ContourError::Empty` for an empty loop, `ContourError::Malformed`
    /// for fewer than 3 vertices and `GeometryError::Degenerate` for a
    /// zero-area perimeter.
    pub fn new(type_name: impl Into<String>, sequence: u32, outer: CurveLoop) -> Result<Self> {
        if outer.is_empty() {
            return Err(ContourError::Empty.into());
        }
        let section = SectionProperties::from_vertices(&outer.vertices())?;
        let type_name = type_name.into();
        let label = room_label(&type_name, sequence);
        Ok(Self {
            type_name,
            sequence,
            label,
            contours: vec![outer],
            section,
        })
    }

    /// Returns a descriptor with `islands` stored after the outer perimeter.
    #[must_use]
    pub fn with_islands(mut self, islands: Vec<CurveLoop>) -> Self {
        self.contours.truncate(1);
        self.contours.extend(islands);
        self
    }

    /// Returns the `"{type} {seq:000}"` label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[must_use]
    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    /// Returns all contours, outer perimeter first.
    #[must_use]
    pub fn contours(&self) -> &[CurveLoop] {
        &self.contours
    }

    #[must_use]
    pub fn outer(&self) -> &CurveLoop {
        &self.contours[0]
    }

    #[must_use]
    pub fn islands(&self) -> &[CurveLoop] {
        &self.contours[1..]
    }

    #[must_use]
    pub fn has_islands(&self) -> bool {
        self.contours.len() > 1
    }

    #[must_use]
    pub fn section(&self) -> &SectionProperties {
        &self.section
    }

    #[must_use]
    pub fn area(&self) -> f64 {
        self.section.area
    }

    #[must_use]
    pub fn centroid(&self) -> Point3 {
        self.section.centroid
    }

    #[must_use]
    pub fn major(&self) -> Vector3 {
        self.section.major
    }

    #[must_use]
    pub fn minor(&self) -> Vector3 {
        self.section.minor
    }

    #[must_use]
    pub fn i1(&self) -> f64 {
        self.section.i1
    }

    #[must_use]
    pub fn i2(&self) -> f64 {
        self.section.i2
    }

    /// Rotation of the minor axis from +X in degrees.
    #[must_use]
    pub fn rotation_degrees(&self) -> f64 {
        self.section.rotation_degrees()
    }

    /// Tests the outer perimeter for rectangularity.
    ///
    /// Rooms with islands or arc edges are never rectangular.
    #[must_use]
    pub fn is_rectangular(&self) -> Option<RectangleFit> {
        if self.has_islands() {
            return None;
        }
        fit_rectangle(self.outer(), &self.section, RECTANGULAR_TOLERANCE)
    }

    /// Axis-aligned bounds over every contour.
    #[must_use]
    pub fn axis_aligned_bounds(&self) -> Option<Aabb> {
        Aabb::from_loops(&self.contours)
    }

    /// Minimum-area bounds of the outer perimeter over its own edge directions.
    #[must_use]
    pub fn oriented_bounds(&self) -> Option<OrientedBounds> {
        oriented_bounds(self.outer())
    }
}

impl PartialEq for RoomDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label
    }
}

impl Eq for RoomDescriptor {}

impl Hash for RoomDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.label.hash(state);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::collections::HashSet;

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> CurveLoop {
        CurveLoop::polygon(&[p(x0, y0), p(x1, y0), p(x1, y1), p(x0, y1)]).unwrap()
    }

    #[test]
    fn rectangle_descriptor() {
        let room = RoomDescriptor::new("Office", 7, rect(0.0, 0.0, 4.0, 3.0)).unwrap();
        assert_eq!(room.label(), "Office 007");
        assert_eq!(room.sequence(), 7);
        assert_relative_eq!(room.area(), 12.0, epsilon = 1e-9);
        assert_relative_eq!(room.i1(), 16.0, epsilon = 1e-9);
        assert_relative_eq!(room.major().dot(&room.minor()), 0.0);
        let fit = room.is_rectangular().unwrap();
        assert_relative_eq!(fit.width * fit.length, 12.0, epsilon = 1e-9);
        assert!(!room.has_islands());
    }

    #[test]
    fn islands_disable_rectangularity() {
        let room = RoomDescriptor::new("Hall", 1, rect(0.0, 0.0, 10.0, 6.0))
            .unwrap()
            .with_islands(vec![rect(4.0, 2.0, 5.0, 3.0)]);
        assert!(room.has_islands());
        assert_eq!(room.islands().len(), 1);
        assert!(room.is_rectangular().is_none());
        // Islands do not affect the section of the outer perimeter.
        assert_relative_eq!(room.area(), 60.0, epsilon = 1e-9);
        let bounds = room.axis_aligned_bounds().unwrap();
        assert_relative_eq!(bounds.width(), 10.0);
    }

    #[test]
    fn equality_follows_label() {
        let a = RoomDescriptor::new("Office", 1, rect(0.0, 0.0, 4.0, 3.0)).unwrap();
        let b = RoomDescriptor::new("Office", 1, rect(10.0, 0.0, 12.0, 2.0)).unwrap();
        let c = RoomDescriptor::new("Office", 2, rect(0.0, 0.0, 4.0, 3.0)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        let set: HashSet<_> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn empty_and_degenerate_loops_are_rejected() {
        assert!(RoomDescriptor::new("Office", 1, CurveLoop::default()).is_err());
        let sliver = CurveLoop::polygon(&[p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)]).unwrap();
        assert!(RoomDescriptor::new("Office", 1, sliver).is_err());
    }

    #[test]
    fn oriented_bounds_of_outer() {
        let room = RoomDescriptor::new("Office", 1, rect(1.0, 1.0, 3.0, 6.0)).unwrap();
        let obb = room.oriented_bounds().unwrap();
        assert_relative_eq!(obb.area(), 10.0, epsilon = 1e-9);
        assert_relative_eq!(room.rotation_degrees(), 90.0, epsilon = 1e-9);
    }
}
