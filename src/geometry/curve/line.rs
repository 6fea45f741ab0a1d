use crate::error::{GeometryError, Result};
use crate::math::distance_2d::point_to_segment_distance;
use crate::math::{is_parallel, Point3, Vector3, TOLERANCE};

use super::{check_parameter, Curve};

/// A bounded straight line between two distinct points.
///
/// The parametric form is `P(t) = start + t * (end - start)` for `t` in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSegment {
    start: Point3,
    end: Point3,
}

impl LineSegment {
    /// Creates a new line segment.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the end points coincide.
    pub fn new(start: Point3, end: Point3) -> Result<Self> {
        if (end - start).norm() < TOLERANCE {
            return Err(GeometryError::Degenerate(format!(
                "zero-length line at ({}, {}, {})",
                start.x, start.y, start.z
            ))
            .into());
        }
        Ok(Self { start, end })
    }

    /// Returns the unit direction from start to end.
    #[must_use]
    pub fn direction(&self) -> Vector3 {
        (self.end - self.start).normalize()
    }

    /// Returns the midpoint.
    #[must_use]
    pub fn midpoint(&self) -> Point3 {
        nalgebra::center(&self.start, &self.end)
    }

    /// Projects `p` onto the unbounded line carrying this segment.
    ///
    /// Returns the signed distance from `start` along the direction, and the
    /// projected point. The distance is not clamped to the segment.
    #[must_use]
    pub fn project_unbounded(&self, p: &Point3) -> (f64, Point3) {
        let dir = self.direction();
        let s = (p - self.start).dot(&dir);
        (s, self.start + dir * s)
    }

    /// Returns the point at signed distance `s` from `start` on the carrying line.
    #[must_use]
    pub fn point_at_distance(&self, s: f64) -> Point3 {
        self.start + self.direction() * s
    }

    /// Returns `true` if both segments are parallel within `tol` and every
    /// sample of `other` lies on this segment's carrying line.
    #[must_use]
    pub fn is_collinear_with(&self, other: &Self, tol: f64) -> bool {
        if !is_parallel(&self.direction(), &other.direction(), tol) {
            return false;
        }
        other.tessellate().iter().all(|p| {
            let (_, proj) = self.project_unbounded(p);
            (proj - p).norm() <= tol
        })
    }

    /// Returns a copy moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: &Vector3) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }

    /// Returns the segment traversed end to start.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }

    /// Returns the segment lengthened by `by` at both ends.
    ///
    /// # Errors
    ///
    /// Returns an error if a negative `by` collapses the segment.
    pub fn extended(&self, by: f64) -> Result<Self> {
        let dir = self.direction();
        Self::new(self.start - dir * by, self.end + dir * by)
    }
}

impl Curve for LineSegment {
    fn start(&self) -> Point3 {
        self.start
    }

    fn end(&self) -> Point3 {
        self.end
    }

    fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    fn evaluate(&self, t: f64) -> Result<Point3> {
        check_parameter(t)?;
        Ok(self.start + (self.end - self.start) * t)
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        check_parameter(t)?;
        Ok(self.direction())
    }

    fn tessellate(&self) -> Vec<Point3> {
        vec![self.start, self.end]
    }

    fn closest_parameter(&self, p: &Point3) -> f64 {
        let (s, _) = self.project_unbounded(p);
        (s / self.length()).clamp(0.0, 1.0)
    }

    fn distance_to(&self, p: &Point3) -> f64 {
        point_to_segment_distance(p, &self.start, &self.end)
    }
}
