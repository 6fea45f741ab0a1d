mod arc;
mod line;

pub use arc::ArcSegment;
pub use line::LineSegment;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

/// Trait for bounded planar curves.
///
/// Parameters are normalized: `0.0` is the start point and `1.0` the end point.
pub trait Curve {
    /// Returns the start point.
    fn start(&self) -> Point3;

    /// Returns the end point.
    fn end(&self) -> Point3;

    /// Returns the curve length.
    fn length(&self) -> f64;

    /// Evaluates the curve at normalized parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ParameterOutOfRange` if `t` is outside `[0, 1]`.
    fn evaluate(&self, t: f64) -> Result<Point3>;

    /// Computes the unit tangent at normalized parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns an error if `t` is out of range or the curve is degenerate.
    fn tangent(&self, t: f64) -> Result<Vector3>;

    /// Samples points along the curve, start and end included.
    fn tessellate(&self) -> Vec<Point3>;

    /// Returns the normalized parameter of the point on the curve closest to `p`.
    fn closest_parameter(&self, p: &Point3) -> f64;

    /// Returns the planar distance from `p` to the curve.
    fn distance_to(&self, p: &Point3) -> f64;
}

pub(crate) fn check_parameter(t: f64) -> Result<()> {
    if (-TOLERANCE..=1.0 + TOLERANCE).contains(&t) {
        Ok(())
    } else {
        Err(GeometryError::ParameterOutOfRange {
            parameter: "t",
            value: t,
            min: 0.0,
            max: 1.0,
        }
        .into())
    }
}

/// A bounded boundary curve: either a straight line or a circular arc.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// A straight line segment.
    Line(LineSegment),
    /// A circular arc in the XY plane.
    Arc(ArcSegment),
}

impl Segment {
    /// Creates a line segment between two points.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the points coincide.
    pub fn line(start: Point3, end: Point3) -> Result<Self> {
        Ok(Self::Line(LineSegment::new(start, end)?))
    }

    /// Returns the unit direction of a line segment, `None` for arcs.
    #[must_use]
    pub fn direction(&self) -> Option<Vector3> {
        match self {
            Self::Line(l) => Some(l.direction()),
            Self::Arc(_) => None,
        }
    }

    /// Returns the line variant, if any.
    #[must_use]
    pub fn as_line(&self) -> Option<&LineSegment> {
        match self {
            Self::Line(l) => Some(l),
            Self::Arc(_) => None,
        }
    }

    /// Returns the arc variant.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NotAnArc` for line segments.
    pub fn as_arc(&self) -> Result<&ArcSegment> {
        match self {
            Self::Arc(a) => Ok(a),
            Self::Line(_) => Err(GeometryError::NotAnArc.into()),
        }
    }

    /// Returns the point halfway along the curve.
    #[must_use]
    pub fn midpoint(&self) -> Point3 {
        match self {
            Self::Line(l) => l.midpoint(),
            Self::Arc(a) => a.point_at(0.5),
        }
    }

    /// Returns the straight chord from start to end.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` for a curve whose ends coincide.
    pub fn chord(&self) -> Result<LineSegment> {
        LineSegment::new(self.start(), self.end())
    }

    /// Returns a copy moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: &Vector3) -> Self {
        match self {
            Self::Line(l) => Self::Line(l.translated(offset)),
            Self::Arc(a) => Self::Arc(a.translated(offset)),
        }
    }

    /// Returns the same curve traversed end to start.
    #[must_use]
    pub fn reversed(&self) -> Self {
        match self {
            Self::Line(l) => Self::Line(l.reversed()),
            Self::Arc(a) => Self::Arc(a.reversed()),
        }
    }

    /// Returns the curve lengthened by `by` at both ends.
    ///
    /// # Errors
    ///
    /// Returns an error if shortening (negative `by`) collapses the curve.
    pub fn extended(&self, by: f64) -> Result<Self> {
        Ok(match self {
            Self::Line(l) => Self::Line(l.extended(by)?),
            Self::Arc(a) => Self::Arc(a.extended(by)?),
        })
    }

    /// Returns `true` if the start point is closer to `p` than the end point.
    #[must_use]
    pub fn is_start_closer(&self, p: &Point3) -> bool {
        (self.start() - p).norm() < (self.end() - p).norm()
    }
}

impl Curve for Segment {
    fn start(&self) -> Point3 {
        match self {
            Self::Line(l) => l.start(),
            Self::Arc(a) => a.start(),
        }
    }

    fn end(&self) -> Point3 {
        match self {
            Self::Line(l) => l.end(),
            Self::Arc(a) => a.end(),
        }
    }

    fn length(&self) -> f64 {
        match self {
            Self::Line(l) => l.length(),
            Self::Arc(a) => a.length(),
        }
    }

    fn evaluate(&self, t: f64) -> Result<Point3> {
        match self {
            Self::Line(l) => l.evaluate(t),
            Self::Arc(a) => a.evaluate(t),
        }
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        match self {
            Self::Line(l) => l.tangent(t),
            Self::Arc(a) => a.tangent(t),
        }
    }

    fn tessellate(&self) -> Vec<Point3> {
        match self {
            Self::Line(l) => l.tessellate(),
            Self::Arc(a) => a.tessellate(),
        }
    }

    fn closest_parameter(&self, p: &Point3) -> f64 {
        match self {
            Self::Line(l) => l.closest_parameter(p),
            Self::Arc(a) => a.closest_parameter(p),
        }
    }

    fn distance_to(&self, p: &Point3) -> f64 {
        match self {
            Self::Line(l) => l.distance_to(p),
            Self::Arc(a) => a.distance_to(p),
        }
    }
}

impl From<LineSegment> for Segment {
    fn from(l: LineSegment) -> Self {
        Self::Line(l)
    }
}

impl From<ArcSegment> for Segment {
    fn from(a: ArcSegment) -> Self {
        Self::Arc(a)
    }
}

/// Returns the first pair of coincident endpoints between two curves.
///
/// Pairs are tested start/start, end/start, start/end, end/end; the point
/// from `a` is returned.
#[must_use]
pub fn shared_endpoint(a: &Segment, b: &Segment, tol: f64) -> Option<Point3> {
    let (a0, a1, b0, b1) = (a.start(), a.end(), b.start(), b.end());
    [(a0, b0), (a1, b0), (a0, b1), (a1, b1)]
        .into_iter()
        .find(|(pa, pb)| (pb - pa).norm() < tol)
        .map(|(pa, _)| pa)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    #[test]
    fn line_dispatch() {
        let s = Segment::line(p(0.0, 0.0), p(3.0, 4.0)).unwrap();
        assert!((s.length() - 5.0).abs() < TOLERANCE);
        assert!(s.direction().is_some());
        assert!(s.as_arc().is_err());
        let m = s.midpoint();
        assert!((m.x - 1.5).abs() < TOLERANCE);
    }

    #[test]
    fn arc_dispatch() {
        let a: Segment = ArcSegment::new(p(0.0, 0.0), 2.0, 0.0, PI).unwrap().into();
        assert!(a.direction().is_none());
        assert!(a.as_arc().is_ok());
        assert!((a.length() - 2.0 * PI).abs() < 1e-9);
        let chord = a.chord().unwrap();
        assert!((chord.length() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn shared_endpoint_finds_touching_corner() {
        let a = Segment::line(p(0.0, 0.0), p(1.0, 0.0)).unwrap();
        let b = Segment::line(p(1.0, 0.0), p(1.0, 1.0)).unwrap();
        let c = Segment::line(p(5.0, 5.0), p(6.0, 5.0)).unwrap();
        let shared = shared_endpoint(&a, &b, 1e-4).unwrap();
        assert!((shared.x - 1.0).abs() < TOLERANCE);
        assert!(shared_endpoint(&a, &c, 1e-4).is_none());
    }

    #[test]
    fn start_closer() {
        let a = Segment::line(p(0.0, 0.0), p(10.0, 0.0)).unwrap();
        assert!(a.is_start_closer(&p(1.0, 1.0)));
        assert!(!a.reversed().is_start_closer(&p(1.0, 1.0)));
    }

    #[test]
    fn evaluate_out_of_range() {
        let a = Segment::line(p(0.0, 0.0), p(10.0, 0.0)).unwrap();
        assert!(a.evaluate(1.5).is_err());
        assert!(a.evaluate(1.0).is_ok());
    }
}
