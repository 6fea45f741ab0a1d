use crate::error::Result;
use crate::math::polygon_2d::contains_point_2d;
use crate::math::{points_coincide, Point3, COINCIDENCE_TOLERANCE};

use super::curve::{Curve, Segment};

/// An ordered sequence of bounded curves approximating a planar contour.
///
/// The loop is closed when the end of the last segment coincides with the
/// start of the first one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurveLoop {
    segments: Vec<Segment>,
}

impl CurveLoop {
    /// Creates a loop from already ordered segments.
    #[must_use]
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Creates a closed loop of straight lines through `points`.
    ///
    /// The last point connects back to the first one.
    ///
    /// # Errors
    ///
    /// Returns an error if two consecutive points coincide.
    pub fn polygon(points: &[Point3]) -> Result<Self> {
        let n = points.len();
        let segments = (0..n)
            .map(|i| Segment::line(points[i], points[(i + 1) % n]))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { segments })
    }

    /// Returns the segments in order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Consumes the loop, returning its segments.
    #[must_use]
    pub fn into_segments(self) -> Vec<Segment> {
        self.segments
    }

    /// Appends a segment at the end of the loop.
    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if the loop has no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns `true` if the loop does not return to its start within `tol`.
    ///
    /// An empty loop is considered open.
    #[must_use]
    pub fn is_open(&self, tol: f64) -> bool {
        match (self.segments.first(), self.segments.last()) {
            (Some(first), Some(last)) => !points_coincide(&last.end(), &first.start(), tol),
            _ => true,
        }
    }

    /// Returns `true` if the loop returns to its start within the default tolerance.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        !self.is_open(COINCIDENCE_TOLERANCE)
    }

    /// Returns the start point of every segment, in order.
    #[must_use]
    pub fn vertices(&self) -> Vec<Point3> {
        self.segments.iter().map(Curve::start).collect()
    }

    /// Returns both end points of every segment.
    #[must_use]
    pub fn end_points(&self) -> Vec<Point3> {
        self.segments
            .iter()
            .flat_map(|s| [s.start(), s.end()])
            .collect()
    }

    /// Returns the total length of all segments.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.segments.iter().map(Curve::length).sum()
    }

    /// Returns the loop traversed in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            segments: self.segments.iter().rev().map(Segment::reversed).collect(),
        }
    }

    /// Even-odd point containment test against the loop's vertex polygon in XY.
    #[must_use]
    pub fn contains_point_2d(&self, point: &Point3) -> bool {
        contains_point_2d(&self.vertices(), point)
    }
}

impl<'a> IntoIterator for &'a CurveLoop {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn rect() -> CurveLoop {
        CurveLoop::polygon(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(4.0, 3.0, 0.0),
            Point3::new(0.0, 3.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn polygon_is_closed() {
        let l = rect();
        assert_eq!(l.len(), 4);
        assert!(l.is_closed());
        assert!((l.length() - 14.0).abs() < 1e-12);
    }

    #[test]
    fn open_chain() {
        let mut segs = rect().into_segments();
        segs.pop();
        let l = CurveLoop::new(segs);
        assert!(l.is_open(COINCIDENCE_TOLERANCE));
        assert!(CurveLoop::default().is_open(COINCIDENCE_TOLERANCE));
    }

    #[test]
    fn reversed_stays_closed() {
        let r = rect().reversed();
        assert!(r.is_closed());
        assert!((r.vertices()[0].y - 3.0).abs() < 1e-12);
    }

    #[test]
    fn containment() {
        let l = rect();
        assert!(l.contains_point_2d(&Point3::new(2.0, 1.0, 0.0)));
        assert!(!l.contains_point_2d(&Point3::new(5.0, 1.0, 0.0)));
    }
}
