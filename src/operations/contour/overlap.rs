use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::{Curve, LineSegment, Segment};
use crate::math::COINCIDENCE_TOLERANCE;

/// Maximum number of scan passes before the resolution is declared divergent.
pub const MAX_OVERLAP_PASSES: usize = 100;

/// Removes collinear overlaps from a set of line segments.
///
/// Each pass scans ordered pairs `(a, b)`. When `a` lies on the carrying
/// line of `b` and their spans overlap, both are replaced by the pieces
/// of the pair's union not covered by both: the part from `b`'s start to
/// the near end of `a`'s projection, and from the far end of `a`'s
/// projection to `b`'s end. Pieces shorter than the tolerance are dropped.
/// Passes repeat until nothing changes. Arcs pass through untouched.
pub struct ResolveOverlaps {
    segments: Vec<Segment>,
    tolerance: f64,
}

impl ResolveOverlaps {
    /// Creates a new `ResolveOverlaps` operation.
    #[must_use]
    pub fn new(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            tolerance: COINCIDENCE_TOLERANCE,
        }
    }

    /// Sets the collinearity and sliver tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the resolution, returning an overlap-free segment set.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::OverlapDivergence` if more than
    /// [`MAX_OVERLAP_PASSES`] passes are needed.
    pub fn execute(&self) -> Result<Vec<Segment>> {
        let mut list = self.segments.clone();
        let mut passes = 0;
        loop {
            passes += 1;
            if passes > MAX_OVERLAP_PASSES {
                return Err(OperationError::OverlapDivergence {
                    passes: MAX_OVERLAP_PASSES,
                }
                .into());
            }

            let Some((i, j, residuals)) = self.find_overlap(&list) else {
                break;
            };
            let (hi, lo) = if i > j { (i, j) } else { (j, i) };
            list.remove(hi);
            list.remove(lo);
            list.extend(residuals);
        }

        debug!(
            input = self.segments.len(),
            output = list.len(),
            passes,
            "resolved collinear overlaps"
        );
        Ok(list)
    }

    fn find_overlap(&self, list: &[Segment]) -> Option<(usize, usize, Vec<Segment>)> {
        for (i, a) in list.iter().enumerate() {
            let Segment::Line(a) = a else { continue };
            for (j, b) in list.iter().enumerate() {
                if i == j {
                    continue;
                }
                let Segment::Line(b) = b else { continue };
                if let Some(residuals) = self.split(a, b) {
                    return Some((i, j, residuals));
                }
            }
        }
        None
    }

    /// Returns the residual pieces if `a` overlaps `b`, `None` otherwise.
    fn split(&self, a: &LineSegment, b: &LineSegment) -> Option<Vec<Segment>> {
        if !b.is_collinear_with(a, self.tolerance) {
            return None;
        }

        let (s0, _) = b.project_unbounded(&a.start());
        let (s1, _) = b.project_unbounded(&a.end());
        let (s0, s1) = if s1 < s0 { (s1, s0) } else { (s0, s1) };

        let overlap = s1.min(b.length()) - s0.max(0.0);
        if overlap <= self.tolerance {
            return None;
        }

        let near = b.point_at_distance(s0);
        let far = b.point_at_distance(s1);
        let mut residuals = Vec::with_capacity(2);
        if (near - b.start()).norm() > self.tolerance {
            residuals.push(Segment::line(b.start(), near).ok()?);
        }
        if (b.end() - far).norm() > self.tolerance {
            residuals.push(Segment::line(far, b.end()).ok()?);
        }
        Some(residuals)
    }
}
