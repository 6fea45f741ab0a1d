use tracing::debug;

use crate::error::{ContourError, Result};
use crate::geometry::{Curve, CurveLoop, Segment};
use crate::math::{points_coincide, Point3, COINCIDENCE_TOLERANCE};

/// Rebuilds a closed polygonal loop from loosely ordered boundary pieces.
///
/// Consecutive duplicate points are merged, the chain is closed back to its
/// first point, and zero-length segments are dropped. Arcs degrade to their
/// chords. An empty input yields an empty loop.
pub struct RebuildCurveLoop {
    pieces: Vec<Segment>,
    tolerance: f64,
    bridge_gaps: bool,
}

impl RebuildCurveLoop {
    /// Creates a new `RebuildCurveLoop` operation over `pieces`.
    #[must_use]
    pub fn new(pieces: Vec<Segment>) -> Self {
        Self {
            pieces,
            tolerance: COINCIDENCE_TOLERANCE,
            bridge_gaps: false,
        }
    }

    /// Creates the operation from an existing loop.
    #[must_use]
    pub fn from_loop(curve_loop: &CurveLoop) -> Self {
        Self::new(curve_loop.segments().to_vec())
    }

    /// Sets the point coincidence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Keeps the end point of every piece, so a gap between two pieces
    /// becomes an explicit bridging segment instead of being cut across.
    #[must_use]
    pub fn bridge_gaps(mut self, bridge: bool) -> Self {
        self.bridge_gaps = bridge;
        self
    }

    /// Executes the rebuild.
    ///
    /// # Errors
    ///
    /// Returns `ContourError::Malformed` if fewer than 3 distinct points remain.
    pub fn execute(&self) -> Result<CurveLoop> {
        let Some(last_piece) = self.pieces.last() else {
            return Ok(CurveLoop::default());
        };

        let mut points: Vec<Point3> = Vec::with_capacity(self.pieces.len() + 2);
        for piece in &self.pieces {
            self.push_distinct(&mut points, piece.start());
            if self.bridge_gaps {
                self.push_distinct(&mut points, piece.end());
            }
        }
        self.push_distinct(&mut points, last_piece.end());

        // Snap the closing point exactly onto the first one.
        if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
            if points.len() > 1 && points_coincide(&first, &last, self.tolerance) {
                points.pop();
            }
            points.push(first);
        }

        let distinct = points.len() - 1;
        if distinct < 3 {
            return Err(ContourError::Malformed { points: distinct }.into());
        }

        let mut segments = Vec::with_capacity(distinct);
        for pair in points.windows(2) {
            if points_coincide(&pair[0], &pair[1], self.tolerance) {
                continue;
            }
            segments.push(Segment::line(pair[0], pair[1])?);
        }

        debug!(
            pieces = self.pieces.len(),
            segments = segments.len(),
            "rebuilt curve loop"
        );
        Ok(CurveLoop::new(segments))
    }

    fn push_distinct(&self, points: &mut Vec<Point3>, p: Point3) {
        if points
            .last()
            .map_or(true, |last| !points_coincide(last, &p, self.tolerance))
        {
            points.push(p);
        }
    }
}
