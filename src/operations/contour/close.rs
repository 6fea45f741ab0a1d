use crate::error::{ContourError, Result};
use crate::geometry::{Curve, CurveLoop, Segment};
use crate::math::COINCIDENCE_TOLERANCE;

/// Closes an open loop with a straight segment from its end back to its start.
///
/// A loop that is already closed is returned unchanged.
pub struct CloseCurveLoop<'a> {
    curve_loop: &'a CurveLoop,
    tolerance: f64,
}

impl<'a> CloseCurveLoop<'a> {
    /// Creates a new `CloseCurveLoop` operation.
    #[must_use]
    pub fn new(curve_loop: &'a CurveLoop) -> Self {
        Self {
            curve_loop,
            tolerance: COINCIDENCE_TOLERANCE,
        }
    }

    /// Sets the point coincidence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns `ContourError::Empty` for a loop without segments.
    pub fn execute(&self) -> Result<CurveLoop> {
        let (Some(first), Some(last)) = (
            self.curve_loop.segments().first(),
            self.curve_loop.segments().last(),
        ) else {
            return Err(ContourError::Empty.into());
        };

        let mut closed = self.curve_loop.clone();
        if self.curve_loop.is_open(self.tolerance) {
            closed.push(Segment::line(last.end(), first.start())?);
        }
        Ok(closed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    #[test]
    fn closing_a_closed_loop_is_a_no_op() {
        let closed = CurveLoop::polygon(&[p(0.0, 0.0), p(4.0, 0.0), p(4.0, 3.0)]).unwrap();
        let again = CloseCurveLoop::new(&closed).execute().unwrap();
        assert_eq!(again, closed);
    }

    #[test]
    fn open_loop_gets_closing_segment() {
        let open = CurveLoop::new(vec![
            Segment::line(p(0.0, 0.0), p(4.0, 0.0)).unwrap(),
            Segment::line(p(4.0, 0.0), p(4.0, 3.0)).unwrap(),
        ]);
        let closed = CloseCurveLoop::new(&open).execute().unwrap();
        assert_eq!(closed.len(), 3);
        assert!(closed.is_closed());
    }

    #[test]
    fn empty_loop_is_rejected() {
        assert!(CloseCurveLoop::new(&CurveLoop::default()).execute().is_err());
    }
}
