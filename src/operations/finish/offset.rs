use crate::error::{GeometryError, Result, RoomformError};
use crate::geometry::{BoundarySegment, Curve, Segment};
use crate::host::Space;
use crate::operations::contour::ResolveOverlaps;
use crate::math::intersect_2d::{line_circle_intersections, line_line_intersection};
use crate::math::{points_coincide, Point3, COINCIDENCE_TOLERANCE, MIN_SEGMENT_LENGTH};

/// Result of offsetting one boundary piece.
#[derive(Debug)]
pub enum OffsetPiece {
    Offset(Segment),
    /// Shorter than the minimum segment length.
    TooShort,
    Failed(RoomformError),
}

/// Moves the pieces of one boundary loop toward the inside of a space.
///
/// Each piece is translated by `distance` along the unit vector from its
/// chord midpoint to the space center. Consecutive pieces that met in the
/// source loop are then trimmed or extended to meet again.
pub struct OffsetBoundary<'a> {
    space: &'a Space,
    distance: f64,
    min_length: f64,
    tolerance: f64,
}

impl<'a> OffsetBoundary<'a> {
    /// Creates a new `OffsetBoundary` operation.
    #[must_use]
    pub fn new(space: &'a Space, distance: f64) -> Self {
        Self {
            space,
            distance,
            min_length: MIN_SEGMENT_LENGTH,
            tolerance: COINCIDENCE_TOLERANCE,
        }
    }

    /// Sets the length below which pieces are skipped.
    #[must_use]
    pub fn with_min_length(mut self, min_length: f64) -> Self {
        self.min_length = min_length;
        self
    }

    /// Sets the point coincidence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Offsets `pieces`, which must be in loop order.
    #[must_use]
    pub fn execute(&self, pieces: &[&BoundarySegment]) -> Vec<OffsetPiece> {
        let mut out: Vec<OffsetPiece> = pieces.iter().map(|b| self.offset(&b.segment)).collect();

        let n = pieces.len();
        if n < 2 {
            return out;
        }
        for k in 0..n {
            let next = (k + 1) % n;
            if n == 2 && next == 0 {
                break;
            }
            let (source_a, source_b) = (&pieces[k].segment, &pieces[next].segment);
            if !points_coincide(&source_a.end(), &source_b.start(), self.tolerance) {
                continue;
            }
            if let (OffsetPiece::Offset(a), OffsetPiece::Offset(b)) = (&out[k], &out[next]) {
                if let Some((a, b)) = connect_corner(a, b, self.tolerance) {
                    out[k] = OffsetPiece::Offset(a);
                    out[next] = OffsetPiece::Offset(b);
                }
            }
        }
        out
    }

    fn offset(&self, segment: &Segment) -> OffsetPiece {
        if segment.length() < self.min_length {
            return OffsetPiece::TooShort;
        }
        match self.space.inward_direction(segment) {
            Some(dir) => OffsetPiece::Offset(segment.translated(&(dir * self.distance))),
            None => OffsetPiece::Failed(GeometryError::ZeroVector.into()),
        }
    }
}

/// Trims or extends `a`'s end and `b`'s start to a common corner point.
///
/// Returns `None` when the ends already meet, the carriers do not intersect,
/// or moving the ends would reverse either curve. Two arcs are left alone.
#[must_use]
pub fn connect_corner(a: &Segment, b: &Segment, tol: f64) -> Option<(Segment, Segment)> {
    if points_coincide(&a.end(), &b.start(), tol) {
        return None;
    }

    match (a, b) {
        (Segment::Line(la), Segment::Line(lb)) => {
            let corner =
                line_line_intersection(&la.start(), &la.direction(), &lb.start(), &lb.direction())?;
            let a2 = Segment::line(la.start(), corner).ok()?;
            let b2 = Segment::line(corner, lb.end()).ok()?;
            let keeps_direction = a2.direction()?.dot(&la.direction()) > 0.0
                && b2.direction()?.dot(&lb.direction()) > 0.0;
            keeps_direction.then_some((a2, b2))
        }
        (Segment::Line(la), Segment::Arc(arc)) => {
            let near = arc.start();
            let corner = nearest(
                line_circle_intersections(&la.start(), &la.direction(), arc.center(), arc.radius()),
                &near,
            )?;
            let b2 = arc.trim_or_extend_start_to(&corner).ok()?;
            let a2 = Segment::line(la.start(), b2.start()).ok()?;
            (a2.direction()?.dot(&la.direction()) > 0.0).then_some((a2, b2.into()))
        }
        (Segment::Arc(arc), Segment::Line(lb)) => {
            let near = arc.end();
            let corner = nearest(
                line_circle_intersections(&lb.start(), &lb.direction(), arc.center(), arc.radius()),
                &near,
            )?;
            let a2 = arc.trim_or_extend_end_to(&corner).ok()?;
            let b2 = Segment::line(a2.end(), lb.end()).ok()?;
            (b2.direction()?.dot(&lb.direction()) > 0.0).then_some((a2.into(), b2))
        }
        (Segment::Arc(_), Segment::Arc(_)) => None,
    }
}

/// Cuts doubled runs out of the offset curves of one loop.
///
/// Collinear overlaps between `curves` are removed with [`ResolveOverlaps`]
/// and every remaining piece is handed back to the curve it lies on, in
/// that curve's direction and ordered along it. `None` entries and curves
/// covered entirely by others get an empty run.
///
/// # Errors
///
/// Returns `OperationError::OverlapDivergence` if the overlaps do not settle.
pub(crate) fn separate_overlaps(curves: &[Option<&Segment>], tol: f64) -> Result<Vec<Vec<Segment>>> {
    let input: Vec<Segment> = curves.iter().flatten().map(|c| (*c).clone()).collect();
    let resolved = ResolveOverlaps::new(input.clone())
        .with_tolerance(tol)
        .execute()?;
    if resolved == input {
        return Ok(curves
            .iter()
            .map(|c| (*c).map(|c| vec![c.clone()]).unwrap_or_default())
            .collect());
    }

    let mut runs = vec![Vec::new(); curves.len()];
    for piece in resolved {
        let mid = piece.midpoint();
        let Some((k, owner)) = curves
            .iter()
            .enumerate()
            .find_map(|(k, c)| (*c).filter(|c| c.distance_to(&mid) < tol).map(|c| (k, c)))
        else {
            continue;
        };
        let opposed = matches!(
            (piece.direction(), owner.direction()),
            (Some(d), Some(o)) if d.dot(&o) < 0.0
        );
        runs[k].push(if opposed { piece.reversed() } else { piece });
    }
    for (run, owner) in runs.iter_mut().zip(curves) {
        if let Some(owner) = owner {
            run.sort_by(|a, b| {
                owner
                    .closest_parameter(&a.start())
                    .total_cmp(&owner.closest_parameter(&b.start()))
            });
        }
    }
    Ok(runs)
}

fn nearest(points: Vec<Point3>, target: &Point3) -> Option<Point3> {
    points
        .into_iter()
        .min_by(|p, q| (p - target).norm().total_cmp(&(q - target).norm()))
}
