use crate::geometry::{Curve, Segment};
use crate::math::{points_coincide, Point3};

/// Checks that `segments` can form a single closed profile.
///
/// Requires at least three segments and every end point to be shared by
/// exactly two segment ends.
#[must_use]
pub fn validate_profile(segments: &[Segment], tol: f64) -> bool {
    if segments.len() < 3 {
        return false;
    }

    let mut nodes: Vec<(Point3, usize)> = Vec::with_capacity(segments.len());
    for p in segments.iter().flat_map(|s| [s.start(), s.end()]) {
        match nodes.iter_mut().find(|(q, _)| points_coincide(q, &p, tol)) {
            Some((_, count)) => *count += 1,
            None => nodes.push((p, 1)),
        }
    }
    nodes.iter().all(|&(_, count)| count == 2)
}
