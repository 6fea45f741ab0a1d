use std::collections::HashSet;

use tracing::debug;

use crate::geometry::{Curve, Segment};
use crate::host::{ElementHost, ElementId};
use crate::math::points_coincide;

use super::FinishWall;

/// Joins every ordered pair of `walls` where one ends at the other's start.
///
/// Refused joins are logged and skipped. Returns the number of joins made.
pub(crate) fn join_adjacent<H: ElementHost + ?Sized>(
    host: &mut H,
    walls: &[FinishWall],
    tol: f64,
) -> usize {
    let mut joined = 0;
    for (i, a) in walls.iter().enumerate() {
        for (j, b) in walls.iter().enumerate() {
            if i == j || !points_coincide(&a.curve.end(), &b.curve.start(), tol) {
                continue;
            }
            match host.join(a.wall, b.wall) {
                Ok(()) => joined += 1,
                Err(e) => debug!(a = ?a.wall, b = ?b.wall, error = %e, "adjacent join refused"),
            }
        }
    }
    joined
}

/// Joins each finish wall to the pre-existing walls it lines.
///
/// A wall qualifies when its location curve passes closer to the finish
/// midpoint than the two thicknesses combined. Walls in `generated` are
/// never considered. Returns the number of joins made.
pub(crate) fn join_to_base<H: ElementHost + ?Sized>(
    host: &mut H,
    walls: &[FinishWall],
    generated: &HashSet<ElementId>,
) -> usize {
    let base: Vec<(ElementId, Segment, f64)> = host
        .walls()
        .into_iter()
        .filter(|id| !generated.contains(id))
        .filter_map(|id| Some((id, host.wall_curve(id).ok()?, host.wall_width(id).ok()?)))
        .collect();

    let mut joined = 0;
    for finish in walls {
        let mid = finish.curve.midpoint();
        for (id, curve, width) in &base {
            if curve.distance_to(&mid) >= finish.width + width || host.are_joined(finish.wall, *id) {
                continue;
            }
            match host.join(finish.wall, *id) {
                Ok(()) => joined += 1,
                Err(e) => debug!(finish = ?finish.wall, base = ?id, error = %e, "base join refused"),
            }
        }
    }
    joined
}
