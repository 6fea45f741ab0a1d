use tracing::debug;

use crate::geometry::{Curve, Segment};
use crate::host::{ElementId, SolidKernel};

/// Returns the curve `wall` should be shortened to, if any.
///
/// Obstructions around the wall are unioned (pairs the kernel cannot unite
/// are left out) and the longest piece of `curve` outside the union is
/// kept. `None` means the wall stays as it is: no obstructions, a kernel
/// failure, or a longest piece within `tol` of the full length.
pub(crate) fn trimmed_curve<K>(kernel: &K, wall: ElementId, curve: &Segment, tol: f64) -> Option<Segment>
where
    K: SolidKernel + ?Sized,
{
    let mut solids = kernel.obstructions(wall).into_iter();
    let first = solids.next()?;
    let combined = solids.fold(first, |acc, solid| match kernel.union(&acc, &solid) {
        Ok(united) => united,
        Err(e) => {
            debug!(wall = ?wall, error = %e, "ignoring obstruction");
            acc
        }
    });

    let outside = match kernel.outside_segments(curve, &combined) {
        Ok(outside) => outside,
        Err(e) => {
            debug!(wall = ?wall, error = %e, "wall left untrimmed");
            return None;
        }
    };
    let longest = outside
        .into_iter()
        .max_by(|a, b| a.length().total_cmp(&b.length()))?;
    ((longest.length() - curve.length()).abs() > tol).then_some(longest)
}
