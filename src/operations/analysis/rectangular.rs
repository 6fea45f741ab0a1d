use crate::geometry::{Curve, CurveLoop, Segment};
use crate::math::{Point3, Vector3};

use super::section::SectionProperties;

/// Two edge directions belong to the same histogram bin when `||cos| - 1|`
/// is below this.
const BIN_TOLERANCE: f64 = 1e-4;

/// Result of a successful rectangularity test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleFit {
    /// Extent along the major axis.
    pub width: f64,
    /// Extent along the minor axis.
    pub length: f64,
    /// Axis the `width` is measured along.
    pub major: Vector3,
    /// Axis the `length` is measured along.
    pub minor: Vector3,
}

/// Tests whether `outer` is a rectangle whose sides may be split into collinear pieces.
///
/// Uses the principal axes of `section` as the measuring frame; when those are
/// undefined the dominant edge direction (by accumulated length) is used
/// instead. Every turn between consecutive edges must be a clean right angle
/// in the same rotational sense. Arcs make the test fail.
#[must_use]
pub fn fit_rectangle(
    outer: &CurveLoop,
    section: &SectionProperties,
    tolerance: f64,
) -> Option<RectangleFit> {
    let lines = outer
        .segments()
        .iter()
        .map(Segment::as_line)
        .collect::<Option<Vec<_>>>()?;
    if lines.is_empty() {
        return None;
    }

    let (major, minor) = if section.is_doubly_symmetric() {
        let edges: Vec<(Vector3, f64)> = lines
            .iter()
            .map(|l| (l.direction(), l.length()))
            .collect();
        dominant_axes(&edges)?
    } else {
        (section.major, section.minor)
    };

    let center: Point3 = section.centroid;
    let (mut b_min, mut b_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut h_min, mut h_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let mut turn_sign = 0.0;
    let mut prev: Option<Vector3> = None;

    for line in &lines {
        let v = line.start() - center;
        let b = v.dot(&major);
        let h = v.dot(&minor);
        b_min = b_min.min(b);
        b_max = b_max.max(b);
        h_min = h_min.min(h);
        h_max = h_max.max(h);

        let dir = line.direction();
        let Some(prev_dir) = prev else {
            prev = Some(dir);
            continue;
        };

        let cos = dir.dot(&prev_dir);
        if (cos - 1.0).abs() < tolerance * tolerance {
            continue;
        }
        if cos.abs() > tolerance {
            return None;
        }
        let sin = dir.cross(&prev_dir).z;
        if turn_sign == 0.0 {
            turn_sign = sin;
        } else if turn_sign * sin < 0.0 {
            return None;
        }
        prev = Some(dir);
    }

    Some(RectangleFit {
        width: b_max - b_min,
        length: h_max - h_min,
        major,
        minor,
    })
}

/// Bins edge directions by axis and derives an axis pair from the heaviest bin.
///
/// The minor axis is whichever of the bin direction and its perpendicular is
/// closer to +X, flipped to non-negative X; the major axis is its CCW normal.
fn dominant_axes(edges: &[(Vector3, f64)]) -> Option<(Vector3, Vector3)> {
    let mut bins: Vec<(Vector3, f64)> = Vec::new();
    for &(dir, len) in edges {
        match bins
            .iter_mut()
            .find(|(axis, _)| (axis.dot(&dir).abs() - 1.0).abs() < BIN_TOLERANCE)
        {
            Some((_, total)) => *total += len,
            None => bins.push((dir, len)),
        }
    }

    let mut best: Option<(Vector3, f64)> = None;
    for &(axis, total) in &bins {
        if best.map_or(true, |(_, max)| total > max) {
            best = Some((axis, total));
        }
    }
    let (axis, _) = best?;

    let mut minor = if axis.x.abs() > axis.y.abs() {
        axis
    } else {
        Vector3::new(axis.y, -axis.x, 0.0)
    };
    if minor.x < -1e-3 {
        minor = -minor;
    }
    let major = Vector3::new(-minor.y, minor.x, 0.0);
    Some((major, minor))
}
