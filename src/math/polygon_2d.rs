use super::{Point3, Vector3};
use crate::error::{GeometryError, Result};

/// Computes the signed area of a polygon in the XY plane (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point3]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Returns the arithmetic mean of the points.
///
/// # Errors
///
/// Returns `GeometryError::Degenerate` for an empty slice.
pub fn mean_point(points: &[Point3]) -> Result<Point3> {
    if points.is_empty() {
        return Err(GeometryError::Degenerate("mean of an empty point set".into()).into());
    }
    #[allow(clippy::cast_precision_loss)]
    let n = points.len() as f64;
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Ok(Point3::from(sum / n))
}

/// Even-odd ray cast of `point` against the polygon, projected to XY.
#[must_use]
pub fn contains_point_2d(polygon: &[Point3], point: &Point3) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    for i in 0..n {
        let a = &polygon[i];
        let b = &polygon[(i + 1) % n];
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
    }
    inside
}
