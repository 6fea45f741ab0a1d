use super::{Point3, Vector3, TOLERANCE};

/// Intersection of the unbounded lines `p1 + t * d1` and `p2 + u * d2` in XY.
///
/// Returns `None` for parallel lines. The result takes the Z of `p1`.
#[must_use]
pub fn line_line_intersection(
    p1: &Point3,
    d1: &Vector3,
    p2: &Point3,
    d2: &Vector3,
) -> Option<Point3> {
    let cross = d1.x * d2.y - d1.y * d2.x;
    if cross.abs() < TOLERANCE * d1.norm() * d2.norm() {
        return None;
    }
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let t = (dx * d2.y - dy * d2.x) / cross;
    Some(Point3::new(p1.x + d1.x * t, p1.y + d1.y * t, p1.z))
}

/// Intersections of the unbounded line `p + t * d` with a full circle in XY.
///
/// Returns zero, one (tangent) or two points ordered by `t`.
#[must_use]
pub fn line_circle_intersections(
    p: &Point3,
    d: &Vector3,
    center: &Point3,
    radius: f64,
) -> Vec<Point3> {
    let a = d.x * d.x + d.y * d.y;
    if a < TOLERANCE {
        return Vec::new();
    }
    let fx = p.x - center.x;
    let fy = p.y - center.y;
    let b = 2.0 * (fx * d.x + fy * d.y);
    let c = fx * fx + fy * fy - radius * radius;
    let disc = b * b - 4.0 * a * c;

    let at = |t: f64| Point3::new(p.x + d.x * t, p.y + d.y * t, p.z);
    if disc < -TOLERANCE {
        Vec::new()
    } else if disc.abs() <= TOLERANCE {
        vec![at(-b / (2.0 * a))]
    } else {
        let sq = disc.sqrt();
        vec![at((-b - sq) / (2.0 * a)), at((-b + sq) / (2.0 * a))]
    }
}
