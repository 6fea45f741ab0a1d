use std::f64::consts::TAU;

use super::Point3;

/// Returns the planar distance from `p` to the segment `a`–`b`, ignoring Z.
#[must_use]
pub fn point_to_segment_distance(p: &Point3, a: &Point3, b: &Point3) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;

    if len_sq < 1e-20 {
        return (p.x - a.x).hypot(p.y - a.y);
    }

    // Project onto the infinite line, clamp to the segment.
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    (p.x - (a.x + t * dx)).hypot(p.y - (a.y + t * dy))
}

/// Returns the planar distance from `p` to a circular arc.
///
/// The arc starts at `start_angle` and sweeps `sweep` radians (positive is
/// counter-clockwise) around `center`. Inside the angular range the distance
/// is radial; outside it is the distance to the nearer arc end.
#[must_use]
pub fn point_to_arc_distance(
    p: &Point3,
    center: &Point3,
    radius: f64,
    start_angle: f64,
    sweep: f64,
) -> f64 {
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    let angle = dy.atan2(dx);
    if angle_in_arc_range(angle, start_angle, sweep) {
        return (dx.hypot(dy) - radius).abs();
    }

    let end_angle = start_angle + sweep;
    let d0 = (p.x - (center.x + radius * start_angle.cos()))
        .hypot(p.y - (center.y + radius * start_angle.sin()));
    let d1 = (p.x - (center.x + radius * end_angle.cos()))
        .hypot(p.y - (center.y + radius * end_angle.sin()));
    d0.min(d1)
}

/// Returns the signed angular offset of `angle` from `start_angle`, wrapped
/// into the sweep direction: `[0, 2π)` for CCW sweeps, `(-2π, 0]` for CW.
#[must_use]
pub fn wrap_into_sweep(angle: f64, start_angle: f64, sweep: f64) -> f64 {
    let delta = (angle - start_angle).rem_euclid(TAU);
    if sweep >= 0.0 || delta == 0.0 {
        delta
    } else {
        delta - TAU
    }
}

/// Checks whether `angle` lies on the arc spanning `sweep` from `start_angle`.
#[must_use]
pub fn angle_in_arc_range(angle: f64, start_angle: f64, sweep: f64) -> bool {
    let eps = 1e-10;
    let delta = wrap_into_sweep(angle, start_angle, sweep);
    if sweep >= 0.0 {
        delta <= sweep + eps || delta >= TAU - eps
    } else {
        delta >= sweep - eps || delta <= -TAU + eps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    const TOL: f64 = 1e-10;

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    #[test]
    fn segment_distance_perpendicular_projection() {
        let d = point_to_segment_distance(&p(1.0, 1.0), &p(0.0, 0.0), &p(2.0, 0.0));
        assert!((d - 1.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn segment_distance_endpoint_closest() {
        let d = point_to_segment_distance(&p(-1.0, 0.0), &p(0.0, 0.0), &p(2.0, 0.0));
        assert!((d - 1.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn segment_distance_degenerate() {
        let d = point_to_segment_distance(&p(3.0, 4.0), &p(0.0, 0.0), &p(0.0, 0.0));
        assert!((d - 5.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn arc_distance_in_range() {
        // Upper CCW semicircle, point straight above the center.
        let d = point_to_arc_distance(&p(0.0, 2.0), &p(0.0, 0.0), 1.0, 0.0, PI);
        assert!((d - 1.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn arc_distance_outside_range() {
        let d = point_to_arc_distance(&p(0.0, -2.0), &p(0.0, 0.0), 1.0, 0.0, PI);
        assert!((d - 5.0_f64.sqrt()).abs() < 1e-6, "d={d}");
    }

    #[test]
    fn clockwise_range() {
        // CW quarter from 0 down to -π/2.
        assert!(angle_in_arc_range(-PI / 4.0, 0.0, -PI / 2.0));
        assert!(!angle_in_arc_range(PI / 4.0, 0.0, -PI / 2.0));
    }

    #[test]
    fn wrap_follows_sweep_sign() {
        assert!((wrap_into_sweep(-PI / 2.0, 0.0, 1.0) - 1.5 * PI).abs() < TOL);
        assert!((wrap_into_sweep(-PI / 2.0, 0.0, -1.0) + PI / 2.0).abs() < TOL);
    }
}
