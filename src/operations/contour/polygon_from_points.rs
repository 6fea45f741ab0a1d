use crate::error::{ContourError, GeometryError, Result};
use crate::geometry::CurveLoop;
use crate::math::polygon_2d::mean_point;
use crate::math::{points_coincide, Point3, Vector3, COINCIDENCE_TOLERANCE, TOLERANCE};

/// Builds a closed polygon from an unordered point cloud.
///
/// Duplicate points are removed, the rest are ordered counter-clockwise
/// (seen from the tip of `normal`) around their mean point.
pub struct PolygonFromPoints {
    points: Vec<Point3>,
    normal: Vector3,
    tolerance: f64,
}

impl PolygonFromPoints {
    /// Creates a new `PolygonFromPoints` operation.
    #[must_use]
    pub fn new(points: Vec<Point3>, normal: Vector3) -> Self {
        Self {
            points,
            normal,
            tolerance: COINCIDENCE_TOLERANCE,
        }
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns `ContourError::Malformed` if fewer than 3 distinct points are
    /// given, or `GeometryError::ZeroVector` for a zero normal.
    pub fn execute(&self) -> Result<CurveLoop> {
        if self.points.len() < 3 {
            return Err(ContourError::Malformed {
                points: self.points.len(),
            }
            .into());
        }
        let normal = self
            .normal
            .try_normalize(TOLERANCE)
            .ok_or(GeometryError::ZeroVector)?;

        let mut unique: Vec<Point3> = Vec::with_capacity(self.points.len());
        for p in &self.points {
            if !unique.iter().any(|u| points_coincide(u, p, self.tolerance)) {
                unique.push(*p);
            }
        }
        if unique.len() < 3 {
            return Err(ContourError::Malformed {
                points: unique.len(),
            }
            .into());
        }

        let center = mean_point(&unique)?;
        let x_axis = perpendicular(&normal);
        let y_axis = normal.cross(&x_axis);
        let angle = |p: &Point3| {
            let v = p - center;
            v.dot(&y_axis).atan2(v.dot(&x_axis))
        };
        unique.sort_by(|a, b| angle(a).total_cmp(&angle(b)));

        CurveLoop::polygon(&unique)
    }
}

/// Returns a unit vector perpendicular to `normal`, built against the global
/// axis least parallel to it.
fn perpendicular(normal: &Vector3) -> Vector3 {
    let (ax, ay, az) = (normal.x.abs(), normal.y.abs(), normal.z.abs());
    let axis = if ax <= ay && ax <= az {
        Vector3::x()
    } else if ay <= ax && ay <= az {
        Vector3::y()
    } else {
        Vector3::z()
    };
    normal.cross(&axis).normalize()
}
