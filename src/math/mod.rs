pub mod direction;
pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;

pub use direction::{canonical_direction, is_parallel, is_perpendicular, DirectionComparer};

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Tolerance for parallelism and other unit-vector comparisons.
pub const TOLERANCE: f64 = 1e-9;

/// Distance below which two points are treated as the same point.
pub const COINCIDENCE_TOLERANCE: f64 = 1e-4;

/// Tolerance used when comparing canonical directions.
pub const DIRECTION_TOLERANCE: f64 = 1e-6;

/// Threshold on the product moment below which the inertia tensor is treated as diagonal.
pub const PRINCIPAL_TOLERANCE: f64 = 1e-7;

/// Cosine tolerance for the orthogonal turn test (about 0.06 degrees).
pub const RECTANGULAR_TOLERANCE: f64 = 1e-3;

/// Boundary segments shorter than this are not offset into finish walls.
pub const MIN_SEGMENT_LENGTH: f64 = 1e-3;

/// Returns `true` if two points are closer than `tol`.
#[must_use]
pub fn points_coincide(a: &Point3, b: &Point3, tol: f64) -> bool {
    (b - a).norm() < tol
}

/// Returns the points sorted by their projection onto `axis`, ties broken by Z.
///
/// A zero axis falls back to global X.
#[must_use]
pub fn sort_along_axis(points: &[Point3], axis: &Vector3) -> Vec<Point3> {
    let axis = axis.try_normalize(TOLERANCE).unwrap_or_else(Vector3::x);
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| {
        let da = a.coords.dot(&axis);
        let db = b.coords.dot(&axis);
        da.total_cmp(&db).then(a.z.total_cmp(&b.z))
    });
    sorted
}

/// Returns the point with the smallest projection onto `direction`.
#[must_use]
pub fn point_with_min_projection(points: &[Point3], direction: &Vector3) -> Option<Point3> {
    let dir = direction.try_normalize(TOLERANCE)?;
    points
        .iter()
        .min_by(|a, b| a.coords.dot(&dir).total_cmp(&b.coords.dot(&dir)))
        .copied()
}
