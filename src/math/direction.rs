use super::{Vector3, DIRECTION_TOLERANCE, TOLERANCE};

/// Normalizes `v` and flips it so that its dominant component is non-negative.
///
/// A direction and its negation map to the same canonical vector. Ties between
/// components of equal magnitude resolve in X, Y, Z order. Returns `None` for
/// a zero-length vector.
#[must_use]
pub fn canonical_direction(v: &Vector3) -> Option<Vector3> {
    let d = v.try_normalize(TOLERANCE)?;
    let (ax, ay, az) = (d.x.abs(), d.y.abs(), d.z.abs());
    let dominant = if ax >= ay && ax >= az {
        d.x
    } else if ay >= ax && ay >= az {
        d.y
    } else {
        d.z
    };
    Some(if dominant < 0.0 { -d } else { d })
}

/// Returns `true` if two unit vectors are parallel or anti-parallel within `tol`.
#[must_use]
pub fn is_parallel(a: &Vector3, b: &Vector3, tol: f64) -> bool {
    (a.dot(b).abs() - 1.0).abs() < tol
}

/// Returns `true` if two unit vectors are perpendicular within `tol`.
#[must_use]
pub fn is_perpendicular(a: &Vector3, b: &Vector3, tol: f64) -> bool {
    a.dot(b).abs() < tol
}

/// Equality over directions that treats a vector and its negation as the same axis.
#[derive(Debug, Clone, Copy)]
pub struct DirectionComparer {
    tolerance: f64,
}

impl Default for DirectionComparer {
    fn default() -> Self {
        Self::new(DIRECTION_TOLERANCE)
    }
}

impl DirectionComparer {
    /// Creates a comparer with the given component tolerance.
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Returns `true` if both vectors describe the same axis.
    ///
    /// Zero-length vectors never compare equal.
    #[must_use]
    pub fn equals(&self, a: &Vector3, b: &Vector3) -> bool {
        match (canonical_direction(a), canonical_direction(b)) {
            (Some(a), Some(b)) => (a - b).norm() <= self.tolerance,
            _ => false,
        }
    }

    /// Returns the distinct axes among `directions`, keeping first occurrences in order.
    #[must_use]
    pub fn distinct(&self, directions: &[Vector3]) -> Vec<Vector3> {
        let mut unique: Vec<Vector3> = Vec::new();
        for d in directions {
            if !unique.iter().any(|u| self.equals(u, d)) {
                unique.push(*d);
            }
        }
        unique
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn opposite_vectors_are_same_axis() {
        let cmp = DirectionComparer::default();
        let x = Vector3::new(1.0, 0.0, 0.0);
        let neg_x = Vector3::new(-1.0, 0.0, 0.0);
        let y = Vector3::new(0.0, 1.0, 0.0);
        assert!(cmp.equals(&x, &neg_x));
        assert!(!cmp.equals(&y, &x));
        assert!(!cmp.equals(&y, &neg_x));
    }

    #[test]
    fn canonical_flips_dominant_component() {
        let c = canonical_direction(&Vector3::new(-3.0, 1.0, 0.0)).unwrap();
        assert!(c.x > 0.0);
        assert!(c.y < 0.0);
        let c = canonical_direction(&Vector3::new(0.2, -2.0, 0.0)).unwrap();
        assert!(c.y > 0.0);
        assert!(canonical_direction(&Vector3::zeros()).is_none());
    }

    #[test]
    fn unnormalized_inputs_compare_by_axis() {
        let cmp = DirectionComparer::default();
        assert!(cmp.equals(&Vector3::new(2.0, 2.0, 0.0), &Vector3::new(-0.5, -0.5, 0.0)));
        assert!(!cmp.equals(&Vector3::new(1.0, 1.0, 0.0), &Vector3::new(1.0, -1.0, 0.0)));
    }

    #[test]
    fn distinct_keeps_first_occurrence() {
        let cmp = DirectionComparer::default();
        let dirs = vec![
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(-1.0, 0.0, 0.0),
            Vector3::new(0.0, -1.0, 0.0),
        ];
        let unique = cmp.distinct(&dirs);
        assert_eq!(unique.len(), 2);
        assert!((unique[0].x - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn parallel_and_perpendicular() {
        let x = Vector3::x();
        let y = Vector3::y();
        assert!(is_parallel(&x, &(-x), TOLERANCE));
        assert!(!is_parallel(&x, &y, TOLERANCE));
        assert!(is_perpendicular(&x, &y, TOLERANCE));
    }
}
