use crate::geometry::{Curve, CurveLoop};
use crate::math::{DirectionComparer, Point3, Vector3, TOLERANCE};

/// An axis-aligned bounding rectangle in the XY plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Computes the bounds of the points, `None` when there are none.
    #[must_use]
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bounds = Self {
            min: Point3::new(first.x, first.y, 0.0),
            max: Point3::new(first.x, first.y, 0.0),
        };
        for p in iter {
            bounds.min.x = bounds.min.x.min(p.x);
            bounds.min.y = bounds.min.y.min(p.y);
            bounds.max.x = bounds.max.x.max(p.x);
            bounds.max.y = bounds.max.y.max(p.y);
        }
        Some(bounds)
    }

    /// Computes the bounds of all segment end points of the loops.
    #[must_use]
    pub fn from_loops(loops: &[CurveLoop]) -> Option<Self> {
        let points: Vec<Point3> = loops.iter().flat_map(CurveLoop::end_points).collect();
        Self::from_points(&points)
    }

    /// Extent along X.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Extent along Y.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Center of the rectangle.
    #[must_use]
    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }
}

/// A bounding rectangle aligned with one of the contour's own edge directions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedBounds {
    /// Corner with the smallest projections on both axes.
    pub origin: Point3,
    /// Unit axis of the `width` extent (an edge direction of the contour).
    pub width_dir: Vector3,
    /// Unit axis of the `length` extent, `width_dir` turned 90 degrees CCW.
    pub length_dir: Vector3,
    /// Extent along `width_dir`.
    pub width: f64,
    /// Extent along `length_dir`.
    pub length: f64,
}

impl OrientedBounds {
    /// Area of the rectangle.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.width * self.length
    }

    /// Returns the four corners counter-clockwise from `origin`.
    #[must_use]
    pub fn corners(&self) -> [Point3; 4] {
        let w = self.width_dir * self.width;
        let l = self.length_dir * self.length;
        [
            self.origin,
            self.origin + w,
            self.origin + w + l,
            self.origin + l,
        ]
    }
}

/// Finds the minimum-area bounding rectangle over the loop's distinct edge directions.
///
/// Only directions already present as edges are tried, which is exact for
/// orthogonal contours. Ties keep the first direction found.
#[must_use]
pub fn oriented_bounds(curve_loop: &CurveLoop) -> Option<OrientedBounds> {
    if curve_loop.len() < 2 {
        return None;
    }

    let directions: Vec<Vector3> = curve_loop
        .segments()
        .iter()
        .filter_map(|s| (s.end() - s.start()).try_normalize(TOLERANCE))
        .collect();
    let candidates = DirectionComparer::default().distinct(&directions);
    let points = curve_loop.end_points();

    let mut best: Option<OrientedBounds> = None;
    for dir_x in candidates {
        let dir_y = Vector3::new(-dir_x.y, dir_x.x, 0.0);
        let (mut min_x, mut max_x) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_y, mut max_y) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in &points {
            let px = p.coords.dot(&dir_x);
            let py = p.coords.dot(&dir_y);
            min_x = min_x.min(px);
            max_x = max_x.max(px);
            min_y = min_y.min(py);
            max_y = max_y.max(py);
        }

        let candidate = OrientedBounds {
            origin: Point3::from(dir_x * min_x + dir_y * min_y),
            width_dir: dir_x,
            length_dir: dir_y,
            width: max_x - min_x,
            length: max_y - min_y,
        };
        if best.map_or(true, |b| candidate.area() < b.area()) {
            best = Some(candidate);
        }
    }
    best
}
