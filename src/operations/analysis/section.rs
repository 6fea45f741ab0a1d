use crate::error::{ContourError, GeometryError, Result};
use crate::math::{Point3, Vector3, PRINCIPAL_TOLERANCE};

/// Smallest accepted polygon area.
const MIN_AREA: f64 = 1e-12;

/// Area properties of a simple polygon in the XY plane.
///
/// Moments are taken about centroidal axes and normalized to the
/// counter-clockwise convention, so a polygon and its reverse produce the
/// same values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionProperties {
    /// Enclosed area (always positive).
    pub area: f64,
    /// Area centroid.
    pub centroid: Point3,
    /// Second moment about the centroidal X axis.
    pub ixx: f64,
    /// Second moment about the centroidal Y axis.
    pub iyy: f64,
    /// Product moment about the centroidal axes.
    pub ixy: f64,
    /// Major principal moment.
    pub i1: f64,
    /// Minor principal moment.
    pub i2: f64,
    /// Rotation of the minor axis from +X, in radians.
    pub theta: f64,
    /// Unit axis of the major moment, zero when the axes are undefined.
    pub major: Vector3,
    /// Unit axis of the minor moment with non-negative X, zero when the axes are undefined.
    pub minor: Vector3,
}

impl SectionProperties {
    /// Computes the properties of the polygon through `vertices`.
    ///
    /// # Errors
    ///
    /// Returns `ContourError::Malformed` for fewer than 3 vertices and
    /// `GeometryError::Degenerate` for a zero-area polygon.
    pub fn from_vertices(vertices: &[Point3]) -> Result<Self> {
        let n = vertices.len();
        if n < 3 {
            return Err(ContourError::Malformed { points: n }.into());
        }

        let (mut area, mut cx, mut cy) = (0.0, 0.0, 0.0);
        let (mut ixx, mut iyy, mut ixy) = (0.0, 0.0, 0.0);
        for i in 0..n {
            let j = (i + 1) % n;
            let (xi, yi) = (vertices[i].x, vertices[i].y);
            let (xj, yj) = (vertices[j].x, vertices[j].y);
            let cross = xi * yj - xj * yi;

            area += cross;
            cx += (xi + xj) * cross;
            cy += (yi + yj) * cross;
            ixx += (yi * yi + yi * yj + yj * yj) * cross;
            iyy += (xi * xi + xi * xj + xj * xj) * cross;
            ixy += (xi * yj + 2.0 * xi * yi + 2.0 * xj * yj + xj * yi) * cross;
        }

        area *= 0.5;
        if area.abs() < MIN_AREA {
            return Err(GeometryError::Degenerate("polygon has zero area".into()).into());
        }

        let inv_6a = 1.0 / (6.0 * area);
        cx *= inv_6a;
        cy *= inv_6a;

        // Shift to centroidal axes while the sign still follows the winding.
        ixx = ixx / 12.0 - area * cy * cy;
        iyy = iyy / 12.0 - area * cx * cx;
        ixy = ixy / 24.0 - area * cx * cy;

        if area < 0.0 {
            area = -area;
            ixx = -ixx;
            iyy = -iyy;
            ixy = -ixy;
        }

        let c1 = (ixx + iyy) * 0.5;
        let c2 = (ixx - iyy) * 0.5;
        let c3 = c2.hypot(ixy);

        let mut props = Self {
            area,
            centroid: Point3::new(cx, cy, 0.0),
            ixx,
            iyy,
            ixy,
            i1: c1 + c3,
            i2: c1 - c3,
            theta: 0.0,
            major: Vector3::zeros(),
            minor: Vector3::zeros(),
        };

        let theta = if ixy.abs() < PRINCIPAL_TOLERANCE {
            if (ixx - iyy).abs() < PRINCIPAL_TOLERANCE {
                // Any pair of axes is principal.
                return Ok(props);
            }
            if iyy > ixx {
                0.0
            } else {
                std::f64::consts::FRAC_PI_2
            }
        } else {
            0.5 * (2.0 * ixy).atan2(iyy - ixx)
        };

        let mut minor = Vector3::new(theta.cos(), theta.sin(), 0.0);
        if minor.x < -1e-3 {
            minor = -minor;
        }
        props.theta = theta;
        props.minor = minor;
        props.major = Vector3::new(-minor.y, minor.x, 0.0);
        Ok(props)
    }

    /// Returns `true` when the principal axes are undefined (e.g. squares,
    /// regular polygons).
    #[must_use]
    pub fn is_doubly_symmetric(&self) -> bool {
        self.major.norm() < 1e-5 || self.minor.norm() < 1e-5
    }

    /// Returns the principal axis rotation in degrees, counter-clockwise from +X.
    #[must_use]
    pub fn rotation_degrees(&self) -> f64 {
        self.theta.to_degrees()
    }
}
