use std::f64::consts::{PI, TAU};

use crate::error::{GeometryError, Result};
use crate::math::distance_2d::{point_to_arc_distance, wrap_into_sweep};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{check_parameter, Curve};

/// Maximum angular step between tessellation samples.
const MAX_SAMPLE_ANGLE: f64 = PI / 16.0;

/// A circular arc in a plane parallel to XY.
///
/// The arc starts at `start_angle` (measured CCW from +X around `center`)
/// and sweeps `sweep` radians; a positive sweep runs counter-clockwise.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcSegment {
    center: Point3,
    radius: f64,
    start_angle: f64,
    sweep: f64,
}

impl ArcSegment {
    /// Creates a new arc.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius or the sweep is (near) zero, or if the
    /// sweep exceeds a full turn.
    pub fn new(center: Point3, radius: f64, start_angle: f64, sweep: f64) -> Result<Self> {
        if radius < TOLERANCE {
            return Err(GeometryError::Degenerate("arc radius must be positive".into()).into());
        }
        if sweep.abs() < TOLERANCE {
            return Err(GeometryError::Degenerate("arc sweep must be non-zero".into()).into());
        }
        if sweep.abs() > TAU + TOLERANCE {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "sweep",
                value: sweep,
                min: -TAU,
                max: TAU,
            }
            .into());
        }
        Ok(Self {
            center,
            radius,
            start_angle,
            sweep,
        })
    }

    /// Returns the center of the arc.
    #[must_use]
    pub fn center(&self) -> &Point3 {
        &self.center
    }

    /// Returns the radius of the arc.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns the start angle in radians.
    #[must_use]
    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    /// Returns the signed sweep in radians.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.sweep
    }

    fn point_at_angle(&self, angle: f64) -> Point3 {
        Point3::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y + self.radius * angle.sin(),
            self.center.z,
        )
    }

    /// Evaluates the arc at normalized parameter `t` without range checks.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point3 {
        self.point_at_angle(self.start_angle + self.sweep * t)
    }

    /// Returns a copy moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: &Vector3) -> Self {
        Self {
            center: self.center + offset,
            ..self.clone()
        }
    }

    /// Returns the arc traversed end to start.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            start_angle: self.start_angle + self.sweep,
            sweep: -self.sweep,
            ..self.clone()
        }
    }

    /// Returns the arc lengthened by the arc length `by` at both ends.
    ///
    /// # Errors
    ///
    /// Returns an error if the extended sweep collapses or exceeds a full turn.
    pub fn extended(&self, by: f64) -> Result<Self> {
        let d_angle = (by / self.radius).copysign(self.sweep);
        Self::new(
            self.center,
            self.radius,
            self.start_angle - d_angle,
            self.sweep + 2.0 * d_angle,
        )
    }

    /// Moves the arc end nearer to `target` onto the angle of `target`.
    ///
    /// The arc keeps its center, radius and direction; the result may be
    /// shorter (trim) or longer (extend) than the original.
    ///
    /// # Errors
    ///
    /// Returns an error if `target` coincides with the center or the
    /// resulting arc is degenerate or reversed.
    pub fn trim_or_extend_to(&self, target: &Point3) -> Result<Self> {
        if (self.start() - target).norm() < (self.end() - target).norm() {
            self.trim_or_extend_start_to(target)
        } else {
            self.trim_or_extend_end_to(target)
        }
    }

    /// Moves the start of the arc onto the angle of `target`, keeping the end.
    ///
    /// The start turns by the shorter way round to the target angle.
    ///
    /// # Errors
    ///
    /// Returns an error if `target` coincides with the center, or if the
    /// start would pass the end and reverse the arc.
    pub fn trim_or_extend_start_to(&self, target: &Point3) -> Result<Self> {
        let turn = shortest_turn(self.start_angle, self.angle_of(target)?);
        self.rebuilt(self.start_angle + turn, self.sweep - turn)
    }

    /// Moves the end of the arc onto the angle of `target`, keeping the start.
    ///
    /// # Errors
    ///
    /// Returns an error if `target` coincides with the center, or if the
    /// end would pass the start and reverse the arc.
    pub fn trim_or_extend_end_to(&self, target: &Point3) -> Result<Self> {
        let end_angle = self.start_angle + self.sweep;
        let turn = shortest_turn(end_angle, self.angle_of(target)?);
        self.rebuilt(self.start_angle, self.sweep + turn)
    }

    fn angle_of(&self, target: &Point3) -> Result<f64> {
        let v = target - self.center;
        if v.x.hypot(v.y) < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(v.y.atan2(v.x))
    }

    fn rebuilt(&self, start_angle: f64, sweep: f64) -> Result<Self> {
        if sweep * self.sweep <= 0.0 {
            return Err(GeometryError::Degenerate("arc would reverse".into()).into());
        }
        Self::new(self.center, self.radius, start_angle, sweep)
    }
}

/// Signed angle in `(-PI, PI]` turning `from` onto `to`.
fn shortest_turn(from: f64, to: f64) -> f64 {
    let turn = (to - from).rem_euclid(TAU);
    if turn > PI {
        turn - TAU
    } else {
        turn
    }
}

impl Curve for ArcSegment {
    fn start(&self) -> Point3 {
        self.point_at_angle(self.start_angle)
    }

    fn end(&self) -> Point3 {
        self.point_at_angle(self.start_angle + self.sweep)
    }

    fn length(&self) -> f64 {
        self.radius * self.sweep.abs()
    }

    fn evaluate(&self, t: f64) -> Result<Point3> {
        check_parameter(t)?;
        Ok(self.point_at(t))
    }

    fn tangent(&self, t: f64) -> Result<Vector3> {
        check_parameter(t)?;
        let angle = self.start_angle + self.sweep * t;
        let dir = Vector3::new(-angle.sin(), angle.cos(), 0.0);
        Ok(if self.sweep < 0.0 { -dir } else { dir })
    }

    fn tessellate(&self) -> Vec<Point3> {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let steps = ((self.sweep.abs() / MAX_SAMPLE_ANGLE).ceil() as usize).max(2);
        #[allow(clippy::cast_precision_loss)]
        (0..=steps)
            .map(|i| self.point_at(i as f64 / steps as f64))
            .collect()
    }

    fn closest_parameter(&self, p: &Point3) -> f64 {
        let angle = (p.y - self.center.y).atan2(p.x - self.center.x);
        let delta = wrap_into_sweep(angle, self.start_angle, self.sweep);
        let t = delta / self.sweep;
        if (0.0..=1.0).contains(&t) {
            return t;
        }
        // Outside the angular range: snap to the nearer end.
        if (self.start() - p).norm() <= (self.end() - p).norm() {
            0.0
        } else {
            1.0
        }
    }

    fn distance_to(&self, p: &Point3) -> f64 {
        point_to_arc_distance(p, &self.center, self.radius, self.start_angle, self.sweep)
    }
}
