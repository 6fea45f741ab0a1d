//! Contracts of the host application the generators run against.
//!
//! The host owns the persisted element model (walls, slabs, types, levels),
//! the transaction boundary, and the solid kernel. Generators only talk to it
//! through the traits in this module.

pub mod memory;
mod space;

pub use memory::{BoxSolid, HostOp, MemoryHost};
pub use space::Space;

use tracing::warn;

use crate::error::Result;
use crate::geometry::{CurveLoop, Segment};

slotmap::new_key_type! {
    /// Identifier of any element held by the host: walls, slabs, types and levels.
    pub struct ElementId;
}

/// One end of a wall's location curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WallEnd {
    Start,
    End,
}

/// A named element type (wall, floor or ceiling type).
#[derive(Debug, Clone, PartialEq)]
pub struct ElementType {
    pub id: ElementId,
    pub name: String,
    /// Total thickness; zero for slab types that do not report one.
    pub width: f64,
}

/// A named building level.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub id: ElementId,
    pub name: String,
    pub elevation: f64,
}

/// Parameters of a wall creation request.
#[derive(Debug, Clone, PartialEq)]
pub struct WallSpec {
    /// Location curve of the wall.
    pub curve: Segment,
    pub wall_type: ElementId,
    pub level: ElementId,
    /// Unconnected height above the base.
    pub height: f64,
    /// Offset of the base above the level.
    pub base_offset: f64,
    pub flip: bool,
    pub structural: bool,
}

impl WallSpec {
    /// Creates a non-structural, unflipped wall request with zero base offset.
    #[must_use]
    pub fn new(curve: Segment, wall_type: ElementId, level: ElementId, height: f64) -> Self {
        Self {
            curve,
            wall_type,
            level,
            height,
            base_offset: 0.0,
            flip: false,
            structural: false,
        }
    }
}

/// Element creation, editing and joining in the host model.
///
/// Every mutating call may be rejected by the host; callers decide whether a
/// rejection skips one item or aborts the batch.
pub trait ElementHost {
    /// Creates a wall along `spec.curve`.
    ///
    /// # Errors
    ///
    /// Returns a `HostError` if the host rejects the request.
    fn create_wall(&mut self, spec: &WallSpec) -> Result<ElementId>;

    /// Creates a floor bounded by `loops` (outer perimeter first).
    ///
    /// # Errors
    ///
    /// Returns a `HostError` if the host rejects the request.
    fn create_floor(
        &mut self,
        loops: &[CurveLoop],
        floor_type: ElementId,
        level: ElementId,
    ) -> Result<ElementId>;

    /// Creates a ceiling bounded by `loops`, `height_offset` above the level.
    ///
    /// # Errors
    ///
    /// Returns a `HostError` if the host rejects the request.
    fn create_ceiling(
        &mut self,
        loops: &[CurveLoop],
        ceiling_type: ElementId,
        level: ElementId,
        height_offset: f64,
    ) -> Result<ElementId>;

    /// Stops the wall from auto-joining at `end`.
    ///
    /// # Errors
    ///
    /// Returns `HostError::NotFound` if `wall` is not a wall.
    fn disallow_join_at_end(&mut self, wall: ElementId, end: WallEnd) -> Result<()>;

    /// Returns the location curve of a wall.
    ///
    /// # Errors
    ///
    /// Returns `HostError::NotFound` if `wall` is not a wall.
    fn wall_curve(&self, wall: ElementId) -> Result<Segment>;

    /// Replaces the location curve of a wall.
    ///
    /// # Errors
    ///
    /// Returns a `HostError` if `wall` is not a wall or the host rejects the curve.
    fn set_wall_curve(&mut self, wall: ElementId, curve: Segment) -> Result<()>;

    /// Returns the thickness of a wall.
    ///
    /// # Errors
    ///
    /// Returns `HostError::NotFound` if `wall` is not a wall.
    fn wall_width(&self, wall: ElementId) -> Result<f64>;

    /// Returns every wall in the model in creation order.
    fn walls(&self) -> Vec<ElementId>;

    fn is_wall(&self, id: ElementId) -> bool;

    /// Joins the geometry of two elements.
    ///
    /// # Errors
    ///
    /// Returns a `HostError` if the host refuses the join.
    fn join(&mut self, a: ElementId, b: ElementId) -> Result<()>;

    fn are_joined(&self, a: ElementId, b: ElementId) -> bool;

    /// Opens a transaction named `name`.
    ///
    /// # Errors
    ///
    /// Returns `HostError::Transaction` if a transaction is already open.
    fn begin_transaction(&mut self, name: &str) -> Result<()>;

    /// Commits the open transaction.
    ///
    /// # Errors
    ///
    /// Returns `HostError::Transaction` if nothing is open or the commit
    /// fails; a failed commit leaves the model as it was before `begin`.
    fn commit_transaction(&mut self) -> Result<()>;

    /// Discards every change made since `begin`.
    ///
    /// # Errors
    ///
    /// Returns `HostError::Transaction` if nothing is open.
    fn rollback_transaction(&mut self) -> Result<()>;
}

/// Solid geometry services used to trim walls against obstructions.
pub trait SolidKernel {
    /// Opaque solid representation.
    type Solid: Clone;

    /// Returns the obstruction solids (mullions and similar) near `wall`.
    fn obstructions(&self, wall: ElementId) -> Vec<Self::Solid>;

    /// Boolean union of two solids.
    ///
    /// # Errors
    ///
    /// Returns a `HostError` if the kernel fails on this pair.
    fn union(&self, a: &Self::Solid, b: &Self::Solid) -> Result<Self::Solid>;

    /// Returns the pieces of `curve` lying outside `solid`.
    ///
    /// # Errors
    ///
    /// Returns a `HostError` if the kernel cannot intersect this curve kind.
    fn outside_segments(&self, curve: &Segment, solid: &Self::Solid) -> Result<Vec<Segment>>;
}

/// Read access to the element types and levels of a document.
pub trait TypeCatalog {
    fn wall_types(&self) -> Vec<ElementType>;
    fn floor_types(&self) -> Vec<ElementType>;
    fn ceiling_types(&self) -> Vec<ElementType>;
    fn levels(&self) -> Vec<Level>;
}

/// Runs `f` inside a host transaction.
///
/// Commits when `f` succeeds and rolls back when it fails.
///
/// # Errors
///
/// Returns the error of `f`, or the transaction error from `begin`/`commit`.
pub fn with_transaction<H, T, F>(host: &mut H, name: &str, f: F) -> Result<T>
where
    H: ElementHost + ?Sized,
    F: FnOnce(&mut H) -> Result<T>,
{
    host.begin_transaction(name)?;
    match f(host) {
        Ok(value) => {
            host.commit_transaction()?;
            Ok(value)
        }
        Err(e) => {
            if let Err(rollback) = host.rollback_transaction() {
                warn!(transaction = name, error = %rollback, "rollback failed");
            }
            Err(e)
        }
    }
}
