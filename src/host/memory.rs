//! In-memory host model.
//!
//! Holds every element in a single [`SlotMap`] arena, the way a document
//! holds walls, slabs, types and levels under one id space. Obstructions are
//! axis-aligned boxes and line curves are clipped against them in plan.
//! Individual operations can be scripted to fail for testing recovery paths.

use std::collections::{BTreeSet, HashMap};

use slotmap::SlotMap;
use tracing::debug;

use crate::error::{HostError, Result};
use crate::geometry::{Curve, CurveLoop, Segment};
use crate::math::{Point3, COINCIDENCE_TOLERANCE};

use super::{ElementHost, ElementId, ElementType, Level, SolidKernel, TypeCatalog, WallEnd, WallSpec};

/// Host operations that can be scripted to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostOp {
    CreateWall,
    CreateFloor,
    CreateCeiling,
    DisallowJoin,
    SetWallCurve,
    Join,
    Union,
    Intersect,
    Commit,
}

/// An axis-aligned box obstruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSolid {
    pub min: Point3,
    pub max: Point3,
}

impl BoxSolid {
    /// Creates a box from two opposite corners in any order.
    #[must_use]
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Parameter interval of the line `start + t (end - start)`, `t` in
    /// `[0, 1]`, inside the box footprint (Liang-Barsky).
    fn clip(&self, start: &Point3, end: &Point3) -> Option<(f64, f64)> {
        if start.z < self.min.z || start.z > self.max.z {
            return None;
        }
        let d = end - start;
        let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
        let checks = [
            (-d.x, start.x - self.min.x),
            (d.x, self.max.x - start.x),
            (-d.y, start.y - self.min.y),
            (d.y, self.max.y - start.y),
        ];
        for (p, q) in checks {
            if p.abs() < f64::EPSILON {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
            if t0 > t1 {
                return None;
            }
        }
        Some((t0, t1))
    }

    fn overlaps_xy(&self, other_min: &Point3, other_max: &Point3) -> bool {
        self.min.x <= other_max.x
            && self.max.x >= other_min.x
            && self.min.y <= other_max.y
            && self.max.y >= other_min.y
    }
}

#[derive(Debug, Clone)]
struct WallRecord {
    curve: Segment,
    wall_type: ElementId,
    level: ElementId,
    height: f64,
    base_offset: f64,
    flip: bool,
    structural: bool,
    join_start: bool,
    join_end: bool,
}

#[derive(Debug, Clone)]
struct SlabRecord {
    loops: Vec<CurveLoop>,
    slab_type: ElementId,
    level: ElementId,
    height_offset: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypeKind {
    Wall,
    Floor,
    Ceiling,
}

#[derive(Debug, Clone)]
enum Element {
    Wall(WallRecord),
    Floor(SlabRecord),
    Ceiling(SlabRecord),
    Type {
        kind: TypeKind,
        name: String,
        width: f64,
    },
    Level {
        name: String,
        elevation: f64,
    },
}

#[derive(Debug, Clone, Default)]
struct Model {
    elements: SlotMap<ElementId, Element>,
    joins: BTreeSet<(ElementId, ElementId)>,
}

/// An in-memory host implementing [`ElementHost`], [`SolidKernel`] and [`TypeCatalog`].
#[derive(Debug, Default)]
pub struct MemoryHost {
    model: Model,
    obstructions: Vec<BoxSolid>,
    snapshot: Option<(String, Model)>,
    rejections: HashMap<HostOp, usize>,
    committed: Vec<String>,
}

fn join_key(a: ElementId, b: ElementId) -> (ElementId, ElementId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl MemoryHost {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a wall type of thickness `width`.
    pub fn add_wall_type(&mut self, name: impl Into<String>, width: f64) -> ElementId {
        self.add_type(TypeKind::Wall, name.into(), width)
    }

    pub fn add_floor_type(&mut self, name: impl Into<String>) -> ElementId {
        self.add_type(TypeKind::Floor, name.into(), 0.0)
    }

    pub fn add_ceiling_type(&mut self, name: impl Into<String>) -> ElementId {
        self.add_type(TypeKind::Ceiling, name.into(), 0.0)
    }

    pub fn add_level(&mut self, name: impl Into<String>, elevation: f64) -> ElementId {
        self.model.elements.insert(Element::Level {
            name: name.into(),
            elevation,
        })
    }

    /// Adds a box obstruction that walls are trimmed against.
    pub fn add_obstruction(&mut self, solid: BoxSolid) {
        self.obstructions.push(solid);
    }

    /// Makes the next `times` calls of `op` fail with `HostError::Rejected`
    /// (or `HostError::Transaction` for commits).
    pub fn reject(&mut self, op: HostOp, times: usize) {
        self.rejections.insert(op, times);
    }

    /// Returns the floors in creation order.
    #[must_use]
    pub fn floors(&self) -> Vec<ElementId> {
        self.model
            .elements
            .iter()
            .filter(|(_, e)| matches!(e, Element::Floor(_)))
            .map(|(id, _)| id)
            .collect()
    }

    /// Returns the ceilings in creation order.
    #[must_use]
    pub fn ceilings(&self) -> Vec<ElementId> {
        self.model
            .elements
            .iter()
            .filter(|(_, e)| matches!(e, Element::Ceiling(_)))
            .map(|(id, _)| id)
            .collect()
    }

    /// Returns the boundary loops of a floor or ceiling.
    ///
    /// # Errors
    ///
    /// Returns `HostError::NotFound` if `id` is not a slab.
    pub fn slab_loops(&self, id: ElementId) -> Result<&[CurveLoop]> {
        Ok(&self.slab(id)?.loops)
    }

    /// Returns the height offset of a ceiling (zero for floors).
    ///
    /// # Errors
    ///
    /// Returns `HostError::NotFound` if `id` is not a slab.
    pub fn slab_height_offset(&self, id: ElementId) -> Result<f64> {
        Ok(self.slab(id)?.height_offset)
    }

    /// Returns the type and level a slab was created with.
    ///
    /// # Errors
    ///
    /// Returns `HostError::NotFound` if `id` is not a slab.
    pub fn slab_placement(&self, id: ElementId) -> Result<(ElementId, ElementId)> {
        let slab = self.slab(id)?;
        Ok((slab.slab_type, slab.level))
    }

    /// Returns whether the wall may auto-join at `end`.
    ///
    /// # Errors
    ///
    /// Returns `HostError::NotFound` if `wall` is not a wall.
    pub fn join_allowed(&self, wall: ElementId, end: WallEnd) -> Result<bool> {
        let record = self.wall(wall)?;
        Ok(match end {
            WallEnd::Start => record.join_start,
            WallEnd::End => record.join_end,
        })
    }

    /// Returns the height and base offset of a wall.
    ///
    /// # Errors
    ///
    /// Returns `HostError::NotFound` if `wall` is not a wall.
    pub fn wall_extent(&self, wall: ElementId) -> Result<(f64, f64)> {
        let record = self.wall(wall)?;
        Ok((record.height, record.base_offset))
    }

    /// Returns the level, flip and structural flags of a wall.
    ///
    /// # Errors
    ///
    /// Returns `HostError::NotFound` if `wall` is not a wall.
    pub fn wall_flags(&self, wall: ElementId) -> Result<(ElementId, bool, bool)> {
        let record = self.wall(wall)?;
        Ok((record.level, record.flip, record.structural))
    }

    /// Names of the committed transactions, oldest first.
    #[must_use]
    pub fn committed_transactions(&self) -> &[String] {
        &self.committed
    }

    fn add_type(&mut self, kind: TypeKind, name: String, width: f64) -> ElementId {
        self.model
            .elements
            .insert(Element::Type { kind, name, width })
    }

    fn types_of(&self, wanted: TypeKind) -> Vec<ElementType> {
        self.model
            .elements
            .iter()
            .filter_map(|(id, e)| match e {
                Element::Type { kind, name, width } if *kind == wanted => Some(ElementType {
                    id,
                    name: name.clone(),
                    width: *width,
                }),
                _ => None,
            })
            .collect()
    }

    fn take_rejection(&mut self, op: HostOp) -> bool {
        match self.rejections.get_mut(&op) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                true
            }
            _ => false,
        }
    }

    /// Rejection check for `&self` kernel calls; scripted kernel failures are sticky.
    fn is_rejected(&self, op: HostOp) -> bool {
        self.rejections.get(&op).is_some_and(|&n| n > 0)
    }

    fn wall(&self, id: ElementId) -> Result<&WallRecord> {
        match self.model.elements.get(id) {
            Some(Element::Wall(w)) => Ok(w),
            _ => Err(HostError::NotFound(format!("wall {id:?}")).into()),
        }
    }

    fn wall_mut(&mut self, id: ElementId) -> Result<&mut WallRecord> {
        match self.model.elements.get_mut(id) {
            Some(Element::Wall(w)) => Ok(w),
            _ => Err(HostError::NotFound(format!("wall {id:?}")).into()),
        }
    }

    fn slab(&self, id: ElementId) -> Result<&SlabRecord> {
        match self.model.elements.get(id) {
            Some(Element::Floor(s) | Element::Ceiling(s)) => Ok(s),
            _ => Err(HostError::NotFound(format!("slab {id:?}")).into()),
        }
    }

    fn check_type(&self, id: ElementId, wanted: TypeKind) -> Result<()> {
        match self.model.elements.get(id) {
            Some(Element::Type { kind, .. }) if *kind == wanted => Ok(()),
            _ => Err(HostError::NotFound(format!("{wanted:?} type {id:?}")).into()),
        }
    }

    fn check_level(&self, id: ElementId) -> Result<()> {
        match self.model.elements.get(id) {
            Some(Element::Level { .. }) => Ok(()),
            _ => Err(HostError::NotFound(format!("level {id:?}")).into()),
        }
    }

    fn check_slab_loops(loops: &[CurveLoop]) -> Result<()> {
        if loops.is_empty() || loops.iter().any(|l| l.is_open(COINCIDENCE_TOLERANCE)) {
            return Err(HostError::Rejected("slab boundary must be closed".into()).into());
        }
        Ok(())
    }
}

impl ElementHost for MemoryHost {
    fn create_wall(&mut self, spec: &WallSpec) -> Result<ElementId> {
        if self.take_rejection(HostOp::CreateWall) {
            return Err(HostError::Rejected("wall creation".into()).into());
        }
        self.check_type(spec.wall_type, TypeKind::Wall)?;
        self.check_level(spec.level)?;
        if !(spec.height.is_finite() && spec.height > 0.0) {
            return Err(HostError::Rejected(format!("wall height {}", spec.height)).into());
        }
        let id = self.model.elements.insert(Element::Wall(WallRecord {
            curve: spec.curve.clone(),
            wall_type: spec.wall_type,
            level: spec.level,
            height: spec.height,
            base_offset: spec.base_offset,
            flip: spec.flip,
            structural: spec.structural,
            join_start: true,
            join_end: true,
        }));
        debug!(wall = ?id, "created wall");
        Ok(id)
    }

    fn create_floor(
        &mut self,
        loops: &[CurveLoop],
        floor_type: ElementId,
        level: ElementId,
    ) -> Result<ElementId> {
        if self.take_rejection(HostOp::CreateFloor) {
            return Err(HostError::Rejected("floor creation".into()).into());
        }
        self.check_type(floor_type, TypeKind::Floor)?;
        self.check_level(level)?;
        Self::check_slab_loops(loops)?;
        Ok(self.model.elements.insert(Element::Floor(SlabRecord {
            loops: loops.to_vec(),
            slab_type: floor_type,
            level,
            height_offset: 0.0,
        })))
    }

    fn create_ceiling(
        &mut self,
        loops: &[CurveLoop],
        ceiling_type: ElementId,
        level: ElementId,
        height_offset: f64,
    ) -> Result<ElementId> {
        if self.take_rejection(HostOp::CreateCeiling) {
            return Err(HostError::Rejected("ceiling creation".into()).into());
        }
        self.check_type(ceiling_type, TypeKind::Ceiling)?;
        self.check_level(level)?;
        Self::check_slab_loops(loops)?;
        Ok(self.model.elements.insert(Element::Ceiling(SlabRecord {
            loops: loops.to_vec(),
            slab_type: ceiling_type,
            level,
            height_offset,
        })))
    }

    fn disallow_join_at_end(&mut self, wall: ElementId, end: WallEnd) -> Result<()> {
        if self.take_rejection(HostOp::DisallowJoin) {
            return Err(HostError::Rejected("join disallow".into()).into());
        }
        let record = self.wall_mut(wall)?;
        match end {
            WallEnd::Start => record.join_start = false,
            WallEnd::End => record.join_end = false,
        }
        Ok(())
    }

    fn wall_curve(&self, wall: ElementId) -> Result<Segment> {
        Ok(self.wall(wall)?.curve.clone())
    }

    fn set_wall_curve(&mut self, wall: ElementId, curve: Segment) -> Result<()> {
        if self.take_rejection(HostOp::SetWallCurve) {
            return Err(HostError::Rejected("wall curve update".into()).into());
        }
        self.wall_mut(wall)?.curve = curve;
        Ok(())
    }

    fn wall_width(&self, wall: ElementId) -> Result<f64> {
        let wall_type = self.wall(wall)?.wall_type;
        match self.model.elements.get(wall_type) {
            Some(Element::Type { width, .. }) => Ok(*width),
            _ => Err(HostError::NotFound(format!("wall type {wall_type:?}")).into()),
        }
    }

    fn walls(&self) -> Vec<ElementId> {
        self.model
            .elements
            .iter()
            .filter(|(_, e)| matches!(e, Element::Wall(_)))
            .map(|(id, _)| id)
            .collect()
    }

    fn is_wall(&self, id: ElementId) -> bool {
        matches!(self.model.elements.get(id), Some(Element::Wall(_)))
    }

    fn join(&mut self, a: ElementId, b: ElementId) -> Result<()> {
        if self.take_rejection(HostOp::Join) {
            return Err(HostError::Rejected("join".into()).into());
        }
        if a == b {
            return Err(HostError::Rejected("cannot join an element to itself".into()).into());
        }
        for id in [a, b] {
            if !self.model.elements.contains_key(id) {
                return Err(HostError::NotFound(format!("element {id:?}")).into());
            }
        }
        self.model.joins.insert(join_key(a, b));
        Ok(())
    }

    fn are_joined(&self, a: ElementId, b: ElementId) -> bool {
        self.model.joins.contains(&join_key(a, b))
    }

    fn begin_transaction(&mut self, name: &str) -> Result<()> {
        if let Some((open, _)) = &self.snapshot {
            return Err(HostError::Transaction(format!("'{open}' is still open")).into());
        }
        self.snapshot = Some((name.to_owned(), self.model.clone()));
        Ok(())
    }

    fn commit_transaction(&mut self) -> Result<()> {
        let Some((name, before)) = self.snapshot.take() else {
            return Err(HostError::Transaction("no open transaction".into()).into());
        };
        if self.take_rejection(HostOp::Commit) {
            self.model = before;
            return Err(HostError::Transaction(format!("commit of '{name}' failed")).into());
        }
        debug!(transaction = %name, "committed");
        self.committed.push(name);
        Ok(())
    }

    fn rollback_transaction(&mut self) -> Result<()> {
        let Some((name, before)) = self.snapshot.take() else {
            return Err(HostError::Transaction("no open transaction".into()).into());
        };
        self.model = before;
        debug!(transaction = %name, "rolled back");
        Ok(())
    }
}

/// Union of boxes, kept as the list of its parts.
impl SolidKernel for MemoryHost {
    type Solid = Vec<BoxSolid>;

    fn obstructions(&self, wall: ElementId) -> Vec<Self::Solid> {
        let Ok(record) = self.wall(wall) else {
            return Vec::new();
        };
        let (start, end) = (record.curve.start(), record.curve.end());
        let margin = self.wall_width(wall).unwrap_or(0.0);
        let lo = Point3::new(
            start.x.min(end.x) - margin,
            start.y.min(end.y) - margin,
            0.0,
        );
        let hi = Point3::new(
            start.x.max(end.x) + margin,
            start.y.max(end.y) + margin,
            0.0,
        );
        self.obstructions
            .iter()
            .filter(|b| b.overlaps_xy(&lo, &hi))
            .map(|b| vec![*b])
            .collect()
    }

    fn union(&self, a: &Self::Solid, b: &Self::Solid) -> Result<Self::Solid> {
        if self.is_rejected(HostOp::Union) {
            return Err(HostError::Rejected("solid union".into()).into());
        }
        Ok(a.iter().chain(b).copied().collect())
    }

    fn outside_segments(&self, curve: &Segment, solid: &Self::Solid) -> Result<Vec<Segment>> {
        if self.is_rejected(HostOp::Intersect) {
            return Err(HostError::Rejected("curve intersection".into()).into());
        }
        let Segment::Line(line) = curve else {
            return Err(HostError::Rejected("only lines can be clipped".into()).into());
        };
        let (start, end) = (line.start(), line.end());

        let mut inside: Vec<(f64, f64)> = solid.iter().filter_map(|b| b.clip(&start, &end)).collect();
        inside.sort_by(|a, b| a.0.total_cmp(&b.0));

        let length = line.length();
        let mut outside = Vec::new();
        let mut cursor = 0.0;
        for (t0, t1) in inside {
            if t0 > cursor {
                outside.push((cursor, t0));
            }
            cursor = cursor.max(t1);
        }
        if cursor < 1.0 {
            outside.push((cursor, 1.0));
        }

        outside
            .into_iter()
            .filter(|(a, b)| (b - a) * length > COINCIDENCE_TOLERANCE)
            .map(|(a, b)| Segment::line(line.evaluate(a)?, line.evaluate(b)?))
            .collect()
    }
}

impl TypeCatalog for MemoryHost {
    fn wall_types(&self) -> Vec<ElementType> {
        self.types_of(TypeKind::Wall)
    }

    fn floor_types(&self) -> Vec<ElementType> {
        self.types_of(TypeKind::Floor)
    }

    fn ceiling_types(&self) -> Vec<ElementType> {
        self.types_of(TypeKind::Ceiling)
    }

    fn levels(&self) -> Vec<Level> {
        self.model
            .elements
            .iter()
            .filter_map(|(id, e)| match e {
                Element::Level { name, elevation } => Some(Level {
                    id,
                    name: name.clone(),
                    elevation: *elevation,
                }),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::host::with_transaction;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point3 {
        Point3::new(x, y, 0.0)
    }

    fn host_with_wall() -> (MemoryHost, ElementId) {
        let mut host = MemoryHost::new();
        let wall_type = host.add_wall_type("Finish 20", 0.02);
        let level = host.add_level("Level 0", 0.0);
        let curve = Segment::line(p(0.0, 0.0), p(10.0, 0.0)).unwrap();
        let wall = host
            .create_wall(&WallSpec::new(curve, wall_type, level, 3.0))
            .unwrap();
        (host, wall)
    }

    #[test]
    fn creates_and_edits_walls() {
        let (mut host, wall) = host_with_wall();
        assert!(host.is_wall(wall));
        assert_eq!(host.walls(), vec![wall]);
        assert_relative_eq!(host.wall_width(wall).unwrap(), 0.02);
        assert!(host.join_allowed(wall, WallEnd::End).unwrap());
        host.disallow_join_at_end(wall, WallEnd::End).unwrap();
        assert!(!host.join_allowed(wall, WallEnd::End).unwrap());

        let shorter = Segment::line(p(1.0, 0.0), p(9.0, 0.0)).unwrap();
        host.set_wall_curve(wall, shorter.clone()).unwrap();
        assert_eq!(host.wall_curve(wall).unwrap(), shorter);
    }

    #[test]
    fn rejects_unknown_types_and_scripted_calls() {
        let (mut host, wall) = host_with_wall();
        let curve = host.wall_curve(wall).unwrap();
        // A level id is not a wall type.
        let level = host.levels()[0].id;
        assert!(host
            .create_wall(&WallSpec::new(curve.clone(), level, level, 3.0))
            .is_err());

        let wall_type = host.wall_types()[0].id;
        host.reject(HostOp::CreateWall, 1);
        let spec = WallSpec::new(curve, wall_type, level, 3.0);
        assert!(host.create_wall(&spec).is_err());
        assert!(host.create_wall(&spec).is_ok());
    }

    #[test]
    fn joins_are_symmetric() {
        let (mut host, a) = host_with_wall();
        let wall_type = host.wall_types()[0].id;
        let level = host.levels()[0].id;
        let curve = Segment::line(p(10.0, 0.0), p(10.0, 5.0)).unwrap();
        let b = host
            .create_wall(&WallSpec::new(curve, wall_type, level, 3.0))
            .unwrap();
        host.join(b, a).unwrap();
        assert!(host.are_joined(a, b));
        assert!(host.join(a, a).is_err());
    }

    #[test]
    fn rollback_restores_model() {
        let (mut host, wall) = host_with_wall();
        let result: Result<()> = with_transaction(&mut host, "Trim", |h| {
            h.set_wall_curve(wall, Segment::line(p(2.0, 0.0), p(3.0, 0.0)).unwrap())?;
            Err(HostError::Rejected("late failure".into()).into())
        });
        assert!(result.is_err());
        assert_relative_eq!(host.wall_curve(wall).unwrap().length(), 10.0);
        assert!(host.committed_transactions().is_empty());
    }

    #[test]
    fn failed_commit_discards_changes() {
        let (mut host, _) = host_with_wall();
        host.reject(HostOp::Commit, 1);
        let result = with_transaction(&mut host, "Create Floors", |h| {
            let level = h.levels()[0].id;
            let floor_type = h.add_floor_type("Generic");
            let square = CurveLoop::polygon(&[p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)]).unwrap();
            h.create_floor(&[square], floor_type, level)
        });
        assert!(result.unwrap_err().is_fatal());
        assert!(host.floors().is_empty());
        assert!(host.begin_transaction("next").is_ok());
    }

    #[test]
    fn nested_transaction_is_rejected() {
        let mut host = MemoryHost::new();
        host.begin_transaction("outer").unwrap();
        assert!(host.begin_transaction("inner").is_err());
        host.commit_transaction().unwrap();
        assert!(host.commit_transaction().is_err());
        assert_eq!(host.committed_transactions(), ["outer".to_owned()]);
    }

    #[test]
    fn clips_lines_against_boxes() {
        let (mut host, wall) = host_with_wall();
        host.add_obstruction(BoxSolid::new(Point3::new(4.0, -1.0, 0.0), Point3::new(6.0, 1.0, 3.0)));
        host.add_obstruction(BoxSolid::new(Point3::new(9.0, -1.0, 0.0), Point3::new(12.0, 1.0, 3.0)));
        host.add_obstruction(BoxSolid::new(Point3::new(50.0, 50.0, 0.0), Point3::new(51.0, 51.0, 3.0)));

        let near = host.obstructions(wall);
        assert_eq!(near.len(), 2);
        let solid = host.union(&near[0], &near[1]).unwrap();
        let curve = host.wall_curve(wall).unwrap();
        let outside = host.outside_segments(&curve, &solid).unwrap();

        assert_eq!(outside.len(), 2);
        assert_relative_eq!(outside[0].length(), 4.0, epsilon = 1e-9);
        assert_relative_eq!(outside[1].start().x, 6.0, epsilon = 1e-9);
        assert_relative_eq!(outside[1].end().x, 9.0, epsilon = 1e-9);
    }

    #[test]
    fn slabs_need_closed_loops() {
        let mut host = MemoryHost::new();
        let level = host.add_level("Level 0", 0.0);
        let ceiling_type = host.add_ceiling_type("ACTCeiling");
        let open = CurveLoop::new(vec![
            Segment::line(p(0.0, 0.0), p(1.0, 0.0)).unwrap(),
            Segment::line(p(1.0, 0.0), p(1.0, 1.0)).unwrap(),
        ]);
        assert!(host.create_ceiling(&[open], ceiling_type, level, 2.5).is_err());

        let closed = CurveLoop::polygon(&[p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)]).unwrap();
        let id = host.create_ceiling(&[closed], ceiling_type, level, 2.5).unwrap();
        assert_relative_eq!(host.slab_height_offset(id).unwrap(), 2.5);
        assert_eq!(host.ceilings(), vec![id]);
    }
}
