use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::geometry::Segment;
use crate::host::{
    with_transaction, ElementHost, ElementId, ElementType, SolidKernel, Space, WallEnd, WallSpec,
};
use crate::math::{COINCIDENCE_TOLERANCE, MIN_SEGMENT_LENGTH};
use crate::report::{BatchReport, ItemOutcome, SkipReason};

use super::join::{join_adjacent, join_to_base};
use super::offset::{separate_overlaps, OffsetBoundary, OffsetPiece};
use super::trim::trimmed_curve;

const TRANSACTION: &str = "Create Room Finishing Walls";

/// Height used for spaces that report none.
pub const DEFAULT_ROOM_HEIGHT: f64 = 3.0;

/// A finish wall created by [`GenerateWallFinish`].
#[derive(Debug, Clone)]
pub struct FinishWall {
    pub wall: ElementId,
    /// Location curve after trimming.
    pub curve: Segment,
    pub width: f64,
    pub height: f64,
    /// Index of the source space in the operation input.
    pub space: usize,
}

/// Output of [`GenerateWallFinish`].
#[derive(Debug, Clone, Default)]
pub struct WallFinish {
    /// Created walls in creation order.
    pub walls: Vec<FinishWall>,
    /// One entry per boundary piece, plus one per space without base walls.
    pub report: BatchReport,
}

/// Lines the wall-bounded parts of each space with thin finish walls.
///
/// For every boundary piece owned by an existing wall, a wall of the finish
/// type is placed half its width inside the space, kept from auto-joining,
/// shortened to clear obstructions, then joined to its neighbours and to
/// the wall it lines. Runs of one loop that would double up along the same
/// line are cut back first. Everything happens in one transaction.
pub struct GenerateWallFinish<'a> {
    spaces: &'a [Space],
    finish_type: &'a ElementType,
    fallback_level: ElementId,
    default_height: f64,
    min_segment_length: f64,
    tolerance: f64,
}

impl<'a> GenerateWallFinish<'a> {
    /// Creates a new `GenerateWallFinish` operation.
    #[must_use]
    pub fn new(spaces: &'a [Space], finish_type: &'a ElementType, fallback_level: ElementId) -> Self {
        Self {
            spaces,
            finish_type,
            fallback_level,
            default_height: DEFAULT_ROOM_HEIGHT,
            min_segment_length: MIN_SEGMENT_LENGTH,
            tolerance: COINCIDENCE_TOLERANCE,
        }
    }

    /// Sets the wall height for spaces without one.
    #[must_use]
    pub fn with_default_height(mut self, height: f64) -> Self {
        self.default_height = height;
        self
    }

    /// Sets the length below which boundary pieces are skipped.
    #[must_use]
    pub fn with_min_segment_length(mut self, length: f64) -> Self {
        self.min_segment_length = length;
        self
    }

    /// Sets the tolerance for endpoint coincidence and trim detection.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the operation.
    ///
    /// Pieces and spaces that cannot be finished are reported and skipped;
    /// refused joins and failed trims leave the wall as created.
    ///
    /// # Errors
    ///
    /// Returns `HostError::Transaction` if the transaction cannot be opened or
    /// committed, or `OperationError::OverlapDivergence` if the runs of a loop
    /// cannot be separated; no wall survives in either case.
    pub fn execute<H>(&self, host: &mut H) -> Result<WallFinish>
    where
        H: ElementHost + SolidKernel + ?Sized,
    {
        let finish = with_transaction(host, TRANSACTION, |host| {
            let mut finish = WallFinish {
                walls: Vec::new(),
                report: BatchReport::new(TRANSACTION),
            };
            let mut generated = HashSet::new();

            for (index, space) in self.spaces.iter().enumerate() {
                let walls = self.finish_space(host, index, space, &mut finish.report)?;
                generated.extend(walls.iter().map(|w| w.wall));
                let adjacent = join_adjacent(host, &walls, self.tolerance);
                let base = join_to_base(host, &walls, &generated);
                debug!(space = %space.name, walls = walls.len(), adjacent, base, "finished space");
                finish.walls.extend(walls);
            }
            Ok(finish)
        })?;
        info!(report = %finish.report, "wall finish generated");
        Ok(finish)
    }

    fn finish_space<H>(
        &self,
        host: &mut H,
        index: usize,
        space: &Space,
        report: &mut BatchReport,
    ) -> Result<Vec<FinishWall>>
    where
        H: ElementHost + SolidKernel + ?Sized,
    {
        let loops = space.boundaries_owned_by(|id| host.is_wall(id));
        if loops.is_empty() {
            warn!(space = %space.name, "no wall-bounded boundary, skipping");
            report.record(
                space.name.clone(),
                ItemOutcome::skipped(SkipReason::NoBaseWalls, "no boundary piece is bounded by a wall"),
            );
            return Ok(Vec::new());
        }

        let height = space.height_or(self.default_height);
        let level = space.level.unwrap_or(self.fallback_level);
        let offset = OffsetBoundary::new(space, self.finish_type.width / 2.0)
            .with_min_length(self.min_segment_length)
            .with_tolerance(self.tolerance);

        let mut walls = Vec::new();
        let mut piece = 0;
        for owned in &loops {
            let outcomes = offset.execute(owned);
            let curves: Vec<Option<&Segment>> = outcomes
                .iter()
                .map(|o| match o {
                    OffsetPiece::Offset(curve) => Some(curve),
                    OffsetPiece::TooShort | OffsetPiece::Failed(_) => None,
                })
                .collect();
            let runs = separate_overlaps(&curves, self.tolerance)?;

            for (outcome, run) in outcomes.iter().zip(runs) {
                let item = format!("{} segment {piece}", space.name);
                piece += 1;
                match outcome {
                    OffsetPiece::Offset(_) if run.is_empty() => {
                        report.record(
                            item,
                            ItemOutcome::skipped(SkipReason::Overlapped, "covered by another run"),
                        );
                        continue;
                    }
                    OffsetPiece::Offset(_) => {}
                    OffsetPiece::TooShort => {
                        report.record(
                            item,
                            ItemOutcome::skipped(SkipReason::TooShort, "boundary piece too short"),
                        );
                        continue;
                    }
                    OffsetPiece::Failed(e) => {
                        warn!(item = %item, error = %e, "cannot offset boundary piece");
                        report.record(item, ItemOutcome::from_error(e));
                        continue;
                    }
                }

                let mut created = Vec::new();
                let mut failure = None;
                for curve in run {
                    match self.place_wall(host, curve, level, height) {
                        Ok((wall, curve)) => {
                            created.push(wall);
                            walls.push(FinishWall {
                                wall,
                                curve,
                                width: self.finish_type.width,
                                height,
                                space: index,
                            });
                        }
                        Err(e) => {
                            warn!(item = %item, error = %e, "skipping finish wall");
                            failure = Some(e);
                        }
                    }
                }
                match failure {
                    Some(e) if created.is_empty() => report.record(item, ItemOutcome::from_error(&e)),
                    _ => report.record(item, ItemOutcome::Created(created)),
                }
            }
        }
        Ok(walls)
    }

    /// Creates one wall and trims it; returns the wall with its final curve.
    ///
    /// A wall the host will not keep from auto-joining is still kept.
    fn place_wall<H>(
        &self,
        host: &mut H,
        curve: Segment,
        level: ElementId,
        height: f64,
    ) -> Result<(ElementId, Segment)>
    where
        H: ElementHost + SolidKernel + ?Sized,
    {
        let spec = WallSpec::new(curve, self.finish_type.id, level, height);
        let wall = host.create_wall(&spec)?;
        for end in [WallEnd::Start, WallEnd::End] {
            if let Err(e) = host.disallow_join_at_end(wall, end) {
                warn!(wall = ?wall, ?end, error = %e, "auto-join left enabled");
            }
        }

        let mut curve = spec.curve;
        if let Some(trimmed) = trimmed_curve(&*host, wall, &curve, self.tolerance) {
            match host.set_wall_curve(wall, trimmed.clone()) {
                Ok(()) => curve = trimmed,
                Err(e) => debug!(wall = ?wall, error = %e, "trim refused"),
            }
        }
        Ok((wall, curve))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{BoundarySegment, Curve};
    use crate::host::{BoxSolid, HostOp};
    use crate::math::{points_coincide, Point3};
    use crate::operations::finish::fixtures::walled_room;
    use crate::operations::slab::fixtures::rect_space;
    use approx::assert_relative_eq;

    #[test]
    fn lines_each_wall_of_a_rectangle() {
        let mut f = walled_room();
        let spaces = vec![f.space.clone()];
        let finish = GenerateWallFinish::new(&spaces, &f.finish_type, f.level)
            .execute(&mut f.host)
            .unwrap();

        assert_eq!(finish.walls.len(), 4);
        assert_eq!(finish.report.created_count(), 4);

        let bottom = &finish.walls[0].curve;
        assert_relative_eq!(bottom.start().x, 0.01, epsilon = 1e-9);
        assert_relative_eq!(bottom.start().y, 0.01, epsilon = 1e-9);
        assert_relative_eq!(bottom.end().x, 3.99, epsilon = 1e-9);

        for k in 0..4 {
            let (a, b) = (&finish.walls[k], &finish.walls[(k + 1) % 4]);
            assert!(points_coincide(&a.curve.end(), &b.curve.start(), 1e-9));
            assert!(f.host.are_joined(a.wall, b.wall));
            assert!(f.host.are_joined(a.wall, f.base[k]));
            assert!(!f.host.are_joined(a.wall, f.base[(k + 2) % 4]));
            assert!(!f.host.join_allowed(a.wall, WallEnd::Start).unwrap());
            assert!(!f.host.join_allowed(a.wall, WallEnd::End).unwrap());
            assert_relative_eq!(f.host.wall_extent(a.wall).unwrap().0, 2.7);
            assert_eq!(f.host.wall_flags(a.wall).unwrap(), (f.level, false, false));
        }
        assert_eq!(
            f.host.committed_transactions(),
            ["Create Room Finishing Walls".to_owned()]
        );
    }

    #[test]
    fn rejected_wall_does_not_stop_the_space() {
        let mut f = walled_room();
        f.host.reject(HostOp::CreateWall, 1);
        let spaces = vec![f.space.clone()];
        let finish = GenerateWallFinish::new(&spaces, &f.finish_type, f.level)
            .execute(&mut f.host)
            .unwrap();

        assert_eq!(finish.walls.len(), 3);
        let skipped: Vec<_> = finish.report.skipped().collect();
        assert_eq!(skipped, vec![("Office segment 0", &SkipReason::Rejected)]);
    }

    #[test]
    fn wall_stays_tracked_when_auto_join_cannot_be_disabled() {
        let mut f = walled_room();
        f.host.reject(HostOp::DisallowJoin, 1);
        let spaces = vec![f.space.clone()];
        let finish = GenerateWallFinish::new(&spaces, &f.finish_type, f.level)
            .execute(&mut f.host)
            .unwrap();

        assert_eq!(finish.walls.len(), 4);
        assert_eq!(finish.report.created_count(), 4);
        assert_eq!(f.host.walls().len(), f.base.len() + 4);
        let first = &finish.walls[0];
        assert!(f.host.join_allowed(first.wall, WallEnd::Start).unwrap());
        assert!(!f.host.join_allowed(first.wall, WallEnd::End).unwrap());
        assert!(f.host.are_joined(first.wall, finish.walls[1].wall));
        assert!(f.host.are_joined(first.wall, f.base[0]));
    }

    #[test]
    fn doubled_runs_are_cut_back() {
        let mut f = walled_room();
        let run = |x0: f64, x1: f64| {
            BoundarySegment::new(
                Segment::line(Point3::new(x0, -0.5, 0.0), Point3::new(x1, -0.5, 0.0)).unwrap(),
                Some(f.base[0]),
            )
        };
        let bay = Space::new("Bay")
            .with_location(Point3::new(3.0, 1.0, 0.0))
            .with_boundary(vec![run(0.0, 6.0), run(1.0, 5.0)]);
        let spaces = vec![bay];
        let finish = GenerateWallFinish::new(&spaces, &f.finish_type, f.level)
            .execute(&mut f.host)
            .unwrap();

        assert_eq!(finish.walls.len(), 2);
        let spans: Vec<(f64, f64)> = finish
            .walls
            .iter()
            .map(|w| (w.curve.start().x, w.curve.end().x))
            .collect();
        assert_relative_eq!(spans[0].0, 0.0, epsilon = 1e-9);
        assert_relative_eq!(spans[0].1, 1.0, epsilon = 1e-9);
        assert_relative_eq!(spans[1].0, 5.0, epsilon = 1e-9);
        assert_relative_eq!(spans[1].1, 6.0, epsilon = 1e-9);
        let skipped: Vec<_> = finish.report.skipped().collect();
        assert_eq!(skipped, vec![("Bay segment 1", &SkipReason::Overlapped)]);
    }

    #[test]
    fn mullion_shortens_the_wall_it_cuts() {
        let mut f = walled_room();
        f.host.add_obstruction(BoxSolid::new(
            Point3::new(1.0, -0.05, -1.0),
            Point3::new(1.5, 0.05, 5.0),
        ));
        let spaces = vec![f.space.clone()];
        let finish = GenerateWallFinish::new(&spaces, &f.finish_type, f.level)
            .execute(&mut f.host)
            .unwrap();

        let bottom = &finish.walls[0];
        assert_relative_eq!(bottom.curve.start().x, 1.5, epsilon = 1e-9);
        assert_relative_eq!(bottom.curve.end().x, 3.99, epsilon = 1e-9);
        assert_eq!(f.host.wall_curve(bottom.wall).unwrap(), bottom.curve);

        let (left, right) = (&finish.walls[3], &finish.walls[1]);
        assert!(!f.host.are_joined(left.wall, bottom.wall));
        assert!(f.host.are_joined(bottom.wall, right.wall));
        assert!(f.host.are_joined(bottom.wall, f.base[0]));
    }

    #[test]
    fn space_without_base_walls_is_reported() {
        let mut f = walled_room();
        let spaces = vec![rect_space("Hall", 10.0, 0.0, 14.0, 3.0)];
        let finish = GenerateWallFinish::new(&spaces, &f.finish_type, f.level)
            .execute(&mut f.host)
            .unwrap();

        assert!(finish.walls.is_empty());
        let skipped: Vec<_> = finish.report.skipped().collect();
        assert_eq!(skipped, vec![("Hall", &SkipReason::NoBaseWalls)]);
    }

    #[test]
    fn failed_commit_removes_every_wall() {
        let mut f = walled_room();
        f.host.reject(HostOp::Commit, 1);
        let spaces = vec![f.space.clone()];
        let err = GenerateWallFinish::new(&spaces, &f.finish_type, f.level)
            .execute(&mut f.host)
            .unwrap_err();

        assert!(err.is_fatal());
        assert_eq!(f.host.walls(), f.base);
    }
}
