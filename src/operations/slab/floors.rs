use tracing::{info, warn};

use crate::error::Result;
use crate::geometry::CurveLoop;
use crate::host::{with_transaction, ElementHost, ElementId, Space};
use crate::math::COINCIDENCE_TOLERANCE;
use crate::operations::contour::RebuildCurveLoop;
use crate::operations::extraction::ExtractedRoom;
use crate::report::{BatchReport, ItemOutcome};

/// Transaction name used by [`GenerateFloors`].
const TRANSACTION: &str = "Create Floors";

/// Creates one floor per extracted room inside a single transaction.
///
/// Open contours are rebuilt and closed first. A floor is placed on its
/// space's level, or on the fallback level for spaces without one.
pub struct GenerateFloors<'a> {
    rooms: &'a [ExtractedRoom],
    spaces: &'a [Space],
    floor_type: ElementId,
    fallback_level: ElementId,
    tolerance: f64,
}

impl<'a> GenerateFloors<'a> {
    /// Creates a new `GenerateFloors` operation.
    #[must_use]
    pub fn new(
        rooms: &'a [ExtractedRoom],
        spaces: &'a [Space],
        floor_type: ElementId,
        fallback_level: ElementId,
    ) -> Self {
        Self {
            rooms,
            spaces,
            floor_type,
            fallback_level,
            tolerance: COINCIDENCE_TOLERANCE,
        }
    }

    /// Sets the point coincidence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the operation.
    ///
    /// Rooms the host rejects are reported and skipped.
    ///
    /// # Errors
    ///
    /// Returns `HostError::Transaction` if the transaction cannot be opened or
    /// committed; nothing is created in that case.
    pub fn execute<H: ElementHost + ?Sized>(&self, host: &mut H) -> Result<BatchReport> {
        let report = with_transaction(host, TRANSACTION, |host| {
            let mut report = BatchReport::new(TRANSACTION);
            for room in self.rooms {
                let label = room.descriptor.label();
                let outcome = match self.create_floor(host, room) {
                    Ok(id) => ItemOutcome::Created(vec![id]),
                    Err(e) => {
                        warn!(room = label, error = %e, "skipping floor");
                        ItemOutcome::from_error(&e)
                    }
                };
                report.record(label, outcome);
            }
            Ok(report)
        })?;
        info!(%report, "floors generated");
        Ok(report)
    }

    fn create_floor<H: ElementHost + ?Sized>(
        &self,
        host: &mut H,
        room: &ExtractedRoom,
    ) -> Result<ElementId> {
        let loops = room
            .descriptor
            .contours()
            .iter()
            .map(|l| self.closed(l))
            .collect::<Result<Vec<_>>>()?;
        let level = self
            .spaces
            .get(room.space)
            .and_then(|s| s.level)
            .unwrap_or(self.fallback_level);
        host.create_floor(&loops, self.floor_type, level)
    }

    fn closed(&self, curve_loop: &CurveLoop) -> Result<CurveLoop> {
        if curve_loop.is_open(self.tolerance) {
            RebuildCurveLoop::from_loop(curve_loop)
                .with_tolerance(self.tolerance)
                .execute()
        } else {
            Ok(curve_loop.clone())
        }
    }
}
