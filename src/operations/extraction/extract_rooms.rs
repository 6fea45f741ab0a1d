use tracing::{debug, warn};

use crate::error::Result;
use crate::geometry::{BoundarySegment, CurveLoop, Segment};
use crate::host::Space;
use crate::math::COINCIDENCE_TOLERANCE;
use crate::operations::analysis::RoomDescriptor;
use crate::operations::contour::RebuildCurveLoop;
use crate::report::{BatchReport, ItemOutcome};

/// A room descriptor together with the space it was read from.
#[derive(Debug, Clone)]
pub struct ExtractedRoom {
    pub descriptor: RoomDescriptor,
    /// Index of the source space in the extraction input.
    pub space: usize,
}

/// Output of [`ExtractRooms`].
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Rooms in input order.
    pub rooms: Vec<ExtractedRoom>,
    pub report: BatchReport,
}

/// Reads closed room contours from space boundaries.
///
/// Every boundary loop of every space becomes its own room. Labels are
/// `"{space name} {seq:000}"` with one running sequence across the batch,
/// advanced only by rooms that were built. Loops that cannot be closed or
/// enclose no area are reported and skipped.
pub struct ExtractRooms<'a> {
    spaces: &'a [Space],
    tolerance: f64,
}

impl<'a> ExtractRooms<'a> {
    /// Creates a new `ExtractRooms` operation.
    #[must_use]
    pub fn new(spaces: &'a [Space]) -> Self {
        Self {
            spaces,
            tolerance: COINCIDENCE_TOLERANCE,
        }
    }

    /// Sets the point coincidence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the extraction.
    #[must_use]
    pub fn execute(&self) -> Extraction {
        let mut extraction = Extraction {
            rooms: Vec::new(),
            report: BatchReport::new("Extract Rooms"),
        };
        let mut sequence: u32 = 0;

        for (index, space) in self.spaces.iter().enumerate() {
            for (loop_index, boundary) in space.boundaries.iter().enumerate() {
                let item = format!("{} loop {loop_index}", space.name);
                match self.build_room(space, sequence, boundary) {
                    Ok(descriptor) => {
                        debug!(room = descriptor.label(), area = descriptor.area(), "extracted room");
                        extraction.report.record(
                            descriptor.label(),
                            ItemOutcome::Created(Vec::new()),
                        );
                        extraction.rooms.push(ExtractedRoom {
                            descriptor,
                            space: index,
                        });
                        sequence += 1;
                    }
                    Err(e) => {
                        warn!(space = %space.name, loop_index, error = %e, "skipping room contour");
                        extraction.report.record(item, ItemOutcome::from_error(&e));
                    }
                }
            }
        }
        extraction
    }

    fn build_room(
        &self,
        space: &Space,
        sequence: u32,
        boundary: &[BoundarySegment],
    ) -> Result<RoomDescriptor> {
        let pieces: Vec<Segment> = boundary.iter().map(|b| b.segment.clone()).collect();
        let outer: CurveLoop = RebuildCurveLoop::new(pieces)
            .with_tolerance(self.tolerance)
            .bridge_gaps(true)
            .execute()?;
        RoomDescriptor::new(space.name.clone(), sequence, outer)
    }
}
