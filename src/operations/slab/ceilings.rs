use tracing::{info, warn};

use crate::error::Result;
use crate::host::{with_transaction, ElementHost, ElementId};
use crate::operations::extraction::ExtractedRoom;
use crate::report::{BatchReport, ItemOutcome};

const TRANSACTION: &str = "Create Ceilings";

/// Creates one ceiling per extracted room inside a single transaction.
///
/// All ceilings share one type and level and sit `height_offset` above it.
pub struct GenerateCeilings<'a> {
    rooms: &'a [ExtractedRoom],
    ceiling_type: ElementId,
    level: ElementId,
    height_offset: f64,
}

impl<'a> GenerateCeilings<'a> {
    /// Creates a new `GenerateCeilings` operation.
    #[must_use]
    pub fn new(rooms: &'a [ExtractedRoom], ceiling_type: ElementId, level: ElementId) -> Self {
        Self {
            rooms,
            ceiling_type,
            level,
            height_offset: 0.0,
        }
    }

    /// Sets the offset of the ceilings above the level.
    #[must_use]
    pub fn with_height_offset(mut self, height_offset: f64) -> Self {
        self.height_offset = height_offset;
        self
    }

    /// Executes the operation.
    ///
    /// # Errors
    ///
    /// Returns `HostError::Transaction` if the transaction cannot be opened or
    /// committed.
    pub fn execute<H: ElementHost + ?Sized>(&self, host: &mut H) -> Result<BatchReport> {
        let report = with_transaction(host, TRANSACTION, |host| {
            let mut report = BatchReport::new(TRANSACTION);
            for room in self.rooms {
                let label = room.descriptor.label();
                let outcome = match host.create_ceiling(
                    room.descriptor.contours(),
                    self.ceiling_type,
                    self.level,
                    self.height_offset,
                ) {
                    Ok(id) => ItemOutcome::Created(vec![id]),
                    Err(e) => {
                        warn!(room = label, error = %e, "skipping ceiling");
                        ItemOutcome::from_error(&e)
                    }
                };
                report.record(label, outcome);
            }
            Ok(report)
        })?;
        info!(%report, "ceilings generated");
        Ok(report)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;
    use crate::operations::slab::fixtures::{extract, rect_space};
    use crate::report::SkipReason;
    use approx::assert_relative_eq;

    #[test]
    fn ceilings_carry_height_offset() {
        let mut host = MemoryHost::new();
        let ceiling_type = host.add_ceiling_type("ACTCeiling");
        let level = host.add_level("Level 0", 0.0);
        let spaces = vec![
            rect_space("Office", 0.0, 0.0, 4.0, 3.0),
            rect_space("Hall", 5.0, 0.0, 9.0, 3.0),
        ];
        let extraction = extract(&spaces);

        let report = GenerateCeilings::new(&extraction.rooms, ceiling_type, level)
            .with_height_offset(2.6)
            .execute(&mut host)
            .unwrap();

        assert_eq!(report.created_elements(), host.ceilings());
        for id in host.ceilings() {
            assert_relative_eq!(host.slab_height_offset(id).unwrap(), 2.6);
            assert_eq!(host.slab_loops(id).unwrap().len(), 1);
        }
    }

    #[test]
    fn unknown_type_is_reported_as_missing() {
        let mut host = MemoryHost::new();
        let level = host.add_level("Level 0", 0.0);
        let spaces = vec![rect_space("Office", 0.0, 0.0, 4.0, 3.0)];
        let extraction = extract(&spaces);

        // A level is not a ceiling type.
        let report = GenerateCeilings::new(&extraction.rooms, level, level)
            .execute(&mut host)
            .unwrap();

        let skipped: Vec<_> = report.skipped().collect();
        assert_eq!(skipped, vec![("Office 000", &SkipReason::Missing)]);
        assert!(host.ceilings().is_empty());
    }
}
