//! One finishing run over a document: floors, ceilings and finish walls.

use std::fmt;

use tracing::{info, warn};

use crate::cache::{level_or_first, type_or_first, DocumentId, TypeCache};
use crate::config::FinishConfig;
use crate::error::Result;
use crate::host::{ElementHost, ElementId, ElementType, SolidKernel, Space, TypeCatalog};
use crate::operations::extraction::{ExtractRooms, ExtractedRoom};
use crate::operations::finish::GenerateWallFinish;
use crate::operations::slab::{GenerateCeilings, GenerateFloors};
use crate::report::{BatchReport, ItemOutcome, SkipReason};

/// Reports of every phase of a [`FinishingSession::run`].
///
/// Disabled phases are `None`.
#[derive(Debug, Clone, Default)]
pub struct SessionReport {
    pub extraction: BatchReport,
    pub floors: Option<BatchReport>,
    pub ceilings: Option<BatchReport>,
    pub wall_finish: Option<BatchReport>,
}

impl SessionReport {
    /// Iterates over the reports of the phases that ran, in run order.
    pub fn phases(&self) -> impl Iterator<Item = &BatchReport> {
        std::iter::once(&self.extraction)
            .chain(self.floors.as_ref())
            .chain(self.ceilings.as_ref())
            .chain(self.wall_finish.as_ref())
    }

    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.phases().map(BatchReport::skipped_count).sum()
    }
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for phase in self.phases() {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{phase}")?;
        }
        Ok(())
    }
}

/// Runs the finishing phases against one document.
///
/// Types and levels are looked up once per document through a
/// [`TypeCache`]; the cache can be carried from one session to the next.
#[derive(Debug)]
pub struct FinishingSession {
    document: DocumentId,
    config: FinishConfig,
    cache: TypeCache,
}

impl FinishingSession {
    /// Creates a session for `document`.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if `config` does not validate.
    pub fn new(document: DocumentId, config: FinishConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            document,
            config,
            cache: TypeCache::new(),
        })
    }

    /// Reuses a type cache filled by an earlier session.
    #[must_use]
    pub fn with_cache(mut self, cache: TypeCache) -> Self {
        self.cache = cache;
        self
    }

    #[must_use]
    pub fn config(&self) -> &FinishConfig {
        &self.config
    }

    /// Gives the type cache back for the next session.
    #[must_use]
    pub fn into_cache(self) -> TypeCache {
        self.cache
    }

    /// Extracts rooms from `spaces`, then creates floors, ceilings and
    /// finish walls, each phase in its own transaction.
    ///
    /// A phase whose type or level cannot be resolved creates nothing and
    /// reports one `Missing` item.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error (see `RoomformError::is_fatal`). Phases
    /// committed before it stay in the model.
    pub fn run<H>(&mut self, host: &mut H, spaces: &[Space]) -> Result<SessionReport>
    where
        H: ElementHost + SolidKernel + TypeCatalog + ?Sized,
    {
        let extraction = ExtractRooms::new(spaces)
            .with_tolerance(self.config.coincidence_tolerance)
            .execute();
        info!(report = %extraction.report, "rooms extracted");

        let mut report = SessionReport {
            extraction: extraction.report,
            ..SessionReport::default()
        };
        if self.config.generate_floors {
            report.floors = Some(self.floors(host, &extraction.rooms, spaces)?);
        }
        if self.config.generate_ceilings {
            report.ceilings = Some(self.ceilings(host, &extraction.rooms)?);
        }
        if self.config.generate_wall_finish {
            report.wall_finish = Some(self.wall_finish(host, spaces)?);
        }
        info!(%report, "finishing session done");
        Ok(report)
    }

    fn floors<H>(
        &mut self,
        host: &mut H,
        rooms: &[ExtractedRoom],
        spaces: &[Space],
    ) -> Result<BatchReport>
    where
        H: ElementHost + TypeCatalog + ?Sized,
    {
        let floor_type = self
            .cache
            .floor_types(self.document, &*host)
            .first()
            .map(|t| t.id);
        let (Some(floor_type), Some(level)) = (floor_type, self.level(&*host)) else {
            return Ok(missing("Create Floors", "no floor type or level"));
        };
        GenerateFloors::new(rooms, spaces, floor_type, level)
            .with_tolerance(self.config.coincidence_tolerance)
            .execute(host)
    }

    fn ceilings<H>(&mut self, host: &mut H, rooms: &[ExtractedRoom]) -> Result<BatchReport>
    where
        H: ElementHost + TypeCatalog + ?Sized,
    {
        let ceiling_type = type_or_first(
            self.cache.ceiling_types(self.document, &*host),
            &self.config.ceiling_type_name,
        )
        .map(|t| t.id);
        let (Some(ceiling_type), Some(level)) = (ceiling_type, self.level(&*host)) else {
            return Ok(missing("Create Ceilings", "no ceiling type or level"));
        };
        GenerateCeilings::new(rooms, ceiling_type, level)
            .with_height_offset(self.config.ceiling_height)
            .execute(host)
    }

    fn wall_finish<H>(&mut self, host: &mut H, spaces: &[Space]) -> Result<BatchReport>
    where
        H: ElementHost + SolidKernel + TypeCatalog + ?Sized,
    {
        let name = &self.config.finish_type_name;
        let finish_type: Option<ElementType> = self
            .cache
            .wall_types(self.document, &*host)
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .cloned();
        let Some(finish_type) = finish_type else {
            return Ok(missing(
                "Create Room Finishing Walls",
                format!("no wall type named '{name}'"),
            ));
        };
        let Some(level) = self.level(&*host) else {
            return Ok(missing("Create Room Finishing Walls", "no level"));
        };
        let finish = GenerateWallFinish::new(spaces, &finish_type, level)
            .with_default_height(self.config.default_room_height)
            .with_min_segment_length(self.config.min_segment_length)
            .with_tolerance(self.config.coincidence_tolerance)
            .execute(host)?;
        Ok(finish.report)
    }

    fn level<C: TypeCatalog + ?Sized>(&mut self, catalog: &C) -> Option<ElementId> {
        level_or_first(
            self.cache.levels(self.document, catalog),
            &self.config.level_name,
        )
        .map(|l| l.id)
    }
}

fn missing(phase: &str, detail: impl Into<String>) -> BatchReport {
    let detail = detail.into();
    warn!(phase, detail = %detail, "phase skipped");
    let mut report = BatchReport::new(phase);
    report.record(phase, ItemOutcome::skipped(SkipReason::Missing, detail));
    report
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{OperationError, RoomformError};
    use crate::host::HostOp;
    use crate::operations::finish::fixtures::walled_room;
    use approx::assert_relative_eq;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn config() -> FinishConfig {
        FinishConfig {
            finish_type_name: "gypsum 20".into(),
            ceiling_height: 2.6,
            ..FinishConfig::default()
        }
    }

    #[test]
    fn runs_every_phase_in_its_own_transaction() {
        init_tracing();
        let mut f = walled_room();
        let floor_type = f.host.add_floor_type("Generic 150");
        let ceiling_type = f.host.add_ceiling_type("ACTCeiling");
        let spaces = vec![f.space.clone()];

        let mut session = FinishingSession::new(DocumentId(7), config()).unwrap();
        let report = session.run(&mut f.host, &spaces).unwrap();

        assert_eq!(report.extraction.created_count(), 1);
        assert_eq!(report.floors.as_ref().unwrap().created_count(), 1);
        assert_eq!(report.ceilings.as_ref().unwrap().created_count(), 1);
        assert_eq!(report.wall_finish.as_ref().unwrap().created_count(), 4);
        assert_eq!(report.skipped_count(), 0);
        assert_eq!(
            f.host.committed_transactions(),
            ["Create Floors", "Create Ceilings", "Create Room Finishing Walls"]
        );

        let floor = f.host.floors()[0];
        assert_eq!(f.host.slab_placement(floor).unwrap(), (floor_type, f.level));
        let ceiling = f.host.ceilings()[0];
        assert_eq!(f.host.slab_placement(ceiling).unwrap(), (ceiling_type, f.level));
        assert_relative_eq!(f.host.slab_height_offset(ceiling).unwrap(), 2.6);
        assert!(session.into_cache().contains(DocumentId(7)));
    }

    #[test]
    fn unknown_finish_type_skips_only_that_phase() {
        init_tracing();
        let mut f = walled_room();
        f.host.add_floor_type("Generic 150");
        let spaces = vec![f.space.clone()];
        let config = FinishConfig {
            finish_type_name: "Plaster".into(),
            generate_ceilings: false,
            ..FinishConfig::default()
        };

        let report = FinishingSession::new(DocumentId(1), config)
            .unwrap()
            .run(&mut f.host, &spaces)
            .unwrap();

        assert!(report.ceilings.is_none());
        assert_eq!(report.floors.unwrap().created_count(), 1);
        let finish = report.wall_finish.unwrap();
        let skipped: Vec<_> = finish.skipped().collect();
        assert_eq!(
            skipped,
            vec![("Create Room Finishing Walls", &SkipReason::Missing)]
        );
        assert_eq!(f.host.walls(), f.base);
    }

    #[test]
    fn cache_carries_over_between_sessions() {
        init_tracing();
        let mut f = walled_room();
        f.host.add_floor_type("Generic 150");
        let spaces = vec![f.space.clone()];
        let floors_only = FinishConfig {
            generate_ceilings: false,
            generate_wall_finish: false,
            ..FinishConfig::default()
        };

        let mut first = FinishingSession::new(DocumentId(3), floors_only.clone()).unwrap();
        first.run(&mut f.host, &spaces).unwrap();

        // Types added after the first run stay invisible to the cached document.
        f.host.add_floor_type("Generic 300");
        let mut second = FinishingSession::new(DocumentId(3), floors_only)
            .unwrap()
            .with_cache(first.into_cache());
        let report = second.run(&mut f.host, &spaces).unwrap();

        assert_eq!(report.floors.unwrap().created_count(), 1);
        assert_eq!(second.config().level_name, "Level 0");
        let floors = f.host.floors();
        assert_eq!(
            f.host.slab_placement(floors[0]).unwrap().0,
            f.host.slab_placement(floors[1]).unwrap().0
        );
    }

    #[test]
    fn invalid_config_is_refused() {
        let err = FinishingSession::new(DocumentId(1), FinishConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            RoomformError::Operation(OperationError::InvalidInput(_))
        ));
    }

    #[test]
    fn failed_commit_stops_the_session() {
        init_tracing();
        let mut f = walled_room();
        f.host.add_floor_type("Generic 150");
        f.host.reject(HostOp::Commit, 1);
        let spaces = vec![f.space.clone()];

        let err = FinishingSession::new(DocumentId(1), config())
            .unwrap()
            .run(&mut f.host, &spaces)
            .unwrap_err();

        assert!(err.is_fatal());
        assert!(f.host.floors().is_empty());
        assert_eq!(f.host.walls(), f.base);
    }
}
