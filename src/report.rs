//! Per-item outcomes of batch operations.
//!
//! Batch operations never stop at the first bad room or segment. Each item
//! records whether it produced something or why it was skipped, and the
//! caller inspects the aggregated [`BatchReport`].

use std::fmt;

use crate::error::RoomformError;
use crate::host::ElementId;

/// Why an item produced nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Fewer than 3 usable points after cleanup.
    MalformedContour,
    /// Zero-length curve, zero-area polygon or undefined direction.
    DegenerateGeometry,
    /// The host refused a request.
    Rejected,
    /// No boundary piece is owned by a wall.
    NoBaseWalls,
    /// Boundary piece below the minimum length.
    TooShort,
    /// Finish run fully covered by another run of the same loop.
    Overlapped,
    /// A required type or level does not exist.
    Missing,
}

impl SkipReason {
    /// Classifies a recoverable error.
    #[must_use]
    pub fn from_error(err: &RoomformError) -> Self {
        use crate::error::{ContourError, HostError};
        match err {
            RoomformError::Contour(ContourError::Malformed { .. } | ContourError::Empty) => {
                Self::MalformedContour
            }
            RoomformError::Host(HostError::NotFound(_)) => Self::Missing,
            RoomformError::Host(_) => Self::Rejected,
            RoomformError::Geometry(_)
            | RoomformError::Contour(_)
            | RoomformError::Operation(_) => Self::DegenerateGeometry,
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::MalformedContour => "malformed contour",
            Self::DegenerateGeometry => "degenerate geometry",
            Self::Rejected => "rejected by host",
            Self::NoBaseWalls => "no base walls",
            Self::TooShort => "segment too short",
            Self::Overlapped => "overlapped by another run",
            Self::Missing => "missing type or level",
        };
        f.write_str(text)
    }
}

/// Result of processing one item.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    /// The item produced these elements (possibly none, e.g. a join).
    Created(Vec<ElementId>),
    Skipped { reason: SkipReason, detail: String },
}

impl ItemOutcome {
    #[must_use]
    pub fn skipped(reason: SkipReason, detail: impl Into<String>) -> Self {
        Self::Skipped {
            reason,
            detail: detail.into(),
        }
    }

    /// Wraps a recoverable error as a skip.
    #[must_use]
    pub fn from_error(err: &RoomformError) -> Self {
        Self::skipped(SkipReason::from_error(err), err.to_string())
    }

    #[must_use]
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// One labelled entry of a [`BatchReport`].
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRecord {
    /// Room label or other item key.
    pub item: String,
    pub outcome: ItemOutcome,
}

/// Outcomes of one batch phase, in processing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Name of the phase, e.g. the transaction name.
    pub phase: String,
    pub items: Vec<ItemRecord>,
}

impl BatchReport {
    #[must_use]
    pub fn new(phase: impl Into<String>) -> Self {
        Self {
            phase: phase.into(),
            items: Vec::new(),
        }
    }

    pub fn record(&mut self, item: impl Into<String>, outcome: ItemOutcome) {
        self.items.push(ItemRecord {
            item: item.into(),
            outcome,
        });
    }

    /// Appends every entry of `other`.
    pub fn merge(&mut self, other: BatchReport) {
        self.items.extend(other.items);
    }

    /// Number of items that created something.
    #[must_use]
    pub fn created_count(&self) -> usize {
        self.items.iter().filter(|r| r.outcome.is_created()).count()
    }

    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.items.len() - self.created_count()
    }

    /// Every element created in this phase.
    #[must_use]
    pub fn created_elements(&self) -> Vec<ElementId> {
        self.items
            .iter()
            .filter_map(|r| match &r.outcome {
                ItemOutcome::Created(ids) => Some(ids.iter().copied()),
                ItemOutcome::Skipped { .. } => None,
            })
            .flatten()
            .collect()
    }

    /// Skipped entries with their reasons.
    pub fn skipped(&self) -> impl Iterator<Item = (&str, &SkipReason)> {
        self.items.iter().filter_map(|r| match &r.outcome {
            ItemOutcome::Skipped { reason, .. } => Some((r.item.as_str(), reason)),
            ItemOutcome::Created(_) => None,
        })
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} created, {} skipped",
            self.phase,
            self.created_count(),
            self.skipped_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ContourError, GeometryError, HostError};
    use slotmap::SlotMap;

    #[test]
    fn classifies_errors() {
        let malformed: RoomformError = ContourError::Malformed { points: 2 }.into();
        let degenerate: RoomformError = GeometryError::ZeroVector.into();
        let rejected: RoomformError = HostError::Rejected("join".into()).into();
        let missing: RoomformError = HostError::NotFound("level".into()).into();
        assert_eq!(SkipReason::from_error(&malformed), SkipReason::MalformedContour);
        assert_eq!(SkipReason::from_error(&degenerate), SkipReason::DegenerateGeometry);
        assert_eq!(SkipReason::from_error(&rejected), SkipReason::Rejected);
        assert_eq!(SkipReason::from_error(&missing), SkipReason::Missing);
    }

    #[test]
    fn counts_and_summary() {
        let mut ids: SlotMap<ElementId, ()> = SlotMap::with_key();
        let a = ids.insert(());
        let b = ids.insert(());

        let mut report = BatchReport::new("Create Floors");
        report.record("Office 000", ItemOutcome::Created(vec![a]));
        report.record(
            "Office 001",
            ItemOutcome::skipped(SkipReason::MalformedContour, "2 points"),
        );
        let mut more = BatchReport::new("Create Floors");
        more.record("Hall 002", ItemOutcome::Created(vec![b]));
        report.merge(more);

        assert_eq!(report.created_count(), 2);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(report.created_elements(), vec![a, b]);
        let skipped: Vec<_> = report.skipped().collect();
        assert_eq!(skipped, vec![("Office 001", &SkipReason::MalformedContour)]);
        assert_eq!(report.to_string(), "Create Floors: 2 created, 1 skipped");
    }
}
