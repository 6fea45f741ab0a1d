use thiserror::Error;

/// Top-level error type for roomform.
#[derive(Debug, Error)]
pub enum RoomformError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Contour(#[from] ContourError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Host(#[from] HostError),
}

impl RoomformError {
    /// Returns `true` for errors that abort a whole batch instead of a single item.
    ///
    /// Overlap divergence signals malformed input and failed transactions
    /// cannot be partially recovered; everything else is skipped per item.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Operation(OperationError::OverlapDivergence { .. })
                | Self::Host(HostError::Transaction(_))
        )
    }
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    #[error("operation requires an arc segment")]
    NotAnArc,
}

/// Errors related to contour reconstruction.
#[derive(Debug, Error)]
pub enum ContourError {
    #[error("malformed contour: {points} usable point(s), at least 3 required")]
    Malformed { points: usize },

    #[error("contour has no segments")]
    Empty,

    #[error("contour is not closed")]
    NotClosed,
}

/// Errors related to contour and generation operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("overlap resolution did not converge after {passes} passes")]
    OverlapDivergence { passes: usize },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Errors reported by the host application collaborators.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("host rejected request: {0}")]
    Rejected(String),

    #[error("element not found: {0}")]
    NotFound(String),

    #[error("transaction failed: {0}")]
    Transaction(String),
}

/// Convenience type alias for results using [`RoomformError`].
pub type Result<T> = std::result::Result<T, RoomformError>;
