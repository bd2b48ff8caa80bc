//! Error taxonomy for configuration, geometry and pipeline failures.
//!
//! Nothing in the engine retries: every error is reported to the caller and
//! aborts the pipeline or render that produced it.

use hexsieve_types::{GeoPoint, LogicalOperator};

/// Invalid filter or engine parameters, reported at configuration time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Wrong parameter kind or arity for the filter being configured.
    #[error("Invalid parameters for {filter}: {message}")]
    InvalidShape {
        filter: &'static str,
        message: String,
    },

    /// A parameter value outside its accepted range.
    #[error("{field} out of range: {message}")]
    OutOfRange {
        field: &'static str,
        message: String,
    },

    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(LogicalOperator),

    #[error("Unknown filter kind: {0}")]
    UnknownFilterKind(String),
}

impl ConfigError {
    pub(crate) fn shape(filter: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidShape {
            filter,
            message: message.into(),
        }
    }

    pub(crate) fn range(field: &'static str, message: impl Into<String>) -> Self {
        Self::OutOfRange {
            field,
            message: message.into(),
        }
    }
}

/// Boundary edges that cannot be linked back into closed rings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error(
        "Ring starting at {start} could not be closed: no unused edge leaves {at} after {ring_len} points"
    )]
    UnclosedRing {
        start: GeoPoint,
        at: GeoPoint,
        ring_len: usize,
    },

    #[error("Ring with {len} points is degenerate (at least 3 required)")]
    DegenerateRing { len: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum HexsieveError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// The seed filter produced no cells, so there is nothing to filter.
    #[error("Seed filter {filter} produced zero cells")]
    EmptyUniverse { filter: String },

    /// A collaborator (indexer, raster, routing response) failed.
    #[error("External data error: {0}")]
    ExternalData(String),

    /// `process()` was called before the filter was fully prepared.
    #[error("Filter {filter} is not ready: {missing} has not been set")]
    NotReady {
        filter: &'static str,
        missing: &'static str,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T, E = HexsieveError> = std::result::Result<T, E>;

impl From<serde_json::Error> for HexsieveError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
