//! Error types for route searches.
//!
//! Configuration errors are reported before a search allocates anything.
//! Internal invariant violations (a coordinate the engine already accepted
//! no longer maps to a tile) are defects in the caller's mapping and panic.

use thiserror::Error;

use crate::options::Cost;

/// Result type alias for search operations.
pub type SearchResult<T> = Result<T, SearchError>;

/// Everything a search can fail with.
#[derive(Error, Debug)]
pub enum SearchError {
    /// `max_depth` below 1.
    #[error("max_depth must be greater than 0, got {0}")]
    InvalidMaxDepth(Cost),

    /// `max_distance` below 1.
    #[error("max_distance must be greater than 0")]
    InvalidMaxDistance,

    /// `routes` below 1.
    #[error("routes must be greater than 0")]
    InvalidRouteCount,

    /// An option that `Fast` cannot honour.
    #[error("invalid options for the Fast strategy: {reason}")]
    FastStrategy { reason: &'static str },

    /// Loops enabled with neither a cost nor a length ceiling.
    #[error("including loops requires max_depth or max_distance")]
    UnboundedLoops,

    /// The cancel token was tripped between expansion events.
    #[error("search cancelled")]
    Cancelled,

    /// The progress callback failed; the search was abandoned.
    #[error("search aborted by progress callback: {0}")]
    Aborted(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SearchError {
    /// Whether this is a precondition failure rather than a runtime abort.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, SearchError::Cancelled | SearchError::Aborted(_))
    }
}
