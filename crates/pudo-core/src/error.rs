//! Error types for the join core.

use thiserror::Error;

/// Errors that abort a join run.
///
/// A failed run never yields partial results.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum JoinError {
    /// No valid PUDO coordinates to build the spatial index from.
    #[error("cannot build spatial index: target set is empty")]
    EmptyTargetSet,

    /// Distance threshold is NaN or infinite.
    #[error("invalid distance threshold {value} km: must be finite")]
    InvalidThreshold { value: f64 },
}

pub type Result<T> = std::result::Result<T, JoinError>;
