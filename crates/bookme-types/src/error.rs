use thiserror::Error;

/// Errors from repository operations (used by trait definitions in
/// bookme-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("query error: {0}")]
    Query(String),
}

/// Errors related to profile and availability operations.
///
/// Store-level failures are collapsed into `StorageError` at the operation
/// boundary; the caller gets one generic failure per attempt and retries by
/// re-invoking the action. No automatic retries anywhere.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("invalid weekday: '{0}'")]
    InvalidDay(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors related to booking operations.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("invalid weekday: '{0}'")]
    InvalidDay(String),

    /// Aggregate failure for a multi-slot submission. Slots written before
    /// the failure stay written (non-atomic across slots).
    #[error("storage error: {0}")]
    StorageError(String),
}
