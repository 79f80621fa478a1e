//! Error types for the maintenance engine.

use thiserror::Error;

/// Errors that abort a maintenance run.
///
/// Every variant is fatal: nothing in the engine retries or recovers locally.
/// Expected conditions such as a term covered by a foreign incident are not
/// errors; they are reported through [`crate::reconcile::Notice`] and
/// [`crate::reconcile::Skip`].
#[derive(Error, Debug)]
pub enum MaintenanceError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid day specification: {0}")]
    RuleParse(String),

    #[error("Failed to read incidents: {0}")]
    RemoteRead(String),

    #[error("Failed to write incident: {0}")]
    RemoteWrite(String),

    #[error("Too many scheduled incidents registered: {found} (limit {limit})")]
    CapacityExceeded { found: usize, limit: usize },

    #[error("Unknown service: {0}")]
    UnknownService(String),
}

/// Result type alias for maintenance operations.
pub type MaintenanceResult<T> = Result<T, MaintenanceError>;
