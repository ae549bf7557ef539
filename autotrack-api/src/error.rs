use thiserror::Error;

/// Error taxonomy shared by every layer of the workspace.
///
/// `NotFound` and `ConcurrencyConflict` are distinct outcomes on purpose: a
/// guarded update that matches no row is reinterpreted by an existence check,
/// so callers can tell "the row was deleted" apart from "another writer got
/// there first".
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Concurrency conflict: {0}")]
    ConcurrencyConflict(String),

    /// The primary commit succeeded but the audit batch did not. Non-fatal
    /// at the save boundary; carried on the save summary instead of being
    /// returned from save itself.
    #[error("Audit write failed: {0}")]
    AuditWrite(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Standard NotFound message for an entity type / id pair.
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        ApiError::NotFound(format!("{entity} {id} does not exist"))
    }

    /// Standard conflict message for an entity type / id pair.
    pub fn conflict(entity: &str, id: impl std::fmt::Display) -> Self {
        ApiError::ConcurrencyConflict(format!(
            "{entity} {id} was changed by another writer"
        ))
    }
}
