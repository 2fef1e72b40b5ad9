//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// Every domain error (`LedgerError`, `QuoteError`, ...) converts into one of
/// these variants at the service boundary. Nothing is persisted when an
/// operation returns an error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed input; the request never reached storage.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation is not legal in the entity's current state
    /// (double-settle, unsettle-when-not-settled, delete-while-linked).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Unknown id or token. Deliberately indistinguishable from "never
    /// existed" so revoked share tokens are not confirmed.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A cached balance disagrees with a fresh recompute beyond rounding
    /// tolerance. Should never occur; callers must recompute-and-overwrite.
    #[error("Consistency fault: {0}")]
    Consistency(String),

    /// External collaborator (rate source) failure.
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound(_) => 404,
            Self::InvalidState(_) => 422,
            Self::Consistency(_) | Self::ExternalService(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidState(_) => "INVALID_STATE",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Consistency(_) => "CONSISTENCY_FAULT",
            Self::ExternalService(_) => "EXTERNAL_SERVICE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
