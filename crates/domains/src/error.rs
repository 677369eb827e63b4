//! # AppError
//!
//! Centralized error handling for the CampusConnect core.
//! Maps domain-specific failures to actionable error types.

use thiserror::Error;

/// The primary error type for all domain operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., Post, Event, Opportunity)
    #[error("{0} not found with ID {1}")]
    NotFound(&'static str, String),

    /// The action requires an authenticated viewer but none was supplied,
    /// or the viewer is not allowed to perform it (wrong owner, ineligible).
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// Malformed input (e.g., non-numeric graduation year in a rule document,
    /// empty post body, event that ends before it starts)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The record already exists (e.g., duplicate event registration).
    /// Terminal: retrying cannot succeed.
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Optimistic transaction could not commit. Retryable; surfaced to the
    /// caller only once the retry bound is exhausted.
    #[error("transaction conflict: {0}")]
    Conflict(String),

    /// Infrastructure failure in an adapter.
    #[error("internal service error: {0}")]
    Internal(String),
}

impl AppError {
    /// Whether a failed operation may succeed if attempted again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::Conflict(_))
    }
}

/// A specialized Result type for CampusConnect logic.
pub type Result<T> = std::result::Result<T, AppError>;
