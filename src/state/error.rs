//! Registry error types
//!
//! Errors returned by service registry operations. None of them leave the
//! registry partially modified.

use thiserror::Error;

/// Errors that can occur while reading or changing the service registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Request input was missing a field or had the wrong type or range
    #[error("{0}")]
    Validation(String),

    /// Id path segment was not a positive integer
    #[error("Invalid id")]
    InvalidId(String),

    /// No record exists with the given id (kept as sent in the path)
    #[error("Service not found")]
    NotFound(String),
}
