use thiserror::Error;

use super::{AliasError, RepositoryError};

/// Outcomes of the URL service that are not a plain success.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Submitted input was rejected before touching the store
    #[error("Validation error: {0}")]
    Validation(String),

    /// No record carries the requested alias. A normal negative result.
    #[error("Alias not found: {0}")]
    AliasNotFound(String),

    #[error("Alias encoding error: {0}")]
    Encoding(#[from] AliasError),

    /// Insert, update or lookup failed for infrastructure reasons
    #[error("Store failure: {0}")]
    Store(#[from] RepositoryError),
}
