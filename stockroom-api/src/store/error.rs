//! Store error types.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No product row has the given id.
    #[error("product {0} not found")]
    NotFound(i64),

    /// I/O or constraint failure reported by SQLite.
    #[error("{0}")]
    Storage(#[from] sqlx::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
