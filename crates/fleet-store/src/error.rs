//! Error types for fleet-store.

use thiserror::Error;

/// Errors a persistence backend can report.
///
/// None of these reach the simulation: the writer logs and drops them, and
/// failed loads fall back to a fresh fleet.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;
