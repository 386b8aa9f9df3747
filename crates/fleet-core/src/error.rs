//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant where they need to surface it.

use thiserror::Error;

/// The top-level error type for `fleet-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("requested {requested} distinct locations but only {available} are available")]
    NotEnoughLocations { requested: usize, available: usize },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `fleet-core`.
pub type CoreResult<T> = Result<T, CoreError>;
