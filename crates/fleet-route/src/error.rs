//! Routing error type.

use thiserror::Error;

/// Errors produced by route providers.
///
/// None of these reach delivery callers: journey assembly substitutes the
/// straight-line route whenever a provider fails.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("a route needs at least 2 waypoints, got {0}")]
    TooFewWaypoints(usize),

    #[error("routing service returned HTTP {0}")]
    Status(u16),

    #[error("routing service rejected the request ({code}): {message}")]
    Service { code: String, message: String },

    #[error("malformed polyline: {0}")]
    Polyline(String),

    #[cfg(feature = "osrm")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type RouteResult<T> = Result<T, RouteError>;
