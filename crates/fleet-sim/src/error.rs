//! Error types for fleet-sim.

use fleet_core::{CoreError, RobotId, RobotStatus};
use fleet_motion::MotionError;
use fleet_route::RouteError;
use thiserror::Error;

/// Errors from building a fleet or assembling a journey.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    #[error("motion error: {0}")]
    Motion(#[from] MotionError),

    #[error("routing error: {0}")]
    Route(#[from] RouteError),

    #[error("expected {expected} {what}, got {got}")]
    CountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },
}

/// Alias for `Result<T, SimError>`.
pub type SimResult<T> = Result<T, SimError>;

/// Why a delivery request was not accepted.
///
/// Delivery creation itself returns `Option`; this type lets callers that
/// need a reason ask [`Fleet::check_dispatch`][crate::Fleet::check_dispatch].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DispatchRejection {
    #[error("robot {0} not found")]
    RobotNotFound(RobotId),

    #[error("robot {robot} is {status}, not idle")]
    NotIdle { robot: RobotId, status: RobotStatus },

    #[error("robot {robot} battery {battery:.1}% is below {required:.1}%")]
    LowBattery { robot: RobotId, battery: f64, required: f64 },

    #[error("{count} stops requested, expected 1..={max}")]
    StopCount { count: usize, max: usize },
}
