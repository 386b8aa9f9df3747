//! `fleet-motion` — journeys, path following, battery, and robot state.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                          |
//! |--------------|-------------------------------------------------------------------|
//! | [`journey`]  | `Segment`, `SegmentKind`, `Journey`                               |
//! | [`engine`]   | `PathCursor` — per-tick interpolation along a journey             |
//! | [`battery`]  | `BatteryModel` — per-tick drain/charge and threshold checks       |
//! | [`activity`] | `Activity` — `Idle` / `Delivering` / `Charging` motion state      |
//! | [`robot`]    | `Robot` entity                                                    |
//! | [`error`]    | `MotionError`, `MotionResult<T>`                                  |
//!
//! # Movement model (distance-driven progress)
//!
//! Every moving robot follows a [`Journey`]: an ordered list of segments
//! with precomputed geometry.  Each tick the cursor advances by
//! `1 / ticks_to_traverse`, where `ticks_to_traverse` comes from the
//! segment's physical length and the robot's cruise speed, so visual speed
//! is the same on a 200 m leg and a 5 km leg.  The position is a linear
//! blend between the two geometry points bracketing the progress fraction.
//!
//! Reaching the end of a segment starts a servicing pause (cargo handoff)
//! during which the robot does not move.

pub mod activity;
pub mod battery;
pub mod engine;
pub mod error;
pub mod journey;
pub mod robot;

#[cfg(test)]
mod tests;

pub use activity::{Activity, ChargingTrip, DeliveryRun};
pub use battery::{BatteryAction, BatteryModel};
pub use engine::{PathCursor, StepOutcome, ticks_to_traverse, valid_points};
pub use error::{MotionError, MotionResult};
pub use journey::{Journey, Segment, SegmentKind};
pub use robot::Robot;
