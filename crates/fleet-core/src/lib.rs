//! `fleet-core` — foundational types for the robot fleet simulator.
//!
//! This crate is a dependency of every other `fleet-*` crate.  It has no
//! `fleet-*` dependencies and only small external ones (`rand`, `thiserror`,
//! `uuid`, `chrono`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `RobotId`, `DeliveryId`                               |
//! | [`geo`]         | `Location`, `LngLat`, planar distance helpers         |
//! | [`delivery`]    | `Delivery`, `DeliveryStatus`                          |
//! | [`status`]      | `RobotStatus` enum                                    |
//! | [`time`]        | `Tick`, `SimConfig`                                   |
//! | [`rng`]         | `SimRng` (seeded, deterministic)                      |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by `fleet-store`.                                 |

pub mod delivery;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod status;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use delivery::{Delivery, DeliveryStatus};
pub use error::{CoreError, CoreResult};
pub use geo::{LngLat, Location, METERS_PER_DEGREE};
pub use ids::{DeliveryId, RobotId};
pub use rng::SimRng;
pub use status::RobotStatus;
pub use time::{SimConfig, Tick};
