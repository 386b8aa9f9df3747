//! `fleet-sim` — fleet registry, delivery lifecycle, and tick scheduler.
//!
//! # Tick loop
//!
//! ```text
//! every tick_interval_ms (default 200 ms), for each robot in registry order:
//!   ① Battery   — drain while idle/delivering, charge while charging.
//!   ② Dispatch  — delivering < 15 % or idle < 20 % → nearest station;
//!                 charging ≥ 95 % → idle.
//!   ③ Motion    — follow the active journey; finish the delivery after the
//!                 last segment.
//!   ④ Speed     — 12 km/h delivering, 5 km/h charging, 0 otherwise.
//! then: snapshot robots to the persistence writer.
//! ```
//!
//! Delivery creation happens outside the tick: [`Fleet::create_delivery`]
//! (straight-line journey), [`Fleet::create_delivery_with_journey`] (caller
//! supplied), or [`FleetSim::create_delivery_routed`] (legs routed through a
//! [`fleet_route::RouteProvider`] first).
//!
//! # Cargo features
//!
//! | Feature  | Effect                                          |
//! |----------|-------------------------------------------------|
//! | `sqlite` | Enables `fleet_store::SqliteStore`.             |
//! | `osrm`   | Enables `fleet_route::OsrmProvider`.            |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fleet_core::SimConfig;
//! use fleet_route::{FallbackProvider, StraightLineProvider};
//! use fleet_sim::{FleetBuilder, FleetSim};
//! use fleet_store::MemoryStore;
//!
//! let fleet = FleetBuilder::new(SimConfig::default()).build()?;
//! let sim = FleetSim::new(fleet, Arc::new(MemoryStore::new()), Arc::new(StraightLineProvider));
//! sim.start().await;
//! ```

pub mod assembly;
pub mod builder;
pub mod error;
pub mod fleet;
pub mod handle;
pub mod observer;
mod scheduler;
mod tick;


pub use assembly::{assemble_journey, plan_legs};
pub use builder::{DEFAULT_ROBOT_COUNT, FleetBuilder, ROBOT_COLORS, default_robot_name};
pub use error::{DispatchRejection, SimError, SimResult};
pub use fleet::Fleet;
pub use handle::FleetSim;
pub use observer::{FleetEvent, FleetObserver, NoopObserver, TickReport};
