//! `fleet-store` — best-effort persistence for the fleet simulator.
//!
//! Two backends are provided, plus a stand-in for an unreachable store:
//!
//! | Feature   | Backend            | Storage                                         |
//! |-----------|--------------------|-------------------------------------------------|
//! | *(none)*  | [`MemoryStore`]    | process memory                                  |
//! | `sqlite`  | [`SqliteStore`]    | one key/value table of JSON blobs               |
//! | *(none)*  | [`UnavailableStore`] | nothing; every call fails                     |
//!
//! All backends implement [`FleetStore`].  The simulation never awaits a
//! store from the tick loop: it queues commands on a [`PersistenceWriter`],
//! whose background task applies them in order and logs failures.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fleet_store::{MemoryStore, PersistenceWriter};
//!
//! let store = Arc::new(MemoryStore::new());
//! let (writer, _task) = PersistenceWriter::spawn(store.clone(), 100);
//! writer.save_robots(robots.clone());
//! writer.flush().await;
//! ```

pub mod error;
pub mod memory;
pub mod state;
pub mod store;
pub mod unavailable;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use state::SimulationState;
pub use store::{DELIVERIES_KEY, FleetStore, ROBOTS_KEY, SIMULATION_STATE_KEY, keep_last};
pub use unavailable::UnavailableStore;
pub use writer::{PersistenceWriter, WriteCommand};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
