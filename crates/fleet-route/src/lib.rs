//! `fleet-route` — route geometry and the fixed geography catalog.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                       |
//! |--------------|----------------------------------------------------------------|
//! | [`route`]    | `Route`, `RouteProvider` trait, straight-line + fallback impls |
//! | [`catalog`]  | `GeoCatalog` — sample locations and charging stations          |
//! | [`polyline`] | `decode_polyline` (encoded polyline, precision 1e5)            |
//! | [`osrm`]     | `OsrmProvider` (feature = `"osrm"` only)                       |
//! | [`error`]    | `RouteError`, `RouteResult<T>`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `osrm`  | Enables the OSRM HTTP provider via `reqwest`.                |
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |
//!
//! Route computation is the only I/O the simulator performs outside the
//! persistence layer, and it happens strictly at delivery-creation time.

pub mod catalog;
pub mod error;
pub mod polyline;
pub mod route;

#[cfg(feature = "osrm")]
pub mod osrm;


pub use catalog::GeoCatalog;
pub use error::{RouteError, RouteResult};
pub use polyline::decode_polyline;
pub use route::{FallbackProvider, Route, RouteProvider, StraightLineProvider};

#[cfg(feature = "osrm")]
pub use osrm::OsrmProvider;
