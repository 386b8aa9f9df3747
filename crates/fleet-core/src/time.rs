//! Simulation time model and configuration.
//!
//! # Design
//!
//! Time advances in fixed-interval ticks (200 ms by default).  A `Tick` is a
//! monotonically increasing counter; all per-tick rates in [`SimConfig`] are
//! expressed per tick, and the motion engine converts physical speeds into
//! per-tick progress with [`SimConfig::ticks_per_second`].

use std::fmt;
use std::time::Duration;

use crate::{CoreError, CoreResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The next tick.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// `Default` reproduces the tuned values of the production fleet.  The demo
/// binary can override any field from a JSON file.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Wall-clock length of one tick in milliseconds.
    pub tick_interval_ms: u64,

    /// Master RNG seed for seeding locations and service pauses.
    pub seed: u64,

    /// Cruise speed while delivering (km/h).
    pub delivery_speed_kmh: f64,
    /// Cruise speed while heading to a charging station (km/h).
    pub charging_speed_kmh: f64,

    /// Battery percentage lost per tick while delivering.
    pub delivering_drain_per_tick: f64,
    /// Battery percentage lost per tick while idle.
    pub idle_drain_per_tick: f64,
    /// Battery percentage gained per tick while charging.
    pub charge_per_tick: f64,

    /// A delivering robot below this level abandons its delivery to charge.
    pub delivering_critical: f64,
    /// An idle robot below this level goes to charge.
    pub idle_low: f64,
    /// A charging robot at or above this level becomes idle.
    pub charged: f64,
    /// Minimum battery for accepting a delivery.
    pub min_dispatch_battery: f64,

    /// Bounds of the uniformly random pause at each reached stop.
    pub service_pause_min_ms: u64,
    pub service_pause_max_ms: u64,

    /// Maximum stops per delivery request.
    pub max_stops: usize,
    /// Number of deliveries retained in the persisted global history.
    pub history_cap: usize,

    /// Geometry points with both |lng| and |lat| below this are corrupt.
    pub corrupt_point_epsilon: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms:          200,
            seed:                      42,
            delivery_speed_kmh:        12.0,
            charging_speed_kmh:        5.0,
            delivering_drain_per_tick: 0.000_001,
            idle_drain_per_tick:       0.000_000_01,
            charge_per_tick:           10.0,
            delivering_critical:       15.0,
            idle_low:                  20.0,
            charged:                   95.0,
            min_dispatch_battery:      90.0,
            service_pause_min_ms:      3_000,
            service_pause_max_ms:      5_000,
            max_stops:                 4,
            history_cap:               100,
            corrupt_point_epsilon:     0.1,
        }
    }
}

impl SimConfig {
    /// Ticks per wall-clock second (5 at the default 200 ms interval).
    #[inline]
    pub fn ticks_per_second(&self) -> f64 {
        1000.0 / self.tick_interval_ms as f64
    }

    /// The tick interval as a `Duration`.
    #[inline]
    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Reject configurations the tick loop cannot run with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.tick_interval_ms == 0 {
            return Err(CoreError::Config("tick_interval_ms must be > 0".into()));
        }
        if self.service_pause_min_ms > self.service_pause_max_ms {
            return Err(CoreError::Config(format!(
                "service pause bounds inverted: {} > {}",
                self.service_pause_min_ms, self.service_pause_max_ms
            )));
        }
        if !(self.delivery_speed_kmh > 0.0 && self.charging_speed_kmh > 0.0) {
            return Err(CoreError::Config("speeds must be positive".into()));
        }
        if self.max_stops == 0 {
            return Err(CoreError::Config("max_stops must be at least 1".into()));
        }
        Ok(())
    }
}
