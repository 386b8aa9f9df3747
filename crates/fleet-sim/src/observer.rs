//! Tick observer hooks and the per-tick report.

use fleet_core::{Delivery, DeliveryId, Location, RobotId, Tick};
use fleet_motion::Robot;

/// Something noteworthy that happened to one robot during a tick.
#[derive(Clone, Debug, PartialEq)]
pub enum FleetEvent {
    StopReached { robot: RobotId, delivery: DeliveryId, remaining: usize },
    DeliveryCompleted { robot: RobotId, delivery: DeliveryId },
    DeliveryFailed { robot: RobotId, delivery: DeliveryId },
    ChargingStarted { robot: RobotId, station: Location },
    ChargingFinished { robot: RobotId },
}

/// Summary of one processed tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub tick: Tick,
    pub idle: usize,
    pub delivering: usize,
    pub charging: usize,
    pub events: Vec<FleetEvent>,
}

/// Callbacks invoked by [`Fleet::process_tick`][crate::Fleet::process_tick].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — completion counter
///
/// ```rust,ignore
/// struct Completed(usize);
///
/// impl FleetObserver for Completed {
///     fn on_delivery_completed(&mut self, _robot: &Robot, _delivery: &Delivery) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait FleetObserver {
    /// Called after every robot has been processed.
    fn on_tick_end(&mut self, _report: &TickReport) {}

    fn on_delivery_completed(&mut self, _robot: &Robot, _delivery: &Delivery) {}

    /// Called when a delivery is abandoned because the battery ran low.
    fn on_delivery_failed(&mut self, _robot: &Robot, _delivery: &Delivery) {}

    fn on_charging_started(&mut self, _robot: &Robot, _station: &Location) {}

    fn on_charging_finished(&mut self, _robot: &Robot) {}
}

/// A [`FleetObserver`] that does nothing.
pub struct NoopObserver;

impl FleetObserver for NoopObserver {}
