//! What a robot is currently doing.
//!
//! The robot's public status is derived from its [`Activity`], so a journey
//! or cursor can only exist while the robot is actually following one.

use fleet_core::{Delivery, RobotStatus, SimConfig};

use crate::{Journey, PathCursor};

/// An accepted delivery being driven along its journey.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeliveryRun {
    pub delivery: Delivery,
    pub journey: Journey,
    pub cursor: PathCursor,
}

impl DeliveryRun {
    pub fn new(delivery: Delivery, journey: Journey) -> Self {
        Self { delivery, journey, cursor: PathCursor::new() }
    }
}

/// A trip to a charging station.
///
/// `trip` is a single-stop pseudo-delivery to the station.  Once `arrived`
/// the robot waits at the station until charged.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChargingTrip {
    pub trip: Delivery,
    pub journey: Journey,
    pub cursor: PathCursor,
    pub arrived: bool,
}

impl ChargingTrip {
    pub fn new(trip: Delivery, journey: Journey) -> Self {
        Self { trip, journey, cursor: PathCursor::new(), arrived: false }
    }
}

/// Motion state of a robot.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Activity {
    #[default]
    Idle,
    Delivering(DeliveryRun),
    Charging(ChargingTrip),
}

impl Activity {
    pub fn status(&self) -> RobotStatus {
        match self {
            Activity::Idle => RobotStatus::Idle,
            Activity::Delivering(_) => RobotStatus::Delivering,
            Activity::Charging(_) => RobotStatus::Charging,
        }
    }

    /// Reported speed for this activity.
    pub fn cruise_speed_kmh(&self, config: &SimConfig) -> f64 {
        match self {
            Activity::Idle => 0.0,
            Activity::Delivering(_) => config.delivery_speed_kmh,
            Activity::Charging(_) => config.charging_speed_kmh,
        }
    }

    pub fn journey(&self) -> Option<&Journey> {
        match self {
            Activity::Idle => None,
            Activity::Delivering(run) => Some(&run.journey),
            Activity::Charging(trip) => Some(&trip.journey),
        }
    }

    pub fn cursor(&self) -> Option<&PathCursor> {
        match self {
            Activity::Idle => None,
            Activity::Delivering(run) => Some(&run.cursor),
            Activity::Charging(trip) => Some(&trip.cursor),
        }
    }
}
