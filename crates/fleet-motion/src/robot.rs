//! The robot entity.

use chrono::{DateTime, Utc};
use fleet_core::{Delivery, DeliveryStatus, Location, RobotId, RobotStatus, SimConfig, SimRng};

use crate::{Activity, ChargingTrip, DeliveryRun, Journey, PathCursor, SegmentKind, StepOutcome};

/// One delivery robot.
///
/// Robots are created once when the fleet is seeded and are only replaced
/// wholesale by a fleet reset.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Robot {
    pub id: RobotId,
    pub name: String,
    pub color: String,
    /// Percentage in `[0, 100]`.
    pub battery: f64,
    pub location: Location,
    /// Speed reported for the last tick (km/h).
    pub speed_kmh: f64,
    pub last_update: DateTime<Utc>,
    /// Every delivery this robot accepted, in acceptance order.
    pub delivery_history: Vec<Delivery>,
    pub activity: Activity,
}

impl Robot {
    /// An idle robot with a full battery at `location`.
    pub fn new(
        id:       RobotId,
        name:     impl Into<String>,
        color:    impl Into<String>,
        location: Location,
        now:      DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            battery: 100.0,
            location,
            speed_kmh: 0.0,
            last_update: now,
            delivery_history: Vec::new(),
            activity: Activity::Idle,
        }
    }

    #[inline]
    pub fn status(&self) -> RobotStatus {
        self.activity.status()
    }

    /// The delivery or charging trip currently owned by this robot.
    pub fn current_delivery(&self) -> Option<&Delivery> {
        match &self.activity {
            Activity::Idle => None,
            Activity::Delivering(run) => Some(&run.delivery),
            Activity::Charging(trip) => Some(&trip.trip),
        }
    }

    pub fn journey(&self) -> Option<&Journey> {
        self.activity.journey()
    }

    pub fn cursor(&self) -> Option<&PathCursor> {
        self.activity.cursor()
    }

    pub fn is_servicing(&self) -> bool {
        self.cursor().is_some_and(PathCursor::is_servicing)
    }

    // ── History ──────────────────────────────────────────────────────────────

    pub fn record_history(&mut self, delivery: Delivery) {
        self.delivery_history.push(delivery);
    }

    /// Replace the history entry with the same id as `delivery`.
    pub fn update_history(&mut self, delivery: &Delivery) {
        if let Some(entry) = self.delivery_history.iter_mut().find(|d| d.id == delivery.id) {
            *entry = delivery.clone();
        }
    }

    // ── Transitions ──────────────────────────────────────────────────────────

    /// Start following `journey` for `delivery`.  Records it in the history.
    pub fn begin_delivery(&mut self, delivery: Delivery, journey: Journey) {
        self.record_history(delivery.clone());
        self.activity = Activity::Delivering(DeliveryRun::new(delivery, journey));
    }

    /// End the active delivery with `status` and go idle.
    ///
    /// Returns the concluded delivery, or `None` if none was active.
    pub fn conclude_delivery(&mut self, status: DeliveryStatus) -> Option<Delivery> {
        if !matches!(self.activity, Activity::Delivering(_)) {
            return None;
        }
        let Activity::Delivering(run) = std::mem::take(&mut self.activity) else {
            return None;
        };
        let mut delivery = run.delivery;
        delivery.status = status;
        self.update_history(&delivery);
        Some(delivery)
    }

    /// Head for `station` on a straight charging leg.
    ///
    /// The trip is a single-stop pseudo-delivery and is recorded in the
    /// history like any other.
    pub fn begin_charging(&mut self, station: &Location) {
        let trip = Delivery::start(self.id, [station.clone()]);
        let journey = Journey::charging_trip(&self.location, station);
        self.record_history(trip.clone());
        self.activity = Activity::Charging(ChargingTrip::new(trip, journey));
    }

    /// Stop charging and go idle.
    ///
    /// Returns the completed charging trip, or `None` if the robot was not
    /// charging.
    pub fn finish_charging(&mut self) -> Option<Delivery> {
        if !matches!(self.activity, Activity::Charging(_)) {
            return None;
        }
        let Activity::Charging(charging) = std::mem::take(&mut self.activity) else {
            return None;
        };
        let mut trip = charging.trip;
        trip.status = DeliveryStatus::Completed;
        self.update_history(&trip);
        Some(trip)
    }

    // ── Movement ─────────────────────────────────────────────────────────────

    /// Move one tick along the active journey.
    ///
    /// Updates `location`, pops reached stops, and snaps to a segment's
    /// destination on completion.  Returns `None` when there is nothing to
    /// follow (idle, or already waiting at a charging station).  Finishing a
    /// delivery journey is left to the caller.
    pub fn advance(&mut self, config: &SimConfig, rng: &mut SimRng) -> Option<StepOutcome> {
        let outcome = match &mut self.activity {
            Activity::Idle => return None,
            Activity::Delivering(run) => {
                let outcome = run.cursor.step(&run.journey, config.delivery_speed_kmh, config, rng);
                if matches!(outcome, StepOutcome::SegmentCompleted { kind: SegmentKind::Delivery, .. }) {
                    run.delivery.pop_stop();
                }
                outcome
            }
            Activity::Charging(trip) => {
                if trip.arrived {
                    return None;
                }
                let outcome = trip.cursor.step(&trip.journey, config.charging_speed_kmh, config, rng);
                if matches!(outcome, StepOutcome::SegmentCompleted { journey_finished: true, .. }) {
                    trip.arrived = true;
                    trip.trip.pop_stop();
                }
                outcome
            }
        };

        match &outcome {
            StepOutcome::Moved(point) => self.location.set_lng_lat(*point),
            StepOutcome::SegmentCompleted { arrived_at, .. } => self.location = arrived_at.clone(),
            _ => {}
        }
        Some(outcome)
    }
}
