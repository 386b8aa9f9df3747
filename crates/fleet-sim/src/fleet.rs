//! The fleet registry and delivery lifecycle.

use chrono::Utc;
use fleet_core::{Delivery, Location, RobotId, RobotStatus, SimConfig, SimRng, Tick};
use fleet_motion::{BatteryModel, Journey, Robot};
use fleet_route::GeoCatalog;
use fleet_store::PersistenceWriter;
use tracing::{debug, info};

use crate::{DispatchRejection, SimError, SimResult};

/// Names and colours assigned to robots on (re)initialisation.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Roster {
    pub names: Vec<String>,
    pub colors: Vec<String>,
}

/// The simulation context: every robot plus the state the tick loop needs.
///
/// `Fleet` is synchronous and single-owner.  [`FleetSim`][crate::FleetSim]
/// wraps it for the scheduler and concurrent callers.
///
/// Create via [`FleetBuilder`][crate::FleetBuilder].
pub struct Fleet {
    pub(crate) config: SimConfig,
    pub(crate) catalog: GeoCatalog,
    pub(crate) battery: BatteryModel,
    pub(crate) robots: Vec<Robot>,
    pub(crate) rng: SimRng,
    pub(crate) tick: Tick,
    pub(crate) roster: Roster,
    pub(crate) persistence: Option<PersistenceWriter>,
}

impl Fleet {
    // ── Registry ──────────────────────────────────────────────────────────

    /// Replace all robots with `names.len()` fresh robots at distinct random
    /// catalog locations.
    pub fn initialize(&mut self, names: Vec<String>, colors: Vec<String>) -> SimResult<()> {
        if colors.len() != names.len() {
            return Err(SimError::CountMismatch {
                expected: names.len(),
                got:      colors.len(),
                what:     "robot colors",
            });
        }
        let locations = self.catalog.sample_distinct(names.len(), &mut self.rng)?;
        let now = Utc::now();

        self.robots = names
            .iter()
            .zip(&colors)
            .zip(locations)
            .enumerate()
            .map(|(i, ((name, color), location))| {
                Robot::new(RobotId::from_index(i), name.as_str(), color.as_str(), location, now)
            })
            .collect();
        self.roster = Roster { names, colors };
        self.tick = Tick::ZERO;
        info!(robots = self.robots.len(), "fleet initialized");
        Ok(())
    }

    /// Discard all robot state and seed the same roster again.
    pub fn reset(&mut self) -> SimResult<()> {
        let Roster { names, colors } = self.roster.clone();
        self.initialize(names, colors)
    }

    /// Replace the registry with previously persisted robots.
    pub fn replace_robots(&mut self, robots: Vec<Robot>) {
        info!(robots = robots.len(), "fleet restored from snapshot");
        self.robots = robots;
    }

    pub fn list_robots(&self) -> &[Robot] {
        &self.robots
    }

    pub fn get_robot(&self, id: RobotId) -> Option<&Robot> {
        self.robots.iter().find(|r| r.id == id)
    }

    fn robot_index(&self, id: RobotId) -> Option<usize> {
        self.robots.iter().position(|r| r.id == id)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn catalog(&self) -> &GeoCatalog {
        &self.catalog
    }

    /// Number of ticks processed since the last (re)initialisation.
    pub fn current_tick(&self) -> Tick {
        self.tick
    }

    pub fn sample_locations(&self) -> &[Location] {
        self.catalog.sample_locations()
    }

    pub fn charging_stations(&self) -> &[Location] {
        self.catalog.charging_stations()
    }

    pub fn find_nearest_charging_station(&self, location: &Location) -> Option<&Location> {
        self.catalog.nearest_charging_station(location)
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Check whether `robot` could accept a delivery with `stop_count` stops.
    pub fn check_dispatch(&self, robot: RobotId, stop_count: usize) -> Result<(), DispatchRejection> {
        if stop_count == 0 || stop_count > self.config.max_stops {
            return Err(DispatchRejection::StopCount { count: stop_count, max: self.config.max_stops });
        }
        let r = self.get_robot(robot).ok_or(DispatchRejection::RobotNotFound(robot))?;
        if r.status() != RobotStatus::Idle {
            return Err(DispatchRejection::NotIdle { robot, status: r.status() });
        }
        if r.battery < self.config.min_dispatch_battery {
            return Err(DispatchRejection::LowBattery {
                robot,
                battery:  r.battery,
                required: self.config.min_dispatch_battery,
            });
        }
        Ok(())
    }

    /// Assign `stops` to `robot` without a routed journey.
    ///
    /// The robot follows straight lines through the stops and on to the
    /// charging station nearest the last stop.  Returns `None` if the robot
    /// cannot accept the delivery, leaving the fleet untouched.
    pub fn create_delivery(&mut self, robot: RobotId, stops: Vec<Location>) -> Option<Delivery> {
        if let Err(reason) = self.check_dispatch(robot, stops.len()) {
            debug!(%robot, %reason, "delivery rejected");
            return None;
        }
        let origin = self.get_robot(robot)?.location.clone();
        let station = stops
            .last()
            .and_then(|last| self.catalog.nearest_charging_station(last))
            .cloned();
        let journey = match Journey::straight_line(&origin, &stops, station.as_ref()) {
            Ok(journey) => journey,
            Err(e) => {
                debug!(%robot, error = %e, "delivery rejected");
                return None;
            }
        };
        let speed_mps = self.config.delivery_speed_kmh / 3.6;
        let eta_secs = journey.total_distance_m() / speed_mps;
        self.assign(robot, stops, journey, eta_secs)
    }

    /// Assign `stops` to `robot` along a prepared `journey`.
    ///
    /// The journey must have one delivery segment per stop.  Returns `None`
    /// if the robot cannot accept the delivery, leaving the fleet untouched.
    pub fn create_delivery_with_journey(
        &mut self,
        robot:   RobotId,
        stops:   Vec<Location>,
        journey: Journey,
    ) -> Option<Delivery> {
        if let Err(reason) = self.check_dispatch(robot, stops.len()) {
            debug!(%robot, %reason, "delivery rejected");
            return None;
        }
        if let Err(e) = journey.check_stops(stops.len()) {
            debug!(%robot, error = %e, "delivery rejected");
            return None;
        }
        let eta_secs = journey.total_duration_s();
        self.assign(robot, stops, journey, eta_secs)
    }

    fn assign(
        &mut self,
        robot:    RobotId,
        stops:    Vec<Location>,
        journey:  Journey,
        eta_secs: f64,
    ) -> Option<Delivery> {
        let index = self.robot_index(robot)?;
        let delivery = Delivery::start(robot, stops).with_eta_secs(eta_secs);
        let segments = journey.len();

        let r = &mut self.robots[index];
        r.begin_delivery(delivery.clone(), journey);
        r.speed_kmh = r.activity.cruise_speed_kmh(&self.config);

        if let Some(writer) = &self.persistence {
            writer.record_delivery(delivery.clone());
        }
        info!(
            %robot,
            delivery = %delivery.id,
            stops = delivery.stops.len(),
            segments,
            "delivery created"
        );
        Some(delivery)
    }
}
