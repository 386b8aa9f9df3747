//! The per-tick state machine.
//!
//! Each robot is processed in registry order:
//!
//! ```text
//! ① Battery   — drain or charge by current status, clamped to [0, 100].
//! ② Dispatch  — low battery → abandon delivery (failed) and head to the
//!               nearest station; charged → idle.
//! ③ Motion    — advance along the active journey; the last segment of a
//!               delivery journey completes the delivery.
//! ④ Speed     — report the cruise speed of the resulting activity.
//! ```

use chrono::{DateTime, Utc};
use fleet_core::{DeliveryStatus, RobotStatus};
use fleet_motion::{BatteryAction, SegmentKind, StepOutcome};
use tracing::{debug, info, warn};

use crate::{Fleet, FleetEvent, FleetObserver, TickReport};

impl Fleet {
    /// Advance every robot by one tick.
    pub fn process_tick<O: FleetObserver + ?Sized>(&mut self, observer: &mut O) -> TickReport {
        let now = Utc::now();
        let mut report = TickReport { tick: self.tick, ..TickReport::default() };

        for index in 0..self.robots.len() {
            self.step_robot(index, now, observer, &mut report.events);
        }

        for robot in &self.robots {
            match robot.status() {
                RobotStatus::Idle => report.idle += 1,
                RobotStatus::Delivering => report.delivering += 1,
                RobotStatus::Charging => report.charging += 1,
                RobotStatus::Maintenance | RobotStatus::Offline => {}
            }
        }

        observer.on_tick_end(&report);
        if let Some(writer) = &self.persistence {
            writer.save_robots(self.robots.clone());
        }
        self.tick = self.tick.next();
        report
    }

    /// Run exactly `n` ticks.  Returns every event in order.
    pub fn run_ticks<O: FleetObserver + ?Sized>(&mut self, n: u64, observer: &mut O) -> Vec<FleetEvent> {
        let mut events = Vec::new();
        for _ in 0..n {
            events.extend(self.process_tick(observer).events);
        }
        events
    }

    fn step_robot<O: FleetObserver + ?Sized>(
        &mut self,
        index:    usize,
        now:      DateTime<Utc>,
        observer: &mut O,
        events:   &mut Vec<FleetEvent>,
    ) {
        let robot = &mut self.robots[index];

        // ── ① Battery ─────────────────────────────────────────────────────
        let status = robot.status();
        robot.battery = self.battery.update(robot.battery, status);

        // ── ② Charging dispatch ───────────────────────────────────────────
        match self.battery.check(robot.battery, status) {
            BatteryAction::SeekCharge => {
                match self.catalog.nearest_charging_station(&robot.location) {
                    Some(station) => {
                        if let Some(failed) = robot.conclude_delivery(DeliveryStatus::Failed) {
                            warn!(
                                robot = %robot.id,
                                delivery = %failed.id,
                                battery = robot.battery,
                                stops_left = failed.stops.len(),
                                "battery critical, delivery abandoned"
                            );
                            if let Some(writer) = &self.persistence {
                                writer.update_delivery_status(failed.id, DeliveryStatus::Failed);
                            }
                            observer.on_delivery_failed(robot, &failed);
                            events.push(FleetEvent::DeliveryFailed { robot: robot.id, delivery: failed.id });
                        }
                        robot.begin_charging(station);
                        info!(robot = %robot.id, battery = robot.battery, station = %station.address, "heading to charge");
                        observer.on_charging_started(robot, station);
                        events.push(FleetEvent::ChargingStarted { robot: robot.id, station: station.clone() });
                    }
                    None => warn!(robot = %robot.id, "battery low but no charging station known"),
                }
            }
            BatteryAction::FinishCharging => {
                if robot.finish_charging().is_some() {
                    info!(robot = %robot.id, battery = robot.battery, "charging finished");
                    observer.on_charging_finished(robot);
                    events.push(FleetEvent::ChargingFinished { robot: robot.id });
                }
            }
            BatteryAction::None => {}
        }

        // ── ③ Motion ──────────────────────────────────────────────────────
        let outcome = robot.advance(&self.config, &mut self.rng);
        if let Some(StepOutcome::SegmentCompleted { index: segment, kind, journey_finished, .. }) = outcome {
            if robot.status() == RobotStatus::Delivering {
                if let (SegmentKind::Delivery, Some(delivery)) = (kind, robot.current_delivery()) {
                    debug!(robot = %robot.id, segment, remaining = delivery.stops.len(), "stop reached");
                    events.push(FleetEvent::StopReached {
                        robot:     robot.id,
                        delivery:  delivery.id,
                        remaining: delivery.stops.len(),
                    });
                }
                if journey_finished {
                    if let Some(done) = robot.conclude_delivery(DeliveryStatus::Completed) {
                        info!(robot = %robot.id, delivery = %done.id, "delivery completed");
                        if let Some(writer) = &self.persistence {
                            writer.update_delivery_status(done.id, DeliveryStatus::Completed);
                        }
                        observer.on_delivery_completed(robot, &done);
                        events.push(FleetEvent::DeliveryCompleted { robot: robot.id, delivery: done.id });
                    }
                }
            }
        }

        // ── ④ Speed ───────────────────────────────────────────────────────
        robot.speed_kmh = robot.activity.cruise_speed_kmh(&self.config);
        robot.last_update = now;
    }
}
