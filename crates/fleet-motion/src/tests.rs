//! Unit tests for fleet-motion.

use fleet_core::{Location, SimConfig, SimRng};
use fleet_route::Route;

use crate::{Journey, Segment, SegmentKind};

fn loc(lat: f64, lng: f64, name: &str) -> Location {
    Location::new(lat, lng, name)
}

/// Config with a one-tick service pause.
fn short_pause() -> SimConfig {
    SimConfig {
        service_pause_min_ms: 200,
        service_pause_max_ms: 200,
        ..SimConfig::default()
    }
}

/// A segment from `from` to `to` whose route claims `distance_m`.
fn segment(from: &Location, to: &Location, distance_m: f64, kind: SegmentKind) -> Segment {
    let route = Route {
        coordinates: vec![from.lng_lat(), to.lng_lat()],
        distance_m,
        duration_s: distance_m,
    };
    Segment::new(from.clone(), to.clone(), route, kind)
}

// ── Journey ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod journey {
    use super::*;
    use crate::MotionError;

    #[test]
    fn empty_journey_rejected() {
        assert!(matches!(Journey::new(vec![]), Err(MotionError::EmptyJourney)));
    }

    #[test]
    fn straight_line_ends_with_charging_leg() {
        let origin = loc(30.0, -97.0, "origin");
        let stops = [loc(30.01, -97.0, "a"), loc(30.02, -97.0, "b")];
        let station = loc(30.03, -97.0, "station");
        let j = Journey::straight_line(&origin, &stops, Some(&station)).unwrap();

        assert_eq!(j.len(), 3);
        let kinds: Vec<_> = j.segments().iter().map(|s| s.kind).collect();
        assert_eq!(kinds, [SegmentKind::Delivery, SegmentKind::Delivery, SegmentKind::Charging]);
        assert_eq!(j.segments()[0].from, origin);
        assert_eq!(j.segments()[1].from, stops[0]);
        assert_eq!(j.destination(), Some(&station));
        assert!((j.total_distance_m() - 0.03 * fleet_core::METERS_PER_DEGREE).abs() < 1e-6);
        assert!(j.check_stops(2).is_ok());
    }

    #[test]
    fn stop_count_must_match_delivery_legs() {
        let origin = loc(30.0, -97.0, "origin");
        let j = Journey::straight_line(&origin, &[loc(30.01, -97.0, "a")], None).unwrap();
        assert!(matches!(
            j.check_stops(2),
            Err(MotionError::StopMismatch { stops: 2, segments: 1 })
        ));
    }
}

// ── Engine ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod engine {
    use super::*;
    use crate::{PathCursor, StepOutcome, ticks_to_traverse, valid_points};

    #[test]
    fn ticks_from_distance_and_speed() {
        // 12 km/h = 3.333 m/s, 5 ticks/s.
        assert!((ticks_to_traverse(100.0, 12.0, 5.0) - 150.0).abs() < 1e-9);
        assert!((ticks_to_traverse(101.0, 12.0, 5.0) - 151.5).abs() < 1e-9);
        assert!(ticks_to_traverse(100.0, 0.0, 5.0).is_infinite());
    }

    #[test]
    fn corrupt_points_filtered() {
        let pts = [[-97.0, 30.0], [0.0, 0.0], [f64::NAN, 30.0], [0.05, -0.02], [0.05, 30.0]];
        assert_eq!(valid_points(&pts, 0.1), vec![[-97.0, 30.0], [0.05, 30.0]]);
    }

    #[test]
    fn segment_completes_on_ceil_ticks() {
        let cfg = short_pause();
        let mut rng = SimRng::new(1);
        let a = loc(30.0, -97.0, "a");
        let b = loc(30.001, -97.0, "b");
        let journey = Journey::new(vec![segment(&a, &b, 101.0, SegmentKind::Delivery)]).unwrap();

        let mut cursor = PathCursor::new();
        let mut ticks = 0;
        loop {
            ticks += 1;
            match cursor.step(&journey, 12.0, &cfg, &mut rng) {
                StepOutcome::Moved(_) => assert!(cursor.progress < 1.0),
                StepOutcome::SegmentCompleted { index, journey_finished, .. } => {
                    assert_eq!(index, 0);
                    assert!(journey_finished);
                    break;
                }
                other => panic!("unexpected {other:?}"),
            }
            assert!(ticks < 1_000);
        }
        assert_eq!(ticks, 152);
        assert!(cursor.is_finished(&journey));
        assert!(!cursor.is_servicing());
    }

    #[test]
    fn pause_between_segments() {
        let cfg = short_pause();
        let mut rng = SimRng::new(1);
        let a = loc(30.0, -97.0, "a");
        let b = loc(30.001, -97.0, "b");
        let c = loc(30.002, -97.0, "c");
        let journey = Journey::new(vec![
            segment(&a, &b, 10.0, SegmentKind::Delivery),
            segment(&b, &c, 10.0, SegmentKind::Charging),
        ])
        .unwrap();

        // 10 m at 12 km/h → 15 ticks.
        let mut cursor = PathCursor::new();
        for _ in 0..14 {
            assert!(matches!(cursor.step(&journey, 12.0, &cfg, &mut rng), StepOutcome::Moved(_)));
        }
        let done = cursor.step(&journey, 12.0, &cfg, &mut rng);
        assert!(matches!(done, StepOutcome::SegmentCompleted { index: 0, journey_finished: false, .. }));
        assert!(cursor.is_servicing());
        assert_eq!(cursor.segment_index, 1);

        assert_eq!(cursor.step(&journey, 12.0, &cfg, &mut rng), StepOutcome::PauseFinished);
        assert!(!cursor.is_servicing());
        assert!(matches!(cursor.step(&journey, 12.0, &cfg, &mut rng), StepOutcome::Moved(_)));
    }

    #[test]
    fn interpolates_between_bracketing_points() {
        let cfg = SimConfig::default();
        let mut rng = SimRng::new(1);
        let a = loc(30.0, -97.0, "a");
        let c = loc(30.0, -96.98, "c");
        let route = Route {
            coordinates: vec![[-97.0, 30.0], [-96.99, 30.0], [-96.98, 30.0]],
            distance_m: 40.0 / 3.0,
            duration_s: 0.0,
        };
        let journey = Journey::new(vec![Segment::new(a, c, route, SegmentKind::Delivery)]).unwrap();

        // 40/3 m at 12 km/h → 20 ticks; after 15 ticks progress is 0.75.
        let mut cursor = PathCursor::new();
        let mut last = None;
        for _ in 0..15 {
            last = Some(cursor.step(&journey, 12.0, &cfg, &mut rng));
        }
        let Some(StepOutcome::Moved([lng, lat])) = last else {
            panic!("expected movement, got {last:?}");
        };
        assert!((cursor.progress - 0.75).abs() < 1e-9);
        assert!((lng - -96.985).abs() < 1e-9, "lng {lng}");
        assert!((lat - 30.0).abs() < 1e-12);
    }

    #[test]
    fn corrupt_geometry_is_a_no_op() {
        let cfg = SimConfig::default();
        let mut rng = SimRng::new(1);
        let a = loc(30.0, -97.0, "a");
        let b = loc(30.001, -97.0, "b");
        let route = Route {
            coordinates: vec![[-97.0, 30.0], [0.0, 0.0]],
            distance_m: 100.0,
            duration_s: 0.0,
        };
        let journey = Journey::new(vec![Segment::new(a, b, route, SegmentKind::Delivery)]).unwrap();

        let mut cursor = PathCursor::new();
        for _ in 0..5 {
            assert_eq!(cursor.step(&journey, 12.0, &cfg, &mut rng), StepOutcome::Skipped);
        }
        assert_eq!(cursor, PathCursor::new());
    }
}

// ── Battery ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod battery {
    use fleet_core::RobotStatus;

    use super::*;
    use crate::{BatteryAction, BatteryModel};

    #[test]
    fn rates_by_status() {
        let m = BatteryModel::from_config(&SimConfig::default());
        assert!(m.update(50.0, RobotStatus::Delivering) < 50.0);
        assert!(m.update(50.0, RobotStatus::Idle) < 50.0);
        assert!(m.update(50.0, RobotStatus::Idle) > m.update(50.0, RobotStatus::Delivering));
        assert_eq!(m.update(50.0, RobotStatus::Charging), 60.0);
        assert_eq!(m.update(50.0, RobotStatus::Offline), 50.0);
    }

    #[test]
    fn clamped_to_range() {
        let m = BatteryModel::from_config(&SimConfig::default());
        assert_eq!(m.update(97.0, RobotStatus::Charging), 100.0);
        assert_eq!(m.update(0.0, RobotStatus::Delivering), 0.0);
    }

    #[test]
    fn thresholds() {
        let m = BatteryModel::from_config(&SimConfig::default());
        assert_eq!(m.check(14.9, RobotStatus::Delivering), BatteryAction::SeekCharge);
        assert_eq!(m.check(15.0, RobotStatus::Delivering), BatteryAction::None);
        assert_eq!(m.check(19.9, RobotStatus::Idle), BatteryAction::SeekCharge);
        assert_eq!(m.check(20.0, RobotStatus::Idle), BatteryAction::None);
        assert_eq!(m.check(94.9, RobotStatus::Charging), BatteryAction::None);
        assert_eq!(m.check(95.0, RobotStatus::Charging), BatteryAction::FinishCharging);
    }
}

// ── Robot ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod robot {
    use chrono::Utc;
    use fleet_core::{Delivery, DeliveryStatus, RobotId, RobotStatus};

    use super::*;
    use crate::{Activity, Robot, StepOutcome};

    fn idle_robot() -> Robot {
        Robot::new(RobotId(1), "BOT-001", "#22c55e", loc(30.0, -97.0, "home"), Utc::now())
    }

    #[test]
    fn new_robot_is_idle_and_full() {
        let r = idle_robot();
        assert_eq!(r.status(), RobotStatus::Idle);
        assert_eq!(r.battery, 100.0);
        assert!(r.current_delivery().is_none());
    }

    #[test]
    fn idle_robot_does_not_advance() {
        let mut r = idle_robot();
        assert!(r.advance(&SimConfig::default(), &mut SimRng::new(1)).is_none());
    }

    #[test]
    fn delivery_pops_stops_and_snaps() {
        let cfg = short_pause();
        let mut rng = SimRng::new(3);
        let mut r = idle_robot();
        let stop = loc(30.0001, -97.0, "stop");
        let station = loc(30.0002, -97.0, "station");
        let journey = Journey::straight_line(&r.location, std::slice::from_ref(&stop), Some(&station)).unwrap();
        let delivery = Delivery::start(r.id, [stop.clone()]);
        r.begin_delivery(delivery.clone(), journey);
        assert_eq!(r.status(), RobotStatus::Delivering);
        assert_eq!(r.delivery_history, vec![delivery]);

        let finished = loop {
            match r.advance(&cfg, &mut rng) {
                Some(StepOutcome::SegmentCompleted { index: 0, .. }) => {
                    assert_eq!(r.location, stop);
                    assert!(r.current_delivery().unwrap().stops.is_empty());
                }
                Some(StepOutcome::SegmentCompleted { journey_finished: true, .. }) => break true,
                Some(_) => {}
                None => break false,
            }
        };
        assert!(finished);
        assert_eq!(r.location, station);

        let done = r.conclude_delivery(DeliveryStatus::Completed).unwrap();
        assert_eq!(done.status, DeliveryStatus::Completed);
        assert_eq!(r.activity, Activity::Idle);
        assert_eq!(r.delivery_history[0].status, DeliveryStatus::Completed);
        assert!(r.delivery_history[0].stops.is_empty());
    }

    #[test]
    fn charging_trip_waits_at_station() {
        let cfg = SimConfig::default();
        let mut rng = SimRng::new(3);
        let mut r = idle_robot();
        let station = loc(30.00001, -97.0, "station");
        r.begin_charging(&station);
        assert_eq!(r.status(), RobotStatus::Charging);
        assert_eq!(r.current_delivery().unwrap().stops.len(), 1);

        while r.advance(&cfg, &mut rng).is_some() {}
        assert_eq!(r.location, station);
        assert!(r.current_delivery().unwrap().stops.is_empty());
        let trip = r.finish_charging().unwrap();
        assert_eq!(trip.status, DeliveryStatus::Completed);
        assert_eq!(r.status(), RobotStatus::Idle);
        assert_eq!(r.delivery_history, vec![trip]);
        assert!(r.finish_charging().is_none());
    }

    #[test]
    fn conclude_without_delivery_is_none() {
        let mut r = idle_robot();
        assert!(r.conclude_delivery(DeliveryStatus::Failed).is_none());
    }
}
