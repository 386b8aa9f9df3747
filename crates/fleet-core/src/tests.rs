//! Unit tests for fleet-core primitives.

#[cfg(test)]
mod ids {
    use crate::RobotId;

    #[test]
    fn display_is_zero_padded() {
        assert_eq!(RobotId(1).to_string(), "robot-001");
        assert_eq!(RobotId(42).to_string(), "robot-042");
    }

    #[test]
    fn index_roundtrip() {
        let id = RobotId::from_index(7);
        assert_eq!(id, RobotId(8));
        assert_eq!(id.index(), 7);
    }

    #[test]
    fn parse_both_forms() {
        assert_eq!("robot-003".parse::<RobotId>().unwrap(), RobotId(3));
        assert_eq!("12".parse::<RobotId>().unwrap(), RobotId(12));
        assert!("robot-x".parse::<RobotId>().is_err());
    }
}

#[cfg(test)]
mod geo {
    use crate::{Location, METERS_PER_DEGREE};

    #[test]
    fn zero_distance() {
        let p = Location::new(30.27, -97.74, "Capitol");
        assert_eq!(p.planar_distance(&p), 0.0);
    }

    #[test]
    fn straight_line_uses_fixed_scale() {
        let a = Location::new(30.0, -97.0, "a");
        let b = Location::new(30.0, -96.99, "b");
        let d = a.straight_line_m(&b);
        assert!((d - 0.01 * METERS_PER_DEGREE).abs() < 1e-6, "got {d}");
    }

    #[test]
    fn lng_lat_order() {
        let mut p = Location::new(30.1, -97.2, "x");
        assert_eq!(p.lng_lat(), [-97.2, 30.1]);
        p.set_lng_lat([-97.0, 30.0]);
        assert_eq!((p.lat, p.lng), (30.0, -97.0));
        assert_eq!(p.address, "x");
    }
}

#[cfg(test)]
mod delivery {
    use crate::{Delivery, DeliveryStatus, Location, RobotId};

    #[test]
    fn start_is_in_progress_and_pops_in_order() {
        let a = Location::new(30.0, -97.0, "a");
        let b = Location::new(30.1, -97.1, "b");
        let mut d = Delivery::start(RobotId(1), vec![a.clone(), b.clone()]);
        assert_eq!(d.status, DeliveryStatus::InProgress);
        assert!(d.is_active());
        assert_eq!(d.pop_stop(), Some(a));
        assert_eq!(d.pop_stop(), Some(b));
        assert_eq!(d.pop_stop(), None);
    }

    #[test]
    fn eta_offsets_created_at() {
        let d = Delivery::start(RobotId(1), vec![]).with_eta_secs(90.0);
        let eta = d.estimated_completion.unwrap();
        assert_eq!((eta - d.created_at).num_seconds(), 90);
    }

    #[test]
    fn terminal_statuses() {
        assert!(DeliveryStatus::Completed.is_terminal());
        assert!(DeliveryStatus::Failed.is_terminal());
        assert!(!DeliveryStatus::InProgress.is_terminal());
        assert_eq!(DeliveryStatus::InProgress.to_string(), "in_progress");
    }
}

#[cfg(test)]
mod time {
    use crate::{SimConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        assert_eq!(Tick(10) + 5, Tick(15));
        assert_eq!(Tick(3).next(), Tick(4));
        assert_eq!(Tick(9).to_string(), "T9");
    }

    #[test]
    fn default_cadence_is_five_per_second() {
        let cfg = SimConfig::default();
        assert_eq!(cfg.ticks_per_second(), 5.0);
        assert_eq!(cfg.tick_duration().as_millis(), 200);
        cfg.validate().unwrap();
    }

    #[test]
    fn validate_rejects_bad_values() {
        let zero = SimConfig { tick_interval_ms: 0, ..SimConfig::default() };
        assert!(zero.validate().is_err());

        let inverted = SimConfig {
            service_pause_min_ms: 10,
            service_pause_max_ms: 5,
            ..SimConfig::default()
        };
        assert!(inverted.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SimRng::new(7);
        let mut b = SimRng::new(7);
        for _ in 0..10 {
            assert_eq!(a.gen_range(0u64..1000), b.gen_range(0u64..1000));
        }
    }

    #[test]
    fn sample_indices_distinct() {
        let mut rng = SimRng::new(1);
        let mut picked = rng.sample_indices(20, 8);
        assert_eq!(picked.len(), 8);
        picked.sort_unstable();
        picked.dedup();
        assert_eq!(picked.len(), 8);
        assert!(picked.iter().all(|&i| i < 20));
    }

    #[test]
    fn sample_indices_caps_at_len() {
        let mut rng = SimRng::new(1);
        assert_eq!(rng.sample_indices(3, 10).len(), 3);
    }
}
