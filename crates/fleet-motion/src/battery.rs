//! Battery drain/charge and threshold checks.

use fleet_core::{RobotStatus, SimConfig};

/// Transition requested by the battery thresholds.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum BatteryAction {
    None,
    /// Head to the nearest charging station.
    SeekCharge,
    /// Charged enough to go back to idle.
    FinishCharging,
}

/// Per-tick battery rates and thresholds, taken from [`SimConfig`].
#[derive(Clone, Debug, PartialEq)]
pub struct BatteryModel {
    pub delivering_drain: f64,
    pub idle_drain: f64,
    pub charge_rate: f64,
    pub delivering_critical: f64,
    pub idle_low: f64,
    pub charged: f64,
}

impl BatteryModel {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            delivering_drain:    config.delivering_drain_per_tick,
            idle_drain:          config.idle_drain_per_tick,
            charge_rate:         config.charge_per_tick,
            delivering_critical: config.delivering_critical,
            idle_low:            config.idle_low,
            charged:             config.charged,
        }
    }

    /// Battery level after one tick in `status`, clamped to `[0, 100]`.
    pub fn update(&self, battery: f64, status: RobotStatus) -> f64 {
        let next = match status {
            RobotStatus::Delivering => battery - self.delivering_drain,
            RobotStatus::Idle => battery - self.idle_drain,
            RobotStatus::Charging => battery + self.charge_rate,
            RobotStatus::Maintenance | RobotStatus::Offline => battery,
        };
        next.clamp(0.0, 100.0)
    }

    pub fn check(&self, battery: f64, status: RobotStatus) -> BatteryAction {
        match status {
            RobotStatus::Delivering if battery < self.delivering_critical => BatteryAction::SeekCharge,
            RobotStatus::Idle if battery < self.idle_low => BatteryAction::SeekCharge,
            RobotStatus::Charging if battery >= self.charged => BatteryAction::FinishCharging,
            _ => BatteryAction::None,
        }
    }
}
