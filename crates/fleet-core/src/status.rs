//! Robot status enum shared across the fleet crates.
//!
//! `Maintenance` and `Offline` are part of the external contract but no
//! transition in the simulator reaches them.

/// Externally visible robot status.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RobotStatus {
    /// Parked, available for dispatch.
    #[default]
    Idle,
    /// Following a delivery journey.
    Delivering,
    /// Travelling to, or parked at, a charging station.
    Charging,
    /// Reserved.
    Maintenance,
    /// Reserved.
    Offline,
}

impl RobotStatus {
    /// Lower-case label, matching the external API values.
    pub fn as_str(self) -> &'static str {
        match self {
            RobotStatus::Idle        => "idle",
            RobotStatus::Delivering  => "delivering",
            RobotStatus::Charging    => "charging",
            RobotStatus::Maintenance => "maintenance",
            RobotStatus::Offline     => "offline",
        }
    }
}

impl std::fmt::Display for RobotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
