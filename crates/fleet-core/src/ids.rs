//! Strongly typed identifier wrappers.
//!
//! `RobotId` is a small integer assigned at fleet creation; it renders as
//! `robot-001`, `robot-002`, … so external clients see stable string keys
//! across restarts.  `DeliveryId` wraps a random v4 UUID.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::CoreError;

/// Stable robot identifier.  Assigned once at fleet creation, never reused.
///
/// Numbering starts at 1 to match the `robot-001` display form.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RobotId(pub u32);

impl RobotId {
    /// The id for the robot at zero-based fleet position `index`.
    #[inline]
    pub fn from_index(index: usize) -> Self {
        RobotId(index as u32 + 1)
    }

    /// Zero-based fleet position of this id.
    #[inline]
    pub fn index(self) -> usize {
        self.0.saturating_sub(1) as usize
    }
}

impl fmt::Display for RobotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "robot-{:03}", self.0)
    }
}

impl FromStr for RobotId {
    type Err = CoreError;

    /// Accepts `robot-001` or a bare number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("robot-").unwrap_or(s);
        digits
            .parse::<u32>()
            .map(RobotId)
            .map_err(|_| CoreError::Parse(format!("invalid robot id `{s}`")))
    }
}

/// Identifier of a delivery (including synthetic charging trips).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeliveryId(pub Uuid);

impl DeliveryId {
    /// A fresh random id.
    pub fn new() -> Self {
        DeliveryId(Uuid::new_v4())
    }
}

impl Default for DeliveryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DeliveryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
