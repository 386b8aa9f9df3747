//! The delivery trip record.
//!
//! A `Delivery` is the business object: an ordered queue of stops and a
//! status.  Path geometry lives separately in `fleet-motion`'s `Journey`;
//! the delivery only shrinks its stop queue as segments are completed.

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};

use crate::{DeliveryId, Location, RobotId};

/// Lifecycle status of a delivery.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DeliveryStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl DeliveryStatus {
    /// `true` once no further transitions are possible.
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, DeliveryStatus::Completed | DeliveryStatus::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DeliveryStatus::Pending    => "pending",
            DeliveryStatus::InProgress => "in_progress",
            DeliveryStatus::Completed  => "completed",
            DeliveryStatus::Failed     => "failed",
        }
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A multi-stop delivery owned by one robot while active.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Delivery {
    pub id: DeliveryId,
    pub robot_id: RobotId,
    /// Remaining stops, front first.  Shrinks monotonically.
    pub stops: VecDeque<Location>,
    pub status: DeliveryStatus,
    pub created_at: DateTime<Utc>,
    pub estimated_completion: Option<DateTime<Utc>>,
}

impl Delivery {
    /// A new in-progress delivery created now.
    pub fn start(robot_id: RobotId, stops: impl IntoIterator<Item = Location>) -> Self {
        Self {
            id: DeliveryId::new(),
            robot_id,
            stops: stops.into_iter().collect(),
            status: DeliveryStatus::InProgress,
            created_at: Utc::now(),
            estimated_completion: None,
        }
    }

    /// Set the estimated completion to `created_at + secs`.
    pub fn with_eta_secs(mut self, secs: f64) -> Self {
        let millis = (secs.max(0.0) * 1000.0) as i64;
        self.estimated_completion = Some(self.created_at + Duration::milliseconds(millis));
        self
    }

    /// Remove the stop that was just reached.  Returns it, if any remained.
    #[inline]
    pub fn pop_stop(&mut self) -> Option<Location> {
        self.stops.pop_front()
    }

    /// `true` while the delivery is still being worked on.
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }
}
