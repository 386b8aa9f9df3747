use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Scheduler flag saved on start and stop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub is_running: bool,
    pub last_update: DateTime<Utc>,
}

impl SimulationState {
    pub fn now(is_running: bool) -> Self {
        Self { is_running, last_update: Utc::now() }
    }
}
