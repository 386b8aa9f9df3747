//! The persistence gateway trait.

use async_trait::async_trait;
use fleet_core::{Delivery, DeliveryId, DeliveryStatus};
use fleet_motion::Robot;

use crate::{SimulationState, StoreResult};

/// Key holding the robot snapshot list.
pub const ROBOTS_KEY: &str = "robotrack:robots";
/// Key holding the capped global delivery history.
pub const DELIVERIES_KEY: &str = "robotrack:deliveries";
/// Key holding the [`SimulationState`].
pub const SIMULATION_STATE_KEY: &str = "robotrack:simulation";

/// The last `cap` entries of `deliveries`.
pub fn keep_last(deliveries: &[Delivery], cap: usize) -> &[Delivery] {
    &deliveries[deliveries.len().saturating_sub(cap)..]
}

/// Snapshot storage for robots, delivery history, and scheduler state.
///
/// Loads of a key that was never written return an empty list or `None`,
/// not an error.
#[async_trait]
pub trait FleetStore: Send + Sync {
    // ── Robots ──

    async fn load_robots(&self) -> StoreResult<Vec<Robot>>;
    async fn save_robots(&self, robots: &[Robot]) -> StoreResult<()>;

    // ── Delivery history ──

    async fn load_delivery_history(&self) -> StoreResult<Vec<Delivery>>;

    /// Replace the history with the last `cap` entries of `deliveries`.
    async fn save_delivery_history(&self, deliveries: &[Delivery], cap: usize) -> StoreResult<()>;

    /// Append `delivery` to the history, keeping the last `cap` entries.
    async fn record_delivery(&self, delivery: &Delivery, cap: usize) -> StoreResult<()> {
        let mut history = self.load_delivery_history().await?;
        history.push(delivery.clone());
        self.save_delivery_history(&history, cap).await
    }

    /// Set the status of the history entry `id`.  Returns `false` if no such
    /// entry is stored (e.g. it was trimmed).
    async fn update_delivery_status(&self, id: DeliveryId, status: DeliveryStatus) -> StoreResult<bool> {
        let mut history = self.load_delivery_history().await?;
        let Some(entry) = history.iter_mut().find(|d| d.id == id) else {
            return Ok(false);
        };
        entry.status = status;
        let len = history.len();
        self.save_delivery_history(&history, len).await?;
        Ok(true)
    }

    // ── Simulation state ──

    async fn load_simulation_state(&self) -> StoreResult<Option<SimulationState>>;
    async fn save_simulation_state(&self, state: &SimulationState) -> StoreResult<()>;

    /// Delete everything this store holds.
    async fn clear_all(&self) -> StoreResult<()>;
}
