//! In-memory backend.  Default when no database is configured.

use async_trait::async_trait;
use fleet_core::Delivery;
use fleet_motion::Robot;
use tokio::sync::Mutex;

use crate::{FleetStore, SimulationState, StoreResult, keep_last};

#[derive(Default)]
struct Snapshot {
    robots: Vec<Robot>,
    deliveries: Vec<Delivery>,
    simulation: Option<SimulationState>,
}

/// Keeps the latest snapshots in process memory.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Snapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FleetStore for MemoryStore {
    async fn load_robots(&self) -> StoreResult<Vec<Robot>> {
        Ok(self.inner.lock().await.robots.clone())
    }

    async fn save_robots(&self, robots: &[Robot]) -> StoreResult<()> {
        self.inner.lock().await.robots = robots.to_vec();
        Ok(())
    }

    async fn load_delivery_history(&self) -> StoreResult<Vec<Delivery>> {
        Ok(self.inner.lock().await.deliveries.clone())
    }

    async fn save_delivery_history(&self, deliveries: &[Delivery], cap: usize) -> StoreResult<()> {
        self.inner.lock().await.deliveries = keep_last(deliveries, cap).to_vec();
        Ok(())
    }

    async fn load_simulation_state(&self) -> StoreResult<Option<SimulationState>> {
        Ok(self.inner.lock().await.simulation.clone())
    }

    async fn save_simulation_state(&self, state: &SimulationState) -> StoreResult<()> {
        self.inner.lock().await.simulation = Some(state.clone());
        Ok(())
    }

    async fn clear_all(&self) -> StoreResult<()> {
        *self.inner.lock().await = Snapshot::default();
        Ok(())
    }
}
