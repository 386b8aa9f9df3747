use async_trait::async_trait;
use fleet_core::Delivery;
use fleet_motion::Robot;

use crate::{FleetStore, SimulationState, StoreError, StoreResult};

/// A store that is never reachable.  Every call fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableStore;

fn down<T>() -> StoreResult<T> {
    Err(StoreError::Unavailable("no backend configured".into()))
}

#[async_trait]
impl FleetStore for UnavailableStore {
    async fn load_robots(&self) -> StoreResult<Vec<Robot>> {
        down()
    }

    async fn save_robots(&self, _robots: &[Robot]) -> StoreResult<()> {
        down()
    }

    async fn load_delivery_history(&self) -> StoreResult<Vec<Delivery>> {
        down()
    }

    async fn save_delivery_history(&self, _deliveries: &[Delivery], _cap: usize) -> StoreResult<()> {
        down()
    }

    async fn load_simulation_state(&self) -> StoreResult<Option<SimulationState>> {
        down()
    }

    async fn save_simulation_state(&self, _state: &SimulationState) -> StoreResult<()> {
        down()
    }

    async fn clear_all(&self) -> StoreResult<()> {
        down()
    }
}
