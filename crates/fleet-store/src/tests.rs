//! Unit tests for fleet-store.

use chrono::Utc;
use fleet_core::{Delivery, Location, RobotId};
use fleet_motion::Robot;

fn robot(n: u32) -> Robot {
    Robot::new(
        RobotId(n),
        format!("BOT-{n:03}"),
        "#22c55e",
        Location::new(30.27, -97.74, "Texas Capitol"),
        Utc::now(),
    )
}

fn delivery(robot: u32) -> Delivery {
    Delivery::start(RobotId(robot), [Location::new(30.28, -97.73, "UT Tower")])
}

// ── Shared backend behaviour ──────────────────────────────────────────────────

#[cfg(test)]
mod memory {
    use fleet_core::{DeliveryId, DeliveryStatus};

    use super::*;
    use crate::{FleetStore, MemoryStore, SimulationState, keep_last};

    #[tokio::test]
    async fn empty_store_loads_nothing() {
        let store = MemoryStore::new();
        assert!(store.load_robots().await.unwrap().is_empty());
        assert!(store.load_delivery_history().await.unwrap().is_empty());
        assert!(store.load_simulation_state().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn robots_replace_previous_snapshot() {
        let store = MemoryStore::new();
        store.save_robots(&[robot(1), robot(2)]).await.unwrap();
        store.save_robots(&[robot(3)]).await.unwrap();
        let loaded = store.load_robots().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, RobotId(3));
    }

    #[tokio::test]
    async fn history_keeps_last_cap() {
        let store = MemoryStore::new();
        let all: Vec<_> = (0..5).map(|_| delivery(1)).collect();
        for d in &all {
            store.record_delivery(d, 3).await.unwrap();
        }
        let loaded = store.load_delivery_history().await.unwrap();
        assert_eq!(loaded, all[2..]);
        assert_eq!(keep_last(&all, 10), &all[..]);
    }

    #[tokio::test]
    async fn status_update_by_id() {
        let store = MemoryStore::new();
        let a = delivery(1);
        let b = delivery(2);
        store.record_delivery(&a, 100).await.unwrap();
        store.record_delivery(&b, 100).await.unwrap();

        assert!(store.update_delivery_status(b.id, DeliveryStatus::Completed).await.unwrap());
        assert!(!store.update_delivery_status(DeliveryId::new(), DeliveryStatus::Failed).await.unwrap());

        let loaded = store.load_delivery_history().await.unwrap();
        assert_eq!(loaded[0].status, DeliveryStatus::InProgress);
        assert_eq!(loaded[1].status, DeliveryStatus::Completed);
    }

    #[tokio::test]
    async fn clear_all_empties_everything() {
        let store = MemoryStore::new();
        store.save_robots(&[robot(1)]).await.unwrap();
        store.record_delivery(&delivery(1), 100).await.unwrap();
        store.save_simulation_state(&SimulationState::now(true)).await.unwrap();
        store.clear_all().await.unwrap();
        assert!(store.load_robots().await.unwrap().is_empty());
        assert!(store.load_delivery_history().await.unwrap().is_empty());
        assert!(store.load_simulation_state().await.unwrap().is_none());
    }
}

// ── Unavailable ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod unavailable {
    use super::*;
    use crate::{FleetStore, StoreError, UnavailableStore};

    #[tokio::test]
    async fn every_call_fails() {
        let store = UnavailableStore;
        assert!(matches!(store.load_robots().await, Err(StoreError::Unavailable(_))));
        assert!(store.save_robots(&[robot(1)]).await.is_err());
        assert!(store.record_delivery(&delivery(1), 100).await.is_err());
        assert!(store.clear_all().await.is_err());
    }
}

// ── Writer ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod writer {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use fleet_core::DeliveryStatus;

    use super::*;
    use crate::{FleetStore, MemoryStore, PersistenceWriter, SimulationState, StoreResult, UnavailableStore};

    #[tokio::test]
    async fn writes_apply_in_order() {
        let store = Arc::new(MemoryStore::new());
        let (writer, _task) = PersistenceWriter::spawn(store.clone(), 100);

        let d = delivery(1);
        writer.record_delivery(d.clone());
        writer.update_delivery_status(d.id, DeliveryStatus::Completed);
        writer.save_robots(vec![robot(1), robot(2)]);
        writer.save_simulation_state(SimulationState::now(true));
        writer.flush().await;

        let history = store.load_delivery_history().await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, DeliveryStatus::Completed);
        assert_eq!(store.load_robots().await.unwrap().len(), 2);
        assert!(store.load_simulation_state().await.unwrap().unwrap().is_running);
    }

    #[tokio::test]
    async fn history_cap_applied() {
        let store = Arc::new(MemoryStore::new());
        let (writer, _task) = PersistenceWriter::spawn(store.clone(), 2);
        for _ in 0..4 {
            writer.record_delivery(delivery(1));
        }
        writer.flush().await;
        assert_eq!(store.load_delivery_history().await.unwrap().len(), 2);
    }

    /// Delegates to a `MemoryStore`, counting robot snapshot writes.
    #[derive(Default)]
    struct CountingStore {
        inner:       MemoryStore,
        robot_saves: AtomicUsize,
    }

    #[async_trait]
    impl FleetStore for CountingStore {
        async fn load_robots(&self) -> StoreResult<Vec<Robot>> {
            self.inner.load_robots().await
        }
        async fn save_robots(&self, robots: &[Robot]) -> StoreResult<()> {
            self.robot_saves.fetch_add(1, Ordering::SeqCst);
            self.inner.save_robots(robots).await
        }
        async fn load_delivery_history(&self) -> StoreResult<Vec<Delivery>> {
            self.inner.load_delivery_history().await
        }
        async fn save_delivery_history(&self, deliveries: &[Delivery], cap: usize) -> StoreResult<()> {
            self.inner.save_delivery_history(deliveries, cap).await
        }
        async fn load_simulation_state(&self) -> StoreResult<Option<SimulationState>> {
            self.inner.load_simulation_state().await
        }
        async fn save_simulation_state(&self, state: &SimulationState) -> StoreResult<()> {
            self.inner.save_simulation_state(state).await
        }
        async fn clear_all(&self) -> StoreResult<()> {
            self.inner.clear_all().await
        }
    }

    #[tokio::test]
    async fn robot_snapshots_coalesce_to_latest() {
        let store = Arc::new(CountingStore::default());
        let (writer, _task) = PersistenceWriter::spawn(store.clone(), 100);

        // The drain task cannot run until this test yields.
        for n in 1..=500 {
            writer.save_robots(vec![robot(n)]);
        }
        writer.flush().await;

        assert_eq!(store.robot_saves.load(Ordering::SeqCst), 1);
        let loaded = store.load_robots().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, RobotId(500));

        writer.save_robots(vec![robot(7), robot(8)]);
        writer.flush().await;
        assert_eq!(store.robot_saves.load(Ordering::SeqCst), 2);
        assert_eq!(store.load_robots().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn clear_drops_pending_snapshot_but_keeps_later_one() {
        let store = Arc::new(MemoryStore::new());
        let (writer, _task) = PersistenceWriter::spawn(store.clone(), 100);

        writer.save_robots(vec![robot(1)]);
        writer.clear_all();
        writer.save_robots(vec![robot(2), robot(3)]);
        writer.flush().await;

        let loaded = store.load_robots().await.unwrap();
        assert_eq!(loaded.iter().map(|r| r.id).collect::<Vec<_>>(), vec![RobotId(2), RobotId(3)]);
    }

    #[tokio::test]
    async fn failures_are_swallowed() {
        let (writer, task) = PersistenceWriter::spawn(Arc::new(UnavailableStore), 100);
        writer.save_robots(vec![robot(1)]);
        writer.clear_all();
        writer.flush().await;
        drop(writer);
        task.await.unwrap();
    }
}

// ── SQLite ────────────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite {
    use std::sync::Arc;

    use tempfile::TempDir;

    use super::*;
    use crate::{FleetStore, SimulationState, SqliteStore};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[tokio::test]
    async fn snapshots_survive_reopen() {
        let dir = tmp();
        let path = dir.path().join("fleet.db");
        let robots = vec![robot(1), robot(2)];
        let state = SimulationState::now(true);
        {
            let store = SqliteStore::open(&path).unwrap();
            store.save_robots(&robots).await.unwrap();
            store.record_delivery(&delivery(1), 100).await.unwrap();
            store.save_simulation_state(&state).await.unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.load_robots().await.unwrap(), robots);
        assert_eq!(store.load_delivery_history().await.unwrap().len(), 1);
        assert_eq!(store.load_simulation_state().await.unwrap(), Some(state));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn spawned_writers_share_connection() {
        let store = Arc::new(SqliteStore::open_in_memory().unwrap());
        let tasks: Vec<_> = (1..=8)
            .map(|n| {
                let store = store.clone();
                tokio::spawn(async move { store.save_robots(&[robot(n)]).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }
        let loaded = store.load_robots().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert!((1..=8).contains(&loaded[0].id.0));
    }

    #[tokio::test]
    async fn clear_all_removes_keys() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.save_robots(&[robot(1)]).await.unwrap();
        store.clear_all().await.unwrap();
        assert!(store.load_robots().await.unwrap().is_empty());
        assert!(store.load_simulation_state().await.unwrap().is_none());
    }
}
