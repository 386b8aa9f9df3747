//! SQLite backend (feature `sqlite`).
//!
//! One `kv` table maps the `robotrack:*` keys to JSON documents, so the file
//! holds the same three snapshots a key/value cache would.  Statements run
//! on tokio's blocking pool.

use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use fleet_core::Delivery;
use fleet_motion::Robot;
use rusqlite::{Connection, OptionalExtension};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{
    DELIVERIES_KEY, FleetStore, ROBOTS_KEY, SIMULATION_STATE_KEY, SimulationState, StoreError,
    StoreResult, keep_last,
};

/// Persists snapshots to an SQLite database file.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and initialise the schema.
    pub fn open(path: &Path) -> StoreResult<Self> {
        Self::init(Connection::open(path)?)
    }

    /// A private in-memory database.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS kv (
                 key   TEXT PRIMARY KEY,
                 value TEXT NOT NULL
             );",
        )?;
        Ok(Self { conn: Arc::new(Mutex::new(conn)) })
    }

    /// Run `f` against the connection on the blocking pool.
    async fn blocking<T, F>(&self, f: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> StoreResult<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().unwrap_or_else(PoisonError::into_inner);
            f(&conn)
        })
        .await
        .map_err(|e| StoreError::Unavailable(format!("sqlite task failed: {e}")))?
    }

    async fn get<T: DeserializeOwned>(&self, key: &'static str) -> StoreResult<Option<T>> {
        let raw = self
            .blocking(move |conn| {
                let raw: Option<String> = conn
                    .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
                    .optional()?;
                Ok(raw)
            })
            .await?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn set<T: Serialize + ?Sized>(&self, key: &'static str, value: &T) -> StoreResult<()> {
        let json = serde_json::to_string(value)?;
        self.blocking(move |conn| {
            conn.execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2) \
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                rusqlite::params![key, json],
            )?;
            Ok(())
        })
        .await
    }
}

#[async_trait]
impl FleetStore for SqliteStore {
    async fn load_robots(&self) -> StoreResult<Vec<Robot>> {
        Ok(self.get(ROBOTS_KEY).await?.unwrap_or_default())
    }

    async fn save_robots(&self, robots: &[Robot]) -> StoreResult<()> {
        self.set(ROBOTS_KEY, robots).await
    }

    async fn load_delivery_history(&self) -> StoreResult<Vec<Delivery>> {
        Ok(self.get(DELIVERIES_KEY).await?.unwrap_or_default())
    }

    async fn save_delivery_history(&self, deliveries: &[Delivery], cap: usize) -> StoreResult<()> {
        self.set(DELIVERIES_KEY, keep_last(deliveries, cap)).await
    }

    async fn load_simulation_state(&self) -> StoreResult<Option<SimulationState>> {
        self.get(SIMULATION_STATE_KEY).await
    }

    async fn save_simulation_state(&self, state: &SimulationState) -> StoreResult<()> {
        self.set(SIMULATION_STATE_KEY, state).await
    }

    async fn clear_all(&self) -> StoreResult<()> {
        self.blocking(|conn| {
            conn.execute(
                "DELETE FROM kv WHERE key IN (?1, ?2, ?3)",
                rusqlite::params![ROBOTS_KEY, DELIVERIES_KEY, SIMULATION_STATE_KEY],
            )?;
            Ok(())
        })
        .await
    }
}
