//! austin — run the delivery fleet around central Austin.
//!
//! Starts the eight-robot default fleet, hands idle robots a random
//! multi-stop delivery every few seconds, and logs fleet status until the
//! run time is up.
//!
//! Environment:
//!
//! | Variable          | Meaning                                              |
//! |-------------------|------------------------------------------------------|
//! | `FLEET_CONFIG`    | JSON file overriding any `SimConfig` field           |
//! | `FLEET_DB_PATH`   | SQLite database file (`--features sqlite`)           |
//! | `FLEET_OSRM_URL`  | OSRM base URL for routed legs (`--features osrm`)    |
//! | `FLEET_RUN_SECS`  | wall-clock run time, default 60                      |
//! | `RUST_LOG`        | tracing filter, default `info`                       |

use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use fleet_core::{Delivery, Location, RobotStatus, SimConfig, SimRng};
use fleet_motion::Robot;
use fleet_route::{RouteProvider, StraightLineProvider};
use fleet_sim::{FleetBuilder, FleetObserver, FleetSim, TickReport};
use fleet_store::{FleetStore, MemoryStore};

// ── Constants ─────────────────────────────────────────────────────────────────

const DEFAULT_RUN_SECS:   u64      = 60;
const DISPATCH_EVERY:     Duration = Duration::from_secs(5);
const STATUS_EVERY_TICKS: u64      = 25; // 5 s at the default tick
const DISPATCH_SEED:      u64      = 7;

// ── Progress observer ─────────────────────────────────────────────────────────

#[derive(Default)]
struct ProgressLog {
    completed: usize,
    failed:    usize,
}

impl FleetObserver for ProgressLog {
    fn on_tick_end(&mut self, report: &TickReport) {
        if report.tick.0 % STATUS_EVERY_TICKS == 0 {
            info!(
                tick       = %report.tick,
                idle       = report.idle,
                delivering = report.delivering,
                charging   = report.charging,
                completed  = self.completed,
                failed     = self.failed,
                "fleet status"
            );
        }
    }

    fn on_delivery_completed(&mut self, _robot: &Robot, _delivery: &Delivery) {
        self.completed += 1;
    }

    fn on_delivery_failed(&mut self, _robot: &Robot, _delivery: &Delivery) {
        self.failed += 1;
    }
}

// ── Backends ──────────────────────────────────────────────────────────────────

#[cfg(feature = "sqlite")]
fn open_store() -> Result<Arc<dyn FleetStore>> {
    match env::var("FLEET_DB_PATH") {
        Ok(path) => {
            let store = fleet_store::SqliteStore::open(std::path::Path::new(&path))
                .with_context(|| format!("opening database {path}"))?;
            info!(%path, "persisting to sqlite");
            Ok(Arc::new(store))
        }
        Err(_) => Ok(Arc::new(MemoryStore::new())),
    }
}

#[cfg(not(feature = "sqlite"))]
fn open_store() -> Result<Arc<dyn FleetStore>> {
    if env::var("FLEET_DB_PATH").is_ok() {
        warn!("FLEET_DB_PATH ignored: built without the `sqlite` feature");
    }
    Ok(Arc::new(MemoryStore::new()))
}

#[cfg(feature = "osrm")]
fn route_provider() -> Result<Arc<dyn RouteProvider>> {
    match env::var("FLEET_OSRM_URL") {
        Ok(url) => {
            let osrm = fleet_route::OsrmProvider::new(url.as_str())
                .with_context(|| format!("building OSRM client for {url}"))?;
            info!(%url, "routing through OSRM");
            Ok(Arc::new(fleet_route::FallbackProvider::new(osrm)))
        }
        Err(_) => Ok(Arc::new(StraightLineProvider)),
    }
}

#[cfg(not(feature = "osrm"))]
fn route_provider() -> Result<Arc<dyn RouteProvider>> {
    if env::var("FLEET_OSRM_URL").is_ok() {
        warn!("FLEET_OSRM_URL ignored: built without the `osrm` feature");
    }
    Ok(Arc::new(StraightLineProvider))
}

fn load_config() -> Result<SimConfig> {
    let Ok(path) = env::var("FLEET_CONFIG") else {
        return Ok(SimConfig::default());
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let config = serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    info!(%path, "configuration loaded");
    Ok(config)
}

fn run_time() -> Result<Duration> {
    let secs = match env::var("FLEET_RUN_SECS") {
        Ok(v) => v.parse().with_context(|| format!("FLEET_RUN_SECS={v}"))?,
        Err(_) => DEFAULT_RUN_SECS,
    };
    Ok(Duration::from_secs(secs))
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

/// Give every idle, charged robot a random delivery of one to three stops.
async fn dispatch_idle(sim: &FleetSim, config: &SimConfig, rng: &mut SimRng) -> usize {
    let candidates: Vec<_> = sim
        .list_robots()
        .await
        .into_iter()
        .filter(|r| r.status() == RobotStatus::Idle && r.battery >= config.min_dispatch_battery)
        .map(|r| r.id)
        .collect();

    let locations = sim.sample_locations();
    let mut assigned = 0;
    for robot in candidates {
        let count = rng.gen_range(1..=config.max_stops.min(3));
        let stops: Vec<Location> = rng
            .sample_indices(locations.len(), count)
            .into_iter()
            .map(|i| locations[i].clone())
            .collect();
        if let Some(delivery) = sim.create_delivery_routed(robot, stops).await {
            info!(%robot, delivery = %delivery.id, stops = delivery.stops.len(), "dispatched");
            assigned += 1;
        }
    }
    assigned
}

// ── Main ──────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config()?;
    let run_for = run_time()?;

    let fleet = FleetBuilder::new(config.clone()).build()?;
    let sim = FleetSim::new(fleet, open_store()?, route_provider()?);
    sim.set_observer(ProgressLog::default()).await;
    sim.start().await;
    info!(run_secs = run_for.as_secs(), "fleet running");

    let deadline = tokio::time::Instant::now() + run_for;
    let mut rng = SimRng::new(DISPATCH_SEED);
    let mut dispatch = tokio::time::interval(DISPATCH_EVERY);
    while tokio::time::Instant::now() < deadline {
        tokio::select! {
            _ = dispatch.tick() => {
                let assigned = dispatch_idle(&sim, &config, &mut rng).await;
                if assigned == 0 {
                    debug!("no robot available for dispatch");
                }
            }
            _ = tokio::time::sleep_until(deadline) => break,
        }
    }

    sim.stop().await;

    let robots = sim.list_robots().await;
    let summary: Vec<_> = robots
        .iter()
        .map(|r| {
            serde_json::json!({
                "id":         r.id.to_string(),
                "name":       r.name,
                "status":     r.status().as_str(),
                "battery":    (r.battery * 100.0).round() / 100.0,
                "deliveries": r.delivery_history.len(),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&summary)?);

    sim.shutdown().await;
    Ok(())
}
