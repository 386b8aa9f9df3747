//! `FleetSim` — the shareable simulation handle.

use std::sync::Arc;

use fleet_core::{Delivery, Location, RobotId, Tick};
use fleet_motion::{Journey, Robot};
use fleet_route::{GeoCatalog, RouteProvider};
use fleet_store::{FleetStore, PersistenceWriter, SimulationState};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::assembly::assemble_journey;
use crate::scheduler::{Core, Scheduler, Shared};
use crate::{Fleet, FleetObserver, NoopObserver, SimResult, TickReport};

/// Owns a [`Fleet`], its scheduler, persistence, and route provider.
///
/// Every mutation of the fleet, whether from the scheduler or from a
/// caller, holds the same lock for its whole duration, so ticks and delivery
/// admissions never interleave.  Route requests for a new delivery are made
/// without the lock.
pub struct FleetSim {
    pub(crate) shared: Arc<Shared>,
    catalog:     GeoCatalog,
    store:       Arc<dyn FleetStore>,
    writer:      PersistenceWriter,
    writer_task: JoinHandle<()>,
    router:      Arc<dyn RouteProvider>,
    scheduler:   Mutex<Option<Scheduler>>,
}

impl FleetSim {
    /// Wrap `fleet`.  Must be called inside a tokio runtime.
    pub fn new(mut fleet: Fleet, store: Arc<dyn FleetStore>, router: Arc<dyn RouteProvider>) -> Self {
        let (writer, writer_task) = PersistenceWriter::spawn(store.clone(), fleet.config.history_cap);
        fleet.persistence = Some(writer.clone());
        let catalog = fleet.catalog.clone();
        Self {
            shared: Arc::new(Shared::new(Core { fleet, observer: Box::new(NoopObserver) })),
            catalog,
            store,
            writer,
            writer_task,
            router,
            scheduler: Mutex::new(None),
        }
    }

    /// Replace the tick observer.
    pub async fn set_observer(&self, observer: impl FleetObserver + Send + 'static) {
        self.shared.core.lock().await.observer = Box::new(observer);
    }

    // ── Scheduler lifecycle ───────────────────────────────────────────────

    /// Restore persisted robots, if any, and start ticking.
    ///
    /// A no-op if already running.
    pub async fn start(&self) {
        let mut scheduler = self.scheduler.lock().await;
        if scheduler.is_some() {
            debug!("simulation already running");
            return;
        }

        // Queued writes (e.g. from a reset) must land before the snapshot is read.
        self.writer.flush().await;
        match self.store.load_robots().await {
            Ok(robots) if !robots.is_empty() => {
                self.shared.core.lock().await.fleet.replace_robots(robots);
            }
            Ok(_) => debug!("no persisted robots, keeping seeded fleet"),
            Err(e) => warn!(error = %e, "could not load persisted robots, keeping seeded fleet"),
        }

        let period = self.shared.core.lock().await.fleet.config.tick_duration();
        *scheduler = Some(Scheduler::spawn(self.shared.clone(), period));
        self.writer.save_simulation_state(SimulationState::now(true));
        info!("simulation started");
    }

    /// Stop ticking.  Returns once the in-flight tick, if any, has finished.
    pub async fn stop(&self) {
        let mut scheduler = self.scheduler.lock().await;
        self.stop_scheduler(&mut scheduler).await;
    }

    async fn stop_scheduler(&self, slot: &mut Option<Scheduler>) {
        let Some(scheduler) = slot.take() else {
            return;
        };
        scheduler.stop().await;
        self.writer.save_simulation_state(SimulationState::now(false));
        info!("simulation stopped");
    }

    pub async fn is_running(&self) -> bool {
        self.scheduler.lock().await.is_some()
    }

    /// Stop the scheduler, clear persisted state, and reseed the fleet.
    ///
    /// The scheduler slot stays locked until the reseed is queued, so a
    /// concurrent `start` runs after the reset and sees the fresh fleet.
    pub async fn reset(&self) -> SimResult<()> {
        let mut scheduler = self.scheduler.lock().await;
        self.stop_scheduler(&mut scheduler).await;
        let mut core = self.shared.core.lock().await;
        core.fleet.reset()?;
        self.writer.clear_all();
        self.writer.save_robots(core.fleet.robots.clone());
        info!(robots = core.fleet.robots.len(), "simulation reset");
        Ok(())
    }

    pub async fn current_tick(&self) -> Tick {
        self.shared.core.lock().await.fleet.current_tick()
    }

    /// Process one tick now.  Returns `None` if a tick was already running.
    pub async fn tick_once(&self) -> Option<TickReport> {
        self.shared.tick().await
    }

    /// Wait until every queued persistence write has been applied.
    pub async fn flush(&self) {
        self.writer.flush().await;
    }

    /// Stop the scheduler and drain the persistence queue.
    pub async fn shutdown(self) {
        self.stop().await;
        let Self { shared, writer, writer_task, .. } = self;
        // The fleet holds a writer clone; both must go before the drain ends.
        drop(shared);
        drop(writer);
        if let Err(e) = writer_task.await {
            warn!(error = %e, "persistence writer task failed");
        }
    }

    // ── Registry ──────────────────────────────────────────────────────────

    pub async fn list_robots(&self) -> Vec<Robot> {
        self.shared.core.lock().await.fleet.list_robots().to_vec()
    }

    pub async fn get_robot(&self, id: RobotId) -> Option<Robot> {
        self.shared.core.lock().await.fleet.get_robot(id).cloned()
    }

    pub fn sample_locations(&self) -> &[Location] {
        self.catalog.sample_locations()
    }

    pub fn charging_stations(&self) -> &[Location] {
        self.catalog.charging_stations()
    }

    pub fn find_nearest_charging_station(&self, location: &Location) -> Option<&Location> {
        self.catalog.nearest_charging_station(location)
    }

    // ── Deliveries ────────────────────────────────────────────────────────

    /// Direct assignment without routing.  See [`Fleet::create_delivery`].
    pub async fn create_delivery(&self, robot: RobotId, stops: Vec<Location>) -> Option<Delivery> {
        self.shared.core.lock().await.fleet.create_delivery(robot, stops)
    }

    /// See [`Fleet::create_delivery_with_journey`].
    pub async fn create_delivery_with_journey(
        &self,
        robot:   RobotId,
        stops:   Vec<Location>,
        journey: Journey,
    ) -> Option<Delivery> {
        self.shared.core.lock().await.fleet.create_delivery_with_journey(robot, stops, journey)
    }

    /// Route every leg with the configured provider, then assign.
    ///
    /// Preconditions are checked before routing and again on assignment, so
    /// a robot claimed by a concurrent request in between is not assigned
    /// twice.  Falls back to [`create_delivery`](Self::create_delivery) if
    /// the journey cannot be assembled.
    pub async fn create_delivery_routed(&self, robot: RobotId, stops: Vec<Location>) -> Option<Delivery> {
        let origin = {
            let core = self.shared.core.lock().await;
            if let Err(reason) = core.fleet.check_dispatch(robot, stops.len()) {
                debug!(%robot, %reason, "delivery rejected");
                return None;
            }
            core.fleet.get_robot(robot)?.location.clone()
        };

        match assemble_journey(self.router.as_ref(), &self.catalog, &origin, &stops).await {
            Ok(journey) => self.create_delivery_with_journey(robot, stops, journey).await,
            Err(e) => {
                warn!(%robot, error = %e, "journey assembly failed, assigning directly");
                self.create_delivery(robot, stops).await
            }
        }
    }
}
