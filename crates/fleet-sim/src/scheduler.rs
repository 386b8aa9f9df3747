//! The fixed-cadence tick task.
//!
//! One tokio task per running simulation.  It ticks on an interval and exits
//! when the shutdown flag is set or the sender is dropped.  A tick that is
//! still running when the next interval fires is never overlapped: the
//! interval skips missed ticks and [`Shared::tick`] refuses to reenter.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use crate::{Fleet, FleetObserver, TickReport};

/// The fleet and its observer, locked together for a tick.
pub(crate) struct Core {
    pub fleet: Fleet,
    pub observer: Box<dyn FleetObserver + Send>,
}

/// State shared by the scheduler task and every caller.
pub(crate) struct Shared {
    pub core: Mutex<Core>,
    ticking: AtomicBool,
}

impl Shared {
    pub fn new(core: Core) -> Self {
        Self { core: Mutex::new(core), ticking: AtomicBool::new(false) }
    }

    /// Process one tick unless another is already in flight.
    ///
    /// The in-flight flag is released on drop, so a caller that abandons the
    /// future while it waits for the lock does not block later ticks.
    pub async fn tick(&self) -> Option<TickReport> {
        if self.ticking.swap(true, Ordering::AcqRel) {
            debug!("previous tick still running, skipping");
            return None;
        }
        let _in_flight = InFlight(&self.ticking);
        let mut core = self.core.lock().await;
        let Core { fleet, observer } = &mut *core;
        Some(fleet.process_tick(observer.as_mut()))
    }
}

/// Clears the in-flight flag when the tick finishes or is cancelled.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Handle to a running scheduler task.
pub(crate) struct Scheduler {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl Scheduler {
    pub fn spawn(shared: Arc<Shared>, period: Duration) -> Self {
        let (shutdown, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(run(shared, period, shutdown_rx));
        Self { shutdown, task }
    }

    /// Signal the task and wait for it to finish its current tick.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }
}

async fn run(shared: Arc<Shared>, period: Duration, mut shutdown_rx: watch::Receiver<bool>) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately.
    ticker.tick().await;
    info!(period_ms = period.as_millis() as u64, "scheduler started");

    loop {
        if *shutdown_rx.borrow() {
            break;
        }
        tokio::select! {
            _ = ticker.tick() => {
                if let Some(report) = shared.tick().await {
                    if !report.events.is_empty() {
                        debug!(tick = %report.tick, events = report.events.len(), "tick processed");
                    }
                }
            }
            changed = shutdown_rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
        }
    }
    info!("scheduler stopped");
}
