//! Fire-and-forget persistence.
//!
//! [`PersistenceWriter`] is a cheap handle over an unbounded channel.  A
//! single background task drains the channel and applies each command to the
//! store in order, so a history append and a later status update for the
//! same delivery cannot race.  Store errors are logged and dropped.
//!
//! Robot snapshots are coalesced: the handle keeps only the latest one and
//! at most one `SaveRobots` marker is queued at a time, so a slow store never
//! makes the queue grow with every tick.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use fleet_core::{Delivery, DeliveryId, DeliveryStatus};
use fleet_motion::Robot;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{FleetStore, SimulationState};

/// One queued write.
#[derive(Debug)]
pub enum WriteCommand {
    /// Save whatever robot snapshot is pending when this is applied.
    SaveRobots,
    RecordDelivery(Delivery),
    UpdateDeliveryStatus { id: DeliveryId, status: DeliveryStatus },
    SaveSimulationState(SimulationState),
    ClearAll,
    /// Acknowledged once every earlier command has been applied.
    Flush(oneshot::Sender<()>),
}

/// Handle for queueing writes.  Clones share the same background task.
#[derive(Clone)]
pub struct PersistenceWriter {
    tx:       mpsc::UnboundedSender<WriteCommand>,
    snapshot: SnapshotSlot,
}

type SnapshotSlot = Arc<Mutex<Option<Vec<Robot>>>>;

fn lock_slot(slot: &Mutex<Option<Vec<Robot>>>) -> MutexGuard<'_, Option<Vec<Robot>>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

impl PersistenceWriter {
    /// Spawn the drain task on the current tokio runtime.
    ///
    /// The task exits once every handle has been dropped and the queue is
    /// empty.
    pub fn spawn(store: Arc<dyn FleetStore>, history_cap: usize) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let snapshot = SnapshotSlot::default();
        let handle = tokio::spawn(drain(rx, store, snapshot.clone(), history_cap));
        (Self { tx, snapshot }, handle)
    }

    /// Replace the pending robot snapshot.
    ///
    /// Queues a `SaveRobots` marker only if none is pending.
    pub fn save_robots(&self, robots: Vec<Robot>) {
        let mut slot = lock_slot(&self.snapshot);
        if slot.replace(robots).is_none() {
            self.send(WriteCommand::SaveRobots);
        }
    }

    pub fn record_delivery(&self, delivery: Delivery) {
        self.send(WriteCommand::RecordDelivery(delivery));
    }

    pub fn update_delivery_status(&self, id: DeliveryId, status: DeliveryStatus) {
        self.send(WriteCommand::UpdateDeliveryStatus { id, status });
    }

    pub fn save_simulation_state(&self, state: SimulationState) {
        self.send(WriteCommand::SaveSimulationState(state));
    }

    /// Queue a full wipe.  A pending robot snapshot is discarded with it.
    pub fn clear_all(&self) {
        let mut slot = lock_slot(&self.snapshot);
        if slot.take().is_some() {
            debug!("pending robot snapshot dropped by clear");
        }
        self.send(WriteCommand::ClearAll);
    }

    /// Wait until everything queued so far has been applied.
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        self.send(WriteCommand::Flush(ack));
        // A closed channel means the drain task is gone; nothing to wait for.
        let _ = done.await;
    }

    fn send(&self, command: WriteCommand) {
        if self.tx.send(command).is_err() {
            warn!("persistence writer stopped, dropping write");
        }
    }
}

async fn drain(
    mut rx:      mpsc::UnboundedReceiver<WriteCommand>,
    store:       Arc<dyn FleetStore>,
    snapshot:    SnapshotSlot,
    history_cap: usize,
) {
    debug!(history_cap, "persistence writer started");
    while let Some(command) = rx.recv().await {
        apply(store.as_ref(), &snapshot, command, history_cap).await;
    }
    info!("persistence writer stopped");
}

async fn apply(
    store:       &dyn FleetStore,
    snapshot:    &Mutex<Option<Vec<Robot>>>,
    command:     WriteCommand,
    history_cap: usize,
) {
    let result = match command {
        WriteCommand::SaveRobots => {
            let pending = lock_slot(snapshot).take();
            match pending {
                Some(robots) => store.save_robots(&robots).await,
                None => Ok(()),
            }
        }
        WriteCommand::RecordDelivery(delivery) => {
            let id = delivery.id;
            let result = store.record_delivery(&delivery, history_cap).await;
            if result.is_ok() {
                debug!(delivery = %id, "delivery added to history");
            }
            result
        }
        WriteCommand::UpdateDeliveryStatus { id, status } => {
            match store.update_delivery_status(id, status).await {
                Ok(true) => {
                    debug!(delivery = %id, %status, "delivery status updated");
                    Ok(())
                }
                Ok(false) => {
                    debug!(delivery = %id, "delivery no longer in history");
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }
        WriteCommand::SaveSimulationState(state) => store.save_simulation_state(&state).await,
        WriteCommand::ClearAll => store.clear_all().await,
        WriteCommand::Flush(ack) => {
            let _ = ack.send(());
            Ok(())
        }
    };

    if let Err(e) = result {
        warn!(error = %e, "persistence write failed (non-fatal)");
    }
}
