//! Background persistence writer.
//!
//! # Responsibility
//! - Apply snapshots to the adapter one at a time, in order.
//! - Decouple mutation latency from storage latency.
//!
//! # Invariants
//! - Adapter writes never run concurrently with each other.
//! - Dropping the sender lets the writer drain queued snapshots and exit.
//! - Write failures are logged and dropped; memory stays authoritative.

use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use super::{CATEGORIES_KEY, NOTES_KEY};
use crate::kv::KeyValueStore;

/// Both collections, serialized at mutation time.
pub(crate) struct SaveSnapshot {
    pub categories: String,
    pub notes: String,
}

pub(crate) struct Persister {
    tx: UnboundedSender<SaveSnapshot>,
    writer: JoinHandle<()>,
}

impl Persister {
    /// Spawns the writer task; requires a running Tokio runtime.
    pub fn spawn(adapter: Arc<dyn KeyValueStore>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let writer = tokio::spawn(run_writer(adapter, rx));
        Self { tx, writer }
    }

    /// Queues a snapshot without waiting for it to land.
    pub fn schedule(&self, snapshot: SaveSnapshot) {
        if self.tx.send(snapshot).is_err() {
            warn!("event=store_save module=store status=dropped reason=writer_gone");
        }
    }

    /// Stops accepting snapshots and waits for queued writes to drain.
    pub async fn close(self) {
        let Self { tx, writer } = self;
        drop(tx);
        if writer.await.is_err() {
            warn!("event=store_close module=store status=error reason=writer_panicked");
        }
    }
}

async fn run_writer(adapter: Arc<dyn KeyValueStore>, mut rx: UnboundedReceiver<SaveSnapshot>) {
    while let Some(mut snapshot) = rx.recv().await {
        // Queued snapshots are full-state; only the newest needs to land.
        while let Ok(newer) = rx.try_recv() {
            snapshot = newer;
        }
        write_snapshot(adapter.as_ref(), &snapshot).await;
    }
}

async fn write_snapshot(adapter: &dyn KeyValueStore, snapshot: &SaveSnapshot) {
    let mut failed = false;

    if let Err(err) = adapter.set(CATEGORIES_KEY, &snapshot.categories).await {
        failed = true;
        warn!("event=store_save module=store key={CATEGORIES_KEY} status=error err={err}");
    }
    if let Err(err) = adapter.set(NOTES_KEY, &snapshot.notes).await {
        failed = true;
        warn!("event=store_save module=store key={NOTES_KEY} status=error err={err}");
    }

    if !failed {
        debug!("event=store_save module=store status=ok");
    }
}
