//! Counter aggregation.
//!
//! The counters live inside a single consumer task. Every other part of the
//! server talks to it through a cloneable [`Stats`] handle, so increments,
//! resets and snapshots are applied one at a time in arrival order.

use std::collections::BTreeMap;

use tokio::sync::{mpsc, oneshot};

/// Queue depth between producers and the aggregator.
pub const QUEUE_CAPACITY: usize = 10;

/// Counter label to count, ordered by label.
pub type Counters = BTreeMap<String, u64>;

pub const TRANSPORT_HTTP: &str = "_transport_http";
pub const TRANSPORT_HTTPS: &str = "_transport_https";
pub const INVALID_URL: &str = "invalid_url";

enum Command {
    Increment(String),
    Reset(oneshot::Sender<()>),
    Snapshot(oneshot::Sender<Counters>),
}

/// Handle to the counter aggregator.
#[derive(Debug, Clone)]
pub struct Stats {
    tx: mpsc::Sender<Command>,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Increment(label) => write!(f, "Increment({:?})", label),
            Command::Reset(_) => write!(f, "Reset"),
            Command::Snapshot(_) => write!(f, "Snapshot"),
        }
    }
}

impl Stats {
    /// Starts the aggregator on the current runtime.
    ///
    /// The task exits once every handle has been dropped.
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
        tokio::spawn(run(rx));
        Self { tx }
    }

    /// Adds one to `label`.
    ///
    /// Waits for queue space when the aggregator is behind.
    pub async fn increment(&self, label: impl Into<String>) {
        if self.tx.send(Command::Increment(label.into())).await.is_err() {
            tracing::warn!("stats aggregator stopped, dropping increment");
        }
    }

    /// Clears every counter.
    ///
    /// Returns once the aggregator applied the reset: increments issued
    /// afterwards start from zero.
    pub async fn reset(&self) {
        let (ack, done) = oneshot::channel();
        if self.tx.send(Command::Reset(ack)).await.is_err() {
            tracing::warn!("stats aggregator stopped, reset ignored");
            return;
        }
        let _ = done.await;
    }

    /// Copy of every counter at a single point in the command order.
    pub async fn snapshot(&self) -> Counters {
        let (reply, rx) = oneshot::channel();
        if self.tx.send(Command::Snapshot(reply)).await.is_err() {
            tracing::warn!("stats aggregator stopped, empty snapshot");
            return Counters::new();
        }
        rx.await.unwrap_or_default()
    }
}

async fn run(mut rx: mpsc::Receiver<Command>) {
    let mut counters = Counters::new();

    while let Some(command) = rx.recv().await {
        match command {
            Command::Increment(label) => {
                *counters.entry(label).or_insert(0) += 1;
            }
            Command::Reset(ack) => {
                counters.clear();
                let _ = ack.send(());
            }
            Command::Snapshot(reply) => {
                let _ = reply.send(counters.clone());
            }
        }
    }

    tracing::debug!("stats aggregator exiting");
}
