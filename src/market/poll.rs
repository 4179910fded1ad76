//! Fixed-interval polling with latest-completed-wins semantics.
//!
//! A new poll never waits for, or cancels, an in-flight fetch; overlapping
//! fetches are expected and may complete out of order. Consumers tag each
//! fetch with a sequence number from [`SequenceGate`] and only apply a
//! result when [`SequenceGate::commit`] accepts it, so a stale fetch that
//! finishes after a newer one is discarded rather than displayed.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Monotonic sequence issuance and last-writer-wins commit.
#[derive(Debug, Default)]
pub struct SequenceGate {
    issued: AtomicU64,
    applied: AtomicU64,
}

impl SequenceGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag a new fetch. Sequence numbers start at 1 so 0 can mean
    /// "nothing applied yet".
    pub fn issue(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Try to apply the result of fetch `seq`. Returns false when a newer
    /// fetch has already been applied, in which case the caller must drop
    /// the stale result.
    pub fn commit(&self, seq: u64) -> bool {
        let mut current = self.applied.load(Ordering::Acquire);
        loop {
            if seq <= current {
                debug!(seq, current, "discarding stale fetch result");
                return false;
            }
            match self.applied.compare_exchange_weak(
                current,
                seq,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(observed) => current = observed,
            }
        }
    }

    /// Highest sequence applied so far (0 before the first commit).
    pub fn applied(&self) -> u64 {
        self.applied.load(Ordering::Acquire)
    }
}

/// Fixed-interval poller driving a fetch→compute pipeline.
pub struct Poller {
    gate: Arc<SequenceGate>,
    handle: JoinHandle<()>,
}

impl Poller {
    /// Spawn a poller that fires `task(seq)` every `period`. Each tick is
    /// spawned independently so a slow fetch never delays the next tick,
    /// and nothing is queued behind it.
    pub fn spawn<F, Fut>(period: Duration, task: F) -> Self
    where
        F: Fn(u64) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let gate = Arc::new(SequenceGate::new());
        let tick_gate = Arc::clone(&gate);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                let seq = tick_gate.issue();
                tokio::spawn(task(seq));
            }
        });

        Self { gate, handle }
    }

    pub fn gate(&self) -> Arc<SequenceGate> {
        Arc::clone(&self.gate)
    }

    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
