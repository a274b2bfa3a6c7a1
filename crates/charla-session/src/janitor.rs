//! Background janitor for stale conversational state.
//!
//! Sweeps the session store and the dedup guard on a fixed period,
//! independent of message traffic. This is the only component allowed to
//! destroy a session without an inbound message triggering it.

use std::sync::Arc;

use tokio::sync::Notify;
use tracing::{debug, info};

use crate::dedup::DedupGuard;
use crate::store::SessionStore;

/// Periodic sweep evicting idle sessions and expired dedup fingerprints.
pub struct Janitor {
    store: Arc<SessionStore>,
    dedup: Arc<DedupGuard>,
    interval_secs: u64,
    shutdown: Arc<Notify>,
}

impl Janitor {
    /// Create a janitor sweeping every `interval_secs`.
    pub fn new(store: Arc<SessionStore>, dedup: Arc<DedupGuard>, interval_secs: u64) -> Self {
        Self {
            store,
            dedup,
            interval_secs,
            shutdown: Arc::new(Notify::new()),
        }
    }

    /// Run the sweep loop. Returns on shutdown signal.
    pub async fn run(&self) {
        info!(interval_secs = self.interval_secs, "janitor started");
        loop {
            tokio::select! {
                _ = tokio::time::sleep(std::time::Duration::from_secs(self.interval_secs)) => {
                    self.sweep();
                }
                _ = self.shutdown.notified() => {
                    info!("janitor stopped");
                    return;
                }
            }
        }
    }

    /// One sweep pass. Exposed so tests and callers can force a sweep.
    pub fn sweep(&self) {
        let evicted = self.store.evict_expired();
        let fingerprints = self.dedup.sweep_expired();
        if !evicted.is_empty() || fingerprints > 0 {
            debug!(
                sessions = evicted.len(),
                fingerprints, "janitor sweep evicted entries"
            );
        }
    }

    /// Signal the janitor to shut down gracefully.
    pub fn shutdown(&self) {
        self.shutdown.notify_one();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charla_core::{ChatState, UserId};

    #[tokio::test]
    async fn test_janitor_shutdown() {
        let store = Arc::new(SessionStore::new(600));
        let dedup = Arc::new(DedupGuard::new(30));
        let janitor = Janitor::new(Arc::clone(&store), Arc::clone(&dedup), 300);

        janitor.shutdown();
        tokio::time::timeout(std::time::Duration::from_secs(2), janitor.run())
            .await
            .expect("janitor should shut down within timeout");
    }

    #[tokio::test]
    async fn test_sweep_evicts_idle_session_within_one_interval() {
        // Zero timeout: any session older than 0 seconds is stale.
        let store = Arc::new(SessionStore::new(0));
        let dedup = Arc::new(DedupGuard::new(0));
        store.start(&UserId::new("idle"), ChatState::Support);
        dedup.should_process(&UserId::new("idle"), "hola");

        // Make the entries strictly older than now.
        tokio::time::sleep(std::time::Duration::from_millis(1100)).await;

        let janitor = Janitor::new(Arc::clone(&store), Arc::clone(&dedup), 300);
        janitor.sweep();

        assert!(store.is_empty());
        assert!(dedup.is_empty());
    }

    #[tokio::test]
    async fn test_sweep_keeps_fresh_entries() {
        let store = Arc::new(SessionStore::new(600));
        let dedup = Arc::new(DedupGuard::new(30));
        store.start(&UserId::new("fresh"), ChatState::Menu);
        dedup.should_process(&UserId::new("fresh"), "hola");

        let janitor = Janitor::new(Arc::clone(&store), Arc::clone(&dedup), 300);
        janitor.sweep();

        assert_eq!(store.len(), 1);
        assert_eq!(dedup.len(), 1);
    }

    #[tokio::test]
    async fn test_run_sweeps_periodically() {
        let store = Arc::new(SessionStore::new(0));
        let dedup = Arc::new(DedupGuard::new(30));
        store.start(&UserId::new("idle"), ChatState::Support);
        tokio::time::sleep(std::time::Duration::from_millis(1100)).await;

        let janitor = Arc::new(Janitor::new(Arc::clone(&store), Arc::clone(&dedup), 1));
        let runner = Arc::clone(&janitor);
        let handle = tokio::spawn(async move { runner.run().await });

        // Within ~one interval the idle session must be gone.
        tokio::time::sleep(std::time::Duration::from_millis(1500)).await;
        assert!(store.is_empty());

        janitor.shutdown();
        tokio::time::timeout(std::time::Duration::from_secs(2), handle)
            .await
            .expect("janitor task should finish")
            .unwrap();
    }
}
