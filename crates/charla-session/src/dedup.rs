//! Duplicate-delivery suppression.
//!
//! Chat transports may redeliver the same event, e.g. on reconnect. The
//! guard keeps a short-lived fingerprint per (user, raw text) pair so a
//! redelivered message has no second effect, while a genuine repeat after
//! the window is accepted.

use std::collections::HashMap;
use std::sync::Mutex;

use charla_core::{Timestamp, UserId};
use tracing::debug;

/// Short-lived fingerprint cache keyed by (user, raw message text).
pub struct DedupGuard {
    seen: Mutex<HashMap<(UserId, String), Timestamp>>,
    window_secs: u64,
}

impl DedupGuard {
    /// Create a guard whose fingerprints expire after `window_secs`.
    pub fn new(window_secs: u64) -> Self {
        Self {
            seen: Mutex::new(HashMap::new()),
            window_secs,
        }
    }

    /// Whether the message should be processed.
    ///
    /// Records the fingerprint and returns true on first sight; returns
    /// false for an unexpired repeat. A rejected duplicate does NOT refresh
    /// `seen_at`, so the window is measured from first sight.
    pub fn should_process(&self, user_id: &UserId, raw_text: &str) -> bool {
        let key = (user_id.clone(), raw_text.to_string());
        let mut seen = self.lock();

        let duplicate = seen
            .get(&key)
            .is_some_and(|seen_at| seen_at.elapsed_secs() <= self.window_secs as i64);
        if duplicate {
            debug!(user = %user_id, "duplicate message suppressed");
            return false;
        }

        // First sight, or an expired entry being re-recorded.
        seen.insert(key, Timestamp::now());
        true
    }

    /// Remove every fingerprint past the window. Called by the janitor so
    /// the map does not grow with one-off messages that are never repeated.
    pub fn sweep_expired(&self) -> usize {
        let window = self.window_secs as i64;
        let mut seen = self.lock();
        let before = seen.len();
        seen.retain(|_, seen_at| seen_at.elapsed_secs() <= window);
        before - seen.len()
    }

    /// Number of fingerprints currently recorded.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<(UserId, String), Timestamp>> {
        self.seen.lock().unwrap_or_else(|e| e.into_inner())
    }
}
