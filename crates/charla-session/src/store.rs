//! Keyed table of per-user conversational state.
//!
//! A Session exists if and only if the user is in an active conversation;
//! absence is the closed state. All operations treat an absent key as a
//! normal, representable outcome, never an error.

use std::collections::HashMap;
use std::sync::Mutex;

use charla_core::{ChatState, Timestamp, UserId};
use tracing::debug;

/// One user's conversational state record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user_id: UserId,
    pub state: ChatState,
    /// True only while an answer-gateway call is outstanding for this user.
    pub awaiting_answer: bool,
    /// Refreshed on every accepted inbound message and state-preserving reply.
    pub last_activity: Timestamp,
}

/// A partial update applied by [`SessionStore::touch`].
///
/// Unset fields leave the session unchanged; `last_activity` is always
/// refreshed.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionPatch {
    pub state: Option<ChatState>,
    pub awaiting_answer: Option<bool>,
}

impl SessionPatch {
    pub fn state(state: ChatState) -> Self {
        Self {
            state: Some(state),
            ..Self::default()
        }
    }

    pub fn awaiting(awaiting: bool) -> Self {
        Self {
            awaiting_answer: Some(awaiting),
            ..Self::default()
        }
    }
}

/// In-memory session table with timestamp-based liveness.
///
/// Keyed per user; write conflicts only occur on the same user's concurrent
/// messages, which the orchestrator serializes above this layer.
pub struct SessionStore {
    sessions: Mutex<HashMap<UserId, Session>>,
    timeout_secs: u64,
}

impl SessionStore {
    /// Create a store whose sessions go stale after `timeout_secs` of inactivity.
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            timeout_secs,
        }
    }

    /// Create or overwrite the session for `user_id` in the given state.
    pub fn start(&self, user_id: &UserId, initial_state: ChatState) {
        let session = Session {
            user_id: user_id.clone(),
            state: initial_state,
            awaiting_answer: false,
            last_activity: Timestamp::now(),
        };
        self.lock().insert(user_id.clone(), session);
        debug!(user = %user_id, state = ?initial_state, "session started");
    }

    /// Return a copy of the session for `user_id`, if one exists.
    pub fn get(&self, user_id: &UserId) -> Option<Session> {
        self.lock().get(user_id).cloned()
    }

    /// Merge `patch` into the session and refresh `last_activity`.
    ///
    /// No-op if the user has no session.
    pub fn touch(&self, user_id: &UserId, patch: SessionPatch) {
        let mut sessions = self.lock();
        if let Some(session) = sessions.get_mut(user_id) {
            if let Some(state) = patch.state {
                session.state = state;
            }
            if let Some(awaiting) = patch.awaiting_answer {
                session.awaiting_answer = awaiting;
            }
            session.last_activity = Timestamp::now();
        }
    }

    /// Whether the user has a live session.
    ///
    /// A session idle for longer than the timeout is evicted here and
    /// reported inactive, so liveness holds even if the janitor never runs.
    pub fn is_active(&self, user_id: &UserId) -> bool {
        let mut sessions = self.lock();
        let expired = match sessions.get(user_id) {
            Some(session) => session.last_activity.elapsed_secs() > self.timeout_secs as i64,
            None => return false,
        };
        if expired {
            sessions.remove(user_id);
            debug!(user = %user_id, "session expired on read");
            return false;
        }
        true
    }

    /// Atomically mark the user's session as awaiting a gateway answer.
    ///
    /// Returns false, changing nothing, if the session is absent or a call
    /// is already in flight; the caller must drop the message. Check and
    /// set happen under one lock so two concurrent turns for the same user
    /// cannot both win.
    pub fn try_begin_answer(&self, user_id: &UserId) -> bool {
        let mut sessions = self.lock();
        match sessions.get_mut(user_id) {
            Some(session) if !session.awaiting_answer => {
                session.awaiting_answer = true;
                session.last_activity = Timestamp::now();
                true
            }
            _ => false,
        }
    }

    /// Remove the session unconditionally. Removing an absent session is a no-op.
    pub fn close(&self, user_id: &UserId) {
        if self.lock().remove(user_id).is_some() {
            debug!(user = %user_id, "session closed");
        }
    }

    /// Remove every session idle past the timeout and return the evicted ids.
    pub fn evict_expired(&self) -> Vec<UserId> {
        let timeout = self.timeout_secs as i64;
        let mut sessions = self.lock();
        let expired: Vec<UserId> = sessions
            .iter()
            .filter(|(_, s)| s.last_activity.elapsed_secs() > timeout)
            .map(|(id, _)| id.clone())
            .collect();
        for id in &expired {
            sessions.remove(id);
        }
        expired
    }

    /// Number of live (not yet evicted) sessions.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<UserId, Session>> {
        // A poisoned lock means a panic mid-update; recover the map rather
        // than poisoning every subsequent turn.
        self.sessions.lock().unwrap_or_else(|e| e.into_inner())
    }
}
