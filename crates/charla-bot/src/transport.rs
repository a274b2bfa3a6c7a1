//! Outbound transport seam.
//!
//! The real chat provider lives outside this repository; the orchestrator
//! only needs "send text to user", invoked zero or more times per inbound
//! event, in the order the orchestrator issues the replies.

use std::sync::Mutex;

use async_trait::async_trait;
use charla_core::{Result, UserId};

/// Sends outbound text to a chat counterpart.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send_text(&self, to: &UserId, body: &str) -> Result<()>;
}

/// Records every outbound message instead of sending it.
///
/// Used in tests and dry runs to assert on reply content and order.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<(UserId, String)>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages sent so far, in send order.
    pub fn sent(&self) -> Vec<(UserId, String)> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send_text(&self, to: &UserId, body: &str) -> Result<()> {
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((to.clone(), body.to_string()));
        Ok(())
    }
}
