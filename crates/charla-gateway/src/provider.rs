//! The `AnswerGateway` trait and the bounded-await helper.

use async_trait::async_trait;
use tracing::warn;

use crate::error::{GatewayError, Result};

/// A generative-answer backend.
///
/// One operation: prompt in, answer text out. Every backend problem maps
/// to a [`GatewayError`]; the caller does not distinguish causes.
#[async_trait]
pub trait AnswerGateway: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Await a completion for at most `timeout_secs`.
///
/// On expiry the in-flight future is dropped and its eventual result is
/// discarded; there is no second reply. This is a timeout-race, not a
/// cancellation signal to the backend.
pub async fn complete_bounded(
    gateway: &dyn AnswerGateway,
    prompt: &str,
    timeout_secs: u64,
) -> Result<String> {
    let duration = std::time::Duration::from_secs(timeout_secs);
    match tokio::time::timeout(duration, gateway.complete(prompt)).await {
        Ok(result) => result,
        Err(_) => {
            warn!(timeout_secs, "answer gateway call timed out");
            Err(GatewayError::Timeout(timeout_secs))
        }
    }
}

/// A gateway returning one fixed answer.
///
/// Used for offline runs and tests; mirrors the real trait surface so the
/// orchestrator wiring is identical.
pub struct CannedGateway {
    answer: String,
}

impl CannedGateway {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
        }
    }
}

#[async_trait]
impl AnswerGateway for CannedGateway {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        Ok(self.answer.clone())
    }
}
