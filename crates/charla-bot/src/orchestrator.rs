//! The per-message turn pipeline.
//!
//! Every inbound event runs: dedup guard, in-flight guard, session
//! resolution (with expiry-on-read), the pure dialog decision, the bounded
//! gateway call for SUPPORT turns, and finally the session-store update.
//! All failures are absorbed at this boundary; a turn never panics the
//! message loop or leaks a raw error to the user.

use std::sync::Arc;

use tracing::{debug, warn};

use charla_core::{CharlaConfig, ChatState, InboundMessage, Result, UserId};
use charla_dialog::{CommandClassifier, DialogEngine, FaqTable, ReplyCatalog};
use charla_gateway::{complete_bounded, AnswerGateway, PromptTemplate};
use charla_session::{DedupGuard, SessionPatch, SessionStore};

use crate::transport::Transport;

/// Orchestrates one conversation turn per inbound message.
pub struct BotOrchestrator {
    store: Arc<SessionStore>,
    dedup: Arc<DedupGuard>,
    engine: DialogEngine,
    gateway: Arc<dyn AnswerGateway>,
    prompt: PromptTemplate,
    gateway_timeout_secs: u64,
}

impl BotOrchestrator {
    /// Wire the orchestrator from configuration and a gateway backend.
    pub fn new(config: &CharlaConfig, gateway: Arc<dyn AnswerGateway>) -> Self {
        let classifier = CommandClassifier::new(&config.vocab);
        let faq = FaqTable::new(&config.faq);
        let replies = ReplyCatalog::new(
            &config.general.brand_name,
            &config.general.support_contact,
            &faq,
        );
        let engine = DialogEngine::new(
            classifier,
            FaqTable::new(&config.faq),
            replies,
            config.gateway.min_question_chars,
        );

        Self {
            store: Arc::new(SessionStore::new(config.session.timeout_secs)),
            dedup: Arc::new(DedupGuard::new(config.dedup.window_secs)),
            engine,
            gateway,
            prompt: PromptTemplate::load(&config.gateway.prompt_path),
            gateway_timeout_secs: config.gateway.timeout_secs,
        }
    }

    /// The session store, shared with the janitor.
    pub fn store(&self) -> Arc<SessionStore> {
        Arc::clone(&self.store)
    }

    /// The dedup guard, shared with the janitor.
    pub fn dedup(&self) -> Arc<DedupGuard> {
        Arc::clone(&self.dedup)
    }

    /// Process one inbound message into zero or more replies, in send order.
    ///
    /// An empty vector means the message was dropped (duplicate, in-flight
    /// conflict, or addressed to nobody) and nothing must be sent.
    pub async fn handle_message(&self, msg: &InboundMessage) -> Vec<String> {
        // Duplicate delivery has no second effect.
        if !self.dedup.should_process(&msg.from, &msg.body) {
            return Vec::new();
        }

        // One outstanding gateway call per user; extra input while waiting
        // is discarded, not queued.
        if self
            .store
            .get(&msg.from)
            .is_some_and(|s| s.awaiting_answer)
        {
            debug!(user = %msg.from, "message dropped, answer in flight");
            return Vec::new();
        }

        // Expired sessions read as closed.
        let state = if self.store.is_active(&msg.from) {
            self.store.get(&msg.from).map(|s| s.state)
        } else {
            None
        };

        let outcome = self.engine.turn(state, &msg.body);
        let mut replies = outcome.replies;

        if let Some(query) = &outcome.forward_query {
            // The engine only forwards from SUPPORT, so a session exists;
            // losing here means another turn won the race meanwhile.
            if !self.store.try_begin_answer(&msg.from) {
                debug!(user = %msg.from, "message dropped, lost in-flight race");
                return Vec::new();
            }
            replies.extend(self.support_exchange(&msg.from, query).await);
        }

        // Apply the outcome to the store.
        if outcome.terminate {
            self.store.close(&msg.from);
        } else if let Some(next) = outcome.next_state {
            if self.store.get(&msg.from).is_some() {
                self.store.touch(&msg.from, SessionPatch::state(next));
            } else {
                self.store.start(&msg.from, next);
            }
        } else if state.is_some() {
            // State-preserving reply: refresh liveness only.
            self.store.touch(&msg.from, SessionPatch::default());
        }

        replies
    }

    /// Handle a message and send each reply over the transport, preserving
    /// the issue order.
    pub async fn dispatch(&self, transport: &dyn Transport, msg: &InboundMessage) -> Result<()> {
        for reply in self.handle_message(msg).await {
            transport.send_text(&msg.from, &reply).await?;
        }
        Ok(())
    }

    /// One SUPPORT exchange against the answer gateway.
    ///
    /// The in-flight flag is already set; it is cleared here on every exit
    /// path, success or not, before any reply is composed.
    async fn support_exchange(&self, user: &UserId, query: &str) -> Vec<String> {
        let prompt = self.prompt.render(query);
        let result =
            complete_bounded(self.gateway.as_ref(), &prompt, self.gateway_timeout_secs).await;

        // Clear the flag first; a stuck flag would silence the user forever.
        self.store.touch(user, SessionPatch::awaiting(false));

        let texts = self.engine.replies();
        match result {
            Ok(answer) => {
                let answer = answer.trim();
                if answer.is_empty() {
                    vec![texts.empty_answer.clone()]
                } else {
                    vec![answer.to_string(), texts.support_followup.clone()]
                }
            }
            Err(e) => {
                warn!(user = %user, error = %e, "answer gateway unavailable");
                vec![texts.apology.clone()]
            }
        }
    }

    /// Current state of a user's session, if any. Exposed for tests and
    /// observability.
    pub fn session_state(&self, user: &UserId) -> Option<ChatState> {
        self.store.get(user).map(|s| s.state)
    }
}
