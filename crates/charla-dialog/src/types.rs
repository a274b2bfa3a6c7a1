//! Turn outcome types.

use charla_core::ChatState;

/// The decision for one inbound message.
///
/// The engine never mutates state itself; the orchestrator applies the
/// outcome to the session store and sends the replies in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnOutcome {
    /// State to create or move the session to. `None` leaves it as-is.
    pub next_state: Option<ChatState>,
    /// Outbound texts, in send order.
    pub replies: Vec<String>,
    /// Destroy the session after sending the replies.
    pub terminate: bool,
    /// SUPPORT only: raw text to forward to the answer gateway.
    pub forward_query: Option<String>,
}

impl TurnOutcome {
    /// No reply, no state change. Used for ignored messages.
    pub fn silent() -> Self {
        Self::default()
    }

    /// Enter (or stay in) a state and send the given replies.
    pub fn enter(state: ChatState, replies: Vec<String>) -> Self {
        Self {
            next_state: Some(state),
            replies,
            ..Self::default()
        }
    }

    /// Send replies without changing state; the session is still touched.
    pub fn stay(replies: Vec<String>) -> Self {
        Self {
            replies,
            ..Self::default()
        }
    }

    /// Reply and destroy the session.
    pub fn close(reply: String) -> Self {
        Self {
            replies: vec![reply],
            terminate: true,
            ..Self::default()
        }
    }

    /// Stay in SUPPORT and forward the query to the gateway.
    pub fn forward(query: String) -> Self {
        Self {
            next_state: Some(ChatState::Support),
            forward_query: Some(query),
            ..Self::default()
        }
    }
}
