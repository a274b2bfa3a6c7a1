use chrono::Utc;
use serde::{Deserialize, Serialize};

// =============================================================================
// Enums
// =============================================================================

/// The state a user's conversation is in.
///
/// Closed is not represented here: a closed conversation has no Session
/// entry in the store at all.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatState {
    /// Choosing between AI support and the FAQ.
    Menu,
    /// Free-form dialogue relayed to the answer gateway.
    Support,
    /// Numeric-code lookup against the FAQ table.
    Faq,
}

// =============================================================================
// Newtype Wrappers
// =============================================================================

/// Opaque stable identifier of a chat counterpart.
///
/// Owned by the transport; the orchestrator only uses it as a key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Unix timestamp in seconds since epoch.
///
/// Compared by value. Two Timestamps with the same inner value are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub i64);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now().timestamp())
    }

    /// Seconds elapsed since this timestamp. Negative if it lies in the future.
    pub fn elapsed_secs(&self) -> i64 {
        Timestamp::now().0 - self.0
    }
}

// =============================================================================
// Messages
// =============================================================================

/// An inbound message event as delivered by the transport.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Sender of the message.
    pub from: UserId,
    /// Raw message text.
    pub body: String,
}

impl InboundMessage {
    pub fn new(from: impl Into<UserId>, body: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            body: body.into(),
        }
    }
}
