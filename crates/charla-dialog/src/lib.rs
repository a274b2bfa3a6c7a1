//! Conversation dispatch for Charla.
//!
//! Classifies global commands, resolves FAQ lookups, and decides every
//! turn's outcome as a pure function over (current state, inbound text).
//! All side effects (store updates, gateway calls, transport sends) happen
//! above this crate.

pub mod classifier;
pub mod engine;
pub mod faq;
pub mod replies;
pub mod types;

pub use classifier::{CommandClassifier, GlobalCommand};
pub use engine::DialogEngine;
pub use faq::FaqTable;
pub use replies::ReplyCatalog;
pub use types::TurnOutcome;
