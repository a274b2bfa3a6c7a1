//! The Charla conversation orchestrator.
//!
//! Ties the dedup guard, the session store, the dialog engine, and the
//! answer gateway into the per-message turn pipeline, and defines the
//! outbound transport seam.

pub mod orchestrator;
pub mod transport;

pub use orchestrator::BotOrchestrator;
pub use transport::{RecordingTransport, Transport};
