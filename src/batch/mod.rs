//! Paced batch dispatch with partial-failure accounting.
//!
//! The dispatch loop initiates sends without awaiting them, spacing
//! initiations by a clamped delay; a shared tracker accumulates per-item
//! outcomes; a timer-driven reporter surfaces progress while the batch is in
//! flight. All collaborators (the send operation, the payload factory, the
//! progress sink) are injected by the caller.

pub mod dispatcher;
pub mod progress;
pub mod template;
pub mod tracker;

pub use dispatcher::{BatchConfig, MIN_BATCH_DELAY, Sender, run_batch};
pub use progress::{NullReporter, Reporter};
pub use template::MessageTemplate;
pub use tracker::{CompletionTracker, SendRecord, SendState, SendSummary};
