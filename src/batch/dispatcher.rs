//! Rate-limited dispatch loop.
//!
//! Sends `total` items against an injected [`Sender`], pacing *initiations*
//! (not completions) by a fixed delay, then waits — bounded — for the
//! stragglers. Individual failures are recorded and never stop the loop.

use crate::batch::progress::{Reporter, ReporterHandle};
use crate::batch::tracker::{CompletionTracker, SendRecord, SendState, SendSummary};
use crate::errors::BatchError;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Floor applied to the inter-send delay whenever more than one item is
/// sent, bounding throughput to roughly 25 sends per second.
pub const MIN_BATCH_DELAY: Duration = Duration::from_millis(40);

/// How often the completion wait re-checks the tracker.
const COMPLETION_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Floor on the completion wait bound, in milliseconds.
const MIN_COMPLETION_WAIT_MS: u64 = 5_000;

/// The externally supplied send operation the loop paces and tracks.
///
/// Implementations wrap whatever actually delivers the payload (an HTTP
/// publish, a test stub); an error's display text becomes the recorded
/// failure reason.
#[async_trait]
pub trait Sender: Send + Sync {
    async fn send(&self, payload: &str) -> Result<()>;
}

/// Validated batch parameters.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    total: usize,
    delay: Duration,
}

impl BatchConfig {
    pub fn new(total: usize, delay_ms: u64) -> Result<Self, BatchError> {
        if total == 0 {
            return Err(BatchError::ZeroCount);
        }
        Ok(Self {
            total,
            delay: Duration::from_millis(delay_ms),
        })
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// The delay actually applied between initiations: zero for a single
    /// item, otherwise the requested delay clamped to [`MIN_BATCH_DELAY`].
    pub fn effective_delay(&self) -> Duration {
        if self.total > 1 {
            self.delay.max(MIN_BATCH_DELAY)
        } else {
            Duration::ZERO
        }
    }

    /// Upper bound on the wait for outstanding sends once initiation ends.
    ///
    /// `max(5000, total * delay * 2)` milliseconds, with the effective delay.
    /// The formula is a heuristic carried over for behavioral compatibility,
    /// not a derived constant.
    pub fn completion_bound(&self) -> Duration {
        let paced = (self.total as u64)
            .saturating_mul(self.effective_delay().as_millis() as u64)
            .saturating_mul(2);
        Duration::from_millis(paced.max(MIN_COMPLETION_WAIT_MS))
    }
}

/// Run one batch: render each item via `item_factory`, pace initiations,
/// track completions, and return the summary.
///
/// For `total == 1` the send is awaited directly — no pacing, tracker, or
/// progress machinery — and a failure is returned as an error rather than a
/// partial summary. For larger batches the returned summary is always `Ok`;
/// per-item failures live in its `errors`/`results`, and if the bounded
/// completion wait expires first the summary is partial.
pub async fn run_batch<F>(
    config: &BatchConfig,
    item_factory: F,
    sender: Arc<dyn Sender>,
    reporter: Arc<dyn Reporter>,
) -> Result<SendSummary>
where
    F: Fn(usize) -> String,
{
    if config.total == 1 {
        let payload = item_factory(1);
        sender.send(&payload).await?;
        return Ok(SendSummary {
            total: 1,
            sent: 1,
            errors: 0,
            results: vec![SendRecord {
                index: 1,
                payload,
                state: SendState::Sent,
            }],
        });
    }

    let delay = config.effective_delay();
    let tracker = CompletionTracker::new(config.total);
    let progress = ReporterHandle::spawn(reporter, tracker.clone());

    for index in 1..=config.total {
        let payload = item_factory(index);
        let sender = Arc::clone(&sender);
        let tracker = tracker.clone();
        tokio::spawn(async move {
            match sender.send(&payload).await {
                Ok(()) => tracker.record_sent(index, payload).await,
                Err(err) => {
                    tracing::debug!(index, error = %err, "send failed");
                    tracker.record_failure(index, payload, err.to_string()).await;
                }
            }
        });
        if index != config.total {
            tokio::time::sleep(delay).await;
        }
    }

    let bound = config.completion_bound();
    let wait_started = Instant::now();
    while !tracker.is_complete().await && wait_started.elapsed() < bound {
        tokio::time::sleep(COMPLETION_POLL_INTERVAL).await;
    }
    drop(progress);

    let summary = tracker.snapshot().await;
    if !summary.is_complete() {
        tracing::warn!(
            completed = summary.completed(),
            total = summary.total,
            "gave up waiting for outstanding sends; reporting partial results"
        );
    }
    Ok(summary)
}
