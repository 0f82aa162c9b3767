//! Completion tracking for batch sends.
//!
//! The tracker owns the single `SendSummary` every in-flight send writes
//! into. Counters only increase, and `results` preserves the order in which
//! completions arrive — not the order sends were initiated, since sends race.

use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Terminal state of one send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SendState {
    /// The send operation resolved successfully.
    Sent,
    /// The send operation rejected; `reason` carries its message.
    Failed { reason: String },
}

/// One item's outcome, recorded when its send reaches a terminal state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendRecord {
    /// 1-based position in the batch.
    pub index: usize,
    /// The payload as rendered at initiation time.
    pub payload: String,
    #[serde(flatten)]
    pub state: SendState,
}

/// Aggregate outcome of one batch invocation.
///
/// Built incrementally as sends complete and read once at loop end. When the
/// bounded completion wait expires before every send lands, `sent + errors`
/// is less than `total`; items still outstanding at that point have no
/// record (there is no explicit pending state).
#[derive(Debug, Clone, Default, Serialize)]
pub struct SendSummary {
    pub total: usize,
    pub sent: usize,
    pub errors: usize,
    pub results: Vec<SendRecord>,
}

impl SendSummary {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    /// Number of sends that reached a terminal state.
    pub fn completed(&self) -> usize {
        self.sent + self.errors
    }

    pub fn is_complete(&self) -> bool {
        self.completed() >= self.total
    }
}

/// Shared handle all completion continuations write through.
#[derive(Clone)]
pub struct CompletionTracker {
    inner: Arc<Mutex<SendSummary>>,
}

impl CompletionTracker {
    pub fn new(total: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SendSummary::new(total))),
        }
    }

    pub async fn record_sent(&self, index: usize, payload: String) {
        let mut summary = self.inner.lock().await;
        summary.sent += 1;
        summary.results.push(SendRecord {
            index,
            payload,
            state: SendState::Sent,
        });
    }

    pub async fn record_failure(&self, index: usize, payload: String, reason: String) {
        let mut summary = self.inner.lock().await;
        summary.errors += 1;
        summary.results.push(SendRecord {
            index,
            payload,
            state: SendState::Failed { reason },
        });
    }

    /// Current `(sent, errors, total)` counters.
    pub async fn progress(&self) -> (usize, usize, usize) {
        let summary = self.inner.lock().await;
        (summary.sent, summary.errors, summary.total)
    }

    pub async fn is_complete(&self) -> bool {
        self.inner.lock().await.is_complete()
    }

    /// Read-only copy for the final report.
    pub async fn snapshot(&self) -> SendSummary {
        self.inner.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn counters_increase_with_each_terminal_state() {
        let tracker = CompletionTracker::new(3);
        assert_eq!(tracker.progress().await, (0, 0, 3));

        tracker.record_sent(1, "a".into()).await;
        assert_eq!(tracker.progress().await, (1, 0, 3));

        tracker.record_failure(2, "b".into(), "boom".into()).await;
        assert_eq!(tracker.progress().await, (1, 1, 3));

        tracker.record_sent(3, "c".into()).await;
        assert_eq!(tracker.progress().await, (2, 1, 3));
        assert!(tracker.is_complete().await);
    }

    #[tokio::test]
    async fn results_preserve_arrival_order_not_index_order() {
        let tracker = CompletionTracker::new(2);
        tracker.record_sent(2, "second".into()).await;
        tracker.record_sent(1, "first".into()).await;

        let summary = tracker.snapshot().await;
        let indexes: Vec<usize> = summary.results.iter().map(|r| r.index).collect();
        assert_eq!(indexes, vec![2, 1]);
    }

    #[tokio::test]
    async fn summary_counts_match_terminal_records() {
        let tracker = CompletionTracker::new(4);
        tracker.record_sent(1, "a".into()).await;
        tracker.record_failure(2, "b".into(), "no".into()).await;
        tracker.record_sent(3, "c".into()).await;

        let summary = tracker.snapshot().await;
        assert_eq!(summary.completed(), summary.results.len());
        assert!(!summary.is_complete());
    }

    #[test]
    fn failed_record_serializes_with_reason() {
        let record = SendRecord {
            index: 3,
            payload: "hello".into(),
            state: SendState::Failed {
                reason: "rejected".into(),
            },
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["index"], 3);
        assert_eq!(json["outcome"], "failed");
        assert_eq!(json["reason"], "rejected");
    }

    #[test]
    fn sent_record_serializes_without_reason() {
        let record = SendRecord {
            index: 1,
            payload: "hello".into(),
            state: SendState::Sent,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["outcome"], "sent");
        assert!(json.get("reason").is_none());
    }
}
