//! Timer-driven progress reporting for in-flight batches.

use crate::batch::tracker::CompletionTracker;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Sink for periodic progress reports while a batch is in flight.
///
/// The dispatch loop polls the tracker on a fixed timer and hands the current
/// counters to the reporter; implementations decide how (or whether) to
/// surface them.
pub trait Reporter: Send + Sync {
    /// Spacing between reports.
    fn interval(&self) -> Duration;

    /// Called on each tick with the current counters.
    fn report(&self, sent: usize, errors: usize, total: usize);
}

/// Reporter that discards every report.
pub struct NullReporter;

impl Reporter for NullReporter {
    fn interval(&self) -> Duration {
        Duration::from_millis(1000)
    }

    fn report(&self, _sent: usize, _errors: usize, _total: usize) {}
}

/// Running reporter task, aborted when the handle is dropped.
///
/// Dropping is the single cleanup path: the dispatch loop drops the handle
/// when its completion wait ends, and an early return drops it just the same.
pub(crate) struct ReporterHandle {
    handle: JoinHandle<()>,
}

impl ReporterHandle {
    pub(crate) fn spawn(reporter: Arc<dyn Reporter>, tracker: CompletionTracker) -> Self {
        let period = reporter.interval();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick fires immediately; skip it so reports start one
            // full interval into the batch.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let (sent, errors, total) = tracker.progress().await;
                reporter.report(sent, errors, total);
            }
        });
        Self { handle }
    }
}

impl Drop for ReporterHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingReporter {
        period: Duration,
        ticks: AtomicUsize,
    }

    impl Reporter for CountingReporter {
        fn interval(&self) -> Duration {
            self.period
        }

        fn report(&self, _sent: usize, _errors: usize, _total: usize) {
            self.ticks.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn reporter_fires_once_per_interval() {
        let reporter = Arc::new(CountingReporter {
            period: Duration::from_millis(1000),
            ticks: AtomicUsize::new(0),
        });
        let tracker = CompletionTracker::new(5);

        let handle = ReporterHandle::spawn(reporter.clone(), tracker);
        tokio::time::sleep(Duration::from_millis(3500)).await;
        drop(handle);

        assert_eq!(reporter.ticks.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_handle_stops_reports() {
        let reporter = Arc::new(CountingReporter {
            period: Duration::from_millis(1000),
            ticks: AtomicUsize::new(0),
        });
        let tracker = CompletionTracker::new(5);

        let handle = ReporterHandle::spawn(reporter.clone(), tracker);
        tokio::time::sleep(Duration::from_millis(1500)).await;
        drop(handle);
        tokio::time::sleep(Duration::from_millis(5000)).await;

        assert_eq!(reporter.ticks.load(Ordering::SeqCst), 1);
    }
}
