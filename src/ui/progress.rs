//! Terminal progress reporters for in-flight batches, rendered via
//! `indicatif`.

use crate::batch::Reporter;
use crate::batch::SendSummary;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::json;
use std::time::Duration;

/// Spinner line for human-readable output.
///
/// The dispatch loop drives [`Reporter::report`] once per second; the spinner
/// itself animates on a faster steady tick so the line stays visibly alive
/// between reports.
pub struct BatchProgress {
    bar: ProgressBar,
}

impl BatchProgress {
    pub fn new(total: usize) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{prefix:.bold.dim} {spinner} {msg}")
                .expect("progress bar template is a valid static string"),
        );
        bar.set_prefix("Sending");
        bar.set_message(format!("0/{} sent", total));
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    /// Clear the spinner before the final summary is printed.
    pub fn finish(&self, summary: &SendSummary) {
        if summary.errors == 0 {
            self.bar.finish_and_clear();
        } else {
            self.bar.finish_with_message(format!(
                "{}/{} sent, {}",
                summary.sent,
                summary.total,
                style(format!("{} failed", summary.errors)).red()
            ));
        }
    }
}

impl Reporter for BatchProgress {
    fn interval(&self) -> Duration {
        Duration::from_millis(1000)
    }

    fn report(&self, sent: usize, errors: usize, total: usize) {
        let mut msg = format!("{}/{} sent", sent, total);
        if errors > 0 {
            msg.push_str(&format!(", {}", style(format!("{} failed", errors)).red()));
        }
        self.bar.set_message(msg);
    }
}

/// Line-per-tick progress events for structured output.
pub struct JsonProgress;

impl Reporter for JsonProgress {
    fn interval(&self) -> Duration {
        Duration::from_millis(2000)
    }

    fn report(&self, sent: usize, errors: usize, total: usize) {
        println!(
            "{}",
            json!({
                "event": "progress",
                "sent": sent,
                "errors": errors,
                "total": total,
            })
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reporter_intervals_match_output_mode() {
        let text = BatchProgress::new(5);
        assert_eq!(text.interval(), Duration::from_millis(1000));
        assert_eq!(JsonProgress.interval(), Duration::from_millis(2000));
    }
}
