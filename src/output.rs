//! Output formatting for the CLI.

use crate::batch::{SendState, SendSummary};
use console::style;
use serde::Serialize;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Self {
        match s {
            "json" => OutputFormat::Json,
            "yaml" => OutputFormat::Yaml,
            _ => OutputFormat::Text,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, OutputFormat::Text)
    }

    pub fn print_value<T: Serialize>(&self, value: &T) {
        match self {
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(value)
                        .expect("summary types serialize without error")
                );
            }
            OutputFormat::Yaml => {
                println!(
                    "{}",
                    serde_yaml::to_string(value).expect("summary types serialize without error")
                );
            }
            OutputFormat::Text => {
                // Text rendering is handled by each command.
            }
        }
    }
}

/// Print a simple key-value pair for text output.
pub fn print_field(label: &str, value: &str) {
    println!("{:<12} {}", format!("{}:", label), value);
}

/// Render the final batch summary in the selected format.
pub fn print_summary(format: OutputFormat, summary: &SendSummary) {
    if !format.is_text() {
        format.print_value(summary);
        return;
    }

    if summary.errors == 0 && summary.is_complete() {
        println!(
            "{} Sent {}/{} message{}",
            style("✓").green().bold(),
            summary.sent,
            summary.total,
            if summary.total == 1 { "" } else { "s" }
        );
        return;
    }

    println!(
        "{} Sent {}/{} messages ({} failed)",
        style("✗").red().bold(),
        summary.sent,
        summary.total,
        style(summary.errors).red()
    );
    for record in &summary.results {
        if let SendState::Failed { reason } = &record.state {
            println!(
                "  {} message {}: {}",
                style("✗").red(),
                record.index,
                style(reason).dim()
            );
        }
    }
    if !summary.is_complete() {
        println!(
            "  {} {} send(s) still outstanding when the wait expired",
            style("⚠").yellow(),
            summary.total - summary.completed()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str_defaults_to_text() {
        assert!(OutputFormat::from_str("text").is_text());
        assert!(OutputFormat::from_str("anything").is_text());
        assert!(!OutputFormat::from_str("json").is_text());
        assert!(!OutputFormat::from_str("yaml").is_text());
    }

    #[test]
    fn summary_serializes_for_structured_formats() {
        let mut summary = SendSummary::new(2);
        summary.sent = 2;

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["total"], 2);
        assert_eq!(json["sent"], 2);
        assert_eq!(json["errors"], 0);

        let yaml = serde_yaml::to_string(&summary).unwrap();
        assert!(yaml.contains("total: 2"));
    }
}
