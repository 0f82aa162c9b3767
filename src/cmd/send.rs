//! Shared batch-send funnel.
//!
//! Channel publishes, chat messages, and reactions all flow through
//! [`execute`]: the only differences between them are the REST path and the
//! JSON shape of each item.

use super::super::Cli;
use anyhow::Result;
use relay::batch::{
    BatchConfig, MessageTemplate, NullReporter, Sender, run_batch,
};
use relay::config::RelayConfig;
use relay::output::{self, OutputFormat};
use relay::transport::{HttpPublisher, default_client, publish_url};
use relay::ui::{BatchProgress, JsonProgress};
use std::sync::Arc;

pub struct SendRequest<'a> {
    /// REST path under `/v1/`, e.g. `channels/news/messages`.
    pub path: String,
    /// JSON field the rendered payload lands in.
    pub body_field: &'static str,
    /// Fixed fields merged into every item's body.
    pub extra: Vec<(&'static str, &'a str)>,
    /// Raw message body, possibly templated.
    pub body: &'a str,
    pub count: usize,
    pub delay: u64,
}

pub async fn execute(cli: &Cli, request: SendRequest<'_>) -> Result<()> {
    // Reject bad parameters before anything is initiated.
    let config = BatchConfig::new(request.count, request.delay)?;
    let template = MessageTemplate::parse(request.body)?;

    let settings = RelayConfig::resolve(
        cli.endpoint.as_deref(),
        cli.api_key.as_deref(),
        cli.config.as_deref(),
    )?;
    let api_key = settings.require_api_key()?;

    let mut publisher = HttpPublisher::new(
        default_client()?,
        publish_url(&settings.endpoint, &request.path),
        api_key.to_string(),
        request.body_field,
    );
    for (name, value) in &request.extra {
        publisher = publisher.with_field(name, value);
    }
    let sender: Arc<dyn Sender> = Arc::new(publisher);

    let format = OutputFormat::from_str(&cli.format);
    let item = |index: usize| template.render(index);

    let summary = match format {
        OutputFormat::Text if config.total() > 1 => {
            let progress = Arc::new(BatchProgress::new(config.total()));
            let summary = run_batch(&config, item, sender, progress.clone()).await?;
            progress.finish(&summary);
            summary
        }
        OutputFormat::Json => run_batch(&config, item, sender, Arc::new(JsonProgress)).await?,
        _ => run_batch(&config, item, sender, Arc::new(NullReporter)).await?,
    };

    output::print_summary(format, &summary);

    if summary.errors > 0 {
        anyhow::bail!("{} of {} sends failed", summary.errors, summary.total);
    }
    Ok(())
}
