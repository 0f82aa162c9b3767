//! Channel publishing — `relay channels publish`.

use super::super::Cli;
use super::send::{self, SendRequest};
use anyhow::Result;

pub async fn cmd_publish(
    cli: &Cli,
    channel: &str,
    message: &str,
    count: usize,
    delay: u64,
    event: &str,
) -> Result<()> {
    send::execute(
        cli,
        SendRequest {
            path: format!("channels/{channel}/messages"),
            body_field: "data",
            extra: vec![("name", event)],
            body: message,
            count,
            delay,
        },
    )
    .await
}
