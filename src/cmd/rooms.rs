//! Room messaging — `relay rooms messages send` and `relay rooms reactions send`.

use super::super::Cli;
use super::send::{self, SendRequest};
use anyhow::Result;

pub async fn cmd_send_message(
    cli: &Cli,
    room: &str,
    text: &str,
    count: usize,
    delay: u64,
) -> Result<()> {
    send::execute(
        cli,
        SendRequest {
            path: format!("rooms/{room}/messages"),
            body_field: "text",
            extra: Vec::new(),
            body: text,
            count,
            delay,
        },
    )
    .await
}

pub async fn cmd_send_reaction(
    cli: &Cli,
    room: &str,
    name: &str,
    count: usize,
    delay: u64,
) -> Result<()> {
    send::execute(
        cli,
        SendRequest {
            path: format!("rooms/{room}/reactions"),
            body_field: "name",
            extra: Vec::new(),
            body: name,
            count,
            delay,
        },
    )
    .await
}
