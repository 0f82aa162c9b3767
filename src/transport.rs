//! HTTP publish transport.
//!
//! One POST per item against the service's REST publish paths. The dispatch
//! loop only sees the [`Sender`] trait; everything HTTP-shaped stays here.

use crate::batch::Sender;
use crate::errors::PublishError;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value, json};
use std::time::Duration;

/// Publisher bound to one REST path, posting each rendered payload as JSON.
///
/// The payload lands in `body_field`; `extra` fields (e.g. the message name)
/// are merged into every body unchanged.
pub struct HttpPublisher {
    client: reqwest::Client,
    url: String,
    api_key: String,
    body_field: String,
    extra: Map<String, Value>,
}

impl HttpPublisher {
    pub fn new(client: reqwest::Client, url: String, api_key: String, body_field: &str) -> Self {
        Self {
            client,
            url,
            api_key,
            body_field: body_field.to_string(),
            extra: Map::new(),
        }
    }

    /// Add a fixed field sent with every item.
    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.extra.insert(name.to_string(), json!(value));
        self
    }

    fn build_body(&self, payload: &str) -> Value {
        let mut body = self.extra.clone();
        body.insert(self.body_field.clone(), json!(payload));
        Value::Object(body)
    }
}

#[async_trait]
impl Sender for HttpPublisher {
    async fn send(&self, payload: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&self.build_body(payload))
            .send()
            .await
            .map_err(PublishError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PublishError::Rejected {
                status: status.as_u16(),
                body,
            }
            .into());
        }
        tracing::debug!(url = %self.url, "published");
        Ok(())
    }
}

/// HTTP client shared by all publishes in one command invocation.
pub fn default_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(30))
        .user_agent(concat!("relay/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Join the endpoint base with a REST path, tolerating trailing slashes.
pub fn publish_url(endpoint: &str, path: &str) -> String {
    format!("{}/v1/{}", endpoint.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publisher(body_field: &str) -> HttpPublisher {
        HttpPublisher::new(
            default_client().unwrap(),
            "http://127.0.0.1:9/v1/channels/news/messages".into(),
            "key".into(),
            body_field,
        )
    }

    #[test]
    fn body_carries_payload_in_the_configured_field() {
        let body = publisher("data").build_body("hello");
        assert_eq!(body, json!({"data": "hello"}));
    }

    #[test]
    fn extra_fields_are_merged_into_every_body() {
        let body = publisher("data")
            .with_field("name", "greeting")
            .build_body("hello");
        assert_eq!(body, json!({"name": "greeting", "data": "hello"}));
    }

    #[test]
    fn publish_url_joins_base_and_path() {
        assert_eq!(
            publish_url("https://rest.relay.dev", "channels/news/messages"),
            "https://rest.relay.dev/v1/channels/news/messages"
        );
        assert_eq!(
            publish_url("https://rest.relay.dev/", "rooms/lobby/reactions"),
            "https://rest.relay.dev/v1/rooms/lobby/reactions"
        );
    }
}
