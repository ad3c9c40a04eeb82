use lazy_static::lazy_static;
use serde_json::json;

use crate::relay::envelope::Envelope;

use super::types::Message;

pub const DEFAULT_RELAY_URL: &str = "http://127.0.0.1:3000/chat";

pub const CONNECT_ERROR: &str =
    "Network error: Could not connect to AI service. Make sure the proxy server is running.";
const EMPTY_REPLY: &str = "Received empty response from server.";

lazy_static! {
    static ref HTTP: reqwest::Client = reqwest::Client::new();
}

/// Posts the conversation to the relay and decodes the envelope. Every
/// failure mode comes back as a Failure envelope, so callers always render a
/// chat message and never leak an error into the host page.
#[derive(Debug, Clone)]
pub struct RelayClient {
    url: String,
}

impl RelayClient {
    pub fn new(url: impl Into<String>) -> RelayClient {
        RelayClient { url: url.into() }
    }

    pub fn from_env() -> RelayClient {
        RelayClient::new(
            std::env::var("PROXY_URL").unwrap_or_else(|_| DEFAULT_RELAY_URL.to_string()),
        )
    }

    pub async fn send(&self, messages: &[Message]) -> Envelope {
        let response = match HTTP
            .post(&self.url)
            .json(&json!({ "messages": messages }))
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!("relay unreachable: {err}");
                return Envelope::failure(CONNECT_ERROR);
            }
        };

        // Error envelopes ride on non-2xx statuses; the body is authoritative
        // either way.
        match response.json::<Envelope>().await {
            Ok(envelope) => envelope,
            Err(err) => {
                tracing::warn!("undecodable relay reply: {err}");
                Envelope::failure(EMPTY_REPLY)
            }
        }
    }
}
