//! RelayClient - HTTP client for an OpenAI-compatible chat relay.
//!
//! The relay is a thin proxy in front of a chat-completions API: it takes
//! `{ model, messages }` and answers with the provider's response shape.
//! Configuration priority: command line > environment > `config.toml`.

use async_trait::async_trait;
use reqwest::Client;
use routina_core::config::RelayConfig;
use routina_core::conversation::{ChatMessage, ChatRelay, RelayError, RequestId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Relay client that posts the full history on every call.
///
/// No timeout is set; a request that never completes keeps its placeholder
/// pending.
#[derive(Clone)]
pub struct RelayClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl RelayClient {
    /// Creates a client for `endpoint` using `model`.
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: None,
        }
    }

    /// Builds a client from the `[relay]` config section.
    pub fn from_config(config: &RelayConfig) -> Result<Self, RelayError> {
        let endpoint = config
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or(RelayError::NotConfigured)?;

        let mut client = Self::new(endpoint, config.model.clone());
        if let Some(key) = config.api_key.as_deref().filter(|k| !k.is_empty()) {
            client = client.with_api_key(key);
        }
        Ok(client)
    }

    /// Sends `Authorization: Bearer <key>` with each request.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send_request(&self, body: &ChatCompletionRequest<'_>) -> Result<String, RelayError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|err| RelayError::Transport(format!("relay request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "relay answered with a non-success status");
        }

        response
            .text()
            .await
            .map_err(|err| RelayError::Transport(format!("failed to read relay body: {err}")))
    }
}

#[async_trait]
impl ChatRelay for RelayClient {
    async fn complete(
        &self,
        request_id: RequestId,
        messages: Vec<ChatMessage>,
    ) -> Result<Option<String>, RelayError> {
        debug!(%request_id, messages = messages.len(), model = %self.model, "posting to relay");

        let request = ChatCompletionRequest {
            model: &self.model,
            messages: &messages,
        };
        let body = self.send_request(&request).await?;
        parse_completion(&body)
    }
}

/// Relay used when no endpoint is configured. Every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredRelay;

#[async_trait]
impl ChatRelay for UnconfiguredRelay {
    async fn complete(
        &self,
        request_id: RequestId,
        _messages: Vec<ChatMessage>,
    ) -> Result<Option<String>, RelayError> {
        warn!(%request_id, "relay call without a configured endpoint");
        Err(RelayError::NotConfigured)
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize, Default)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Extracts `choices[0].message.content` from a relay response body.
///
/// - body is not JSON: `Err(RelayError::Parse)`
/// - JSON without that path, or with an empty string there: `Ok(None)`
pub fn parse_completion(body: &str) -> Result<Option<String>, RelayError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|err| RelayError::Parse(format!("relay response is not JSON: {err}")))?;

    // Any other JSON shape (error envelopes, arrays) just has no reply.
    let response: ChatCompletionResponse = serde_json::from_value(value).unwrap_or_default();

    Ok(response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .filter(|content| !content.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reply_text() {
        let body = r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"Use SPF daily."}}]}"#;
        assert_eq!(
            parse_completion(body).unwrap().as_deref(),
            Some("Use SPF daily.")
        );
    }

    #[test]
    fn test_parse_takes_first_choice() {
        let body = r#"{"choices":[{"message":{"content":"first"}},{"message":{"content":"second"}}]}"#;
        assert_eq!(parse_completion(body).unwrap().as_deref(), Some("first"));
    }

    #[test]
    fn test_missing_content_is_none() {
        for body in [
            r#"{}"#,
            r#"{"choices":[]}"#,
            r#"{"choices":[{}]}"#,
            r#"{"choices":[{"message":{"content":null}}]}"#,
            r#"{"choices":[{"message":{"content":""}}]}"#,
            r#"{"error":{"message":"quota exceeded"}}"#,
            r#"[1,2,3]"#,
        ] {
            assert_eq!(parse_completion(body).unwrap(), None, "body: {body}");
        }
    }

    #[test]
    fn test_non_json_is_parse_error() {
        let err = parse_completion("<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, RelayError::Parse(_)));
    }

    #[test]
    fn test_request_wire_shape() {
        let messages = vec![ChatMessage::system("be brief"), ChatMessage::user("hi")];
        let request = ChatCompletionRequest {
            model: "gpt-4.1-mini",
            messages: &messages,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "gpt-4.1-mini",
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "user", "content": "hi"}
                ]
            })
        );
    }

    #[test]
    fn test_from_config_requires_endpoint() {
        let mut config = RelayConfig::default();
        assert!(matches!(
            RelayClient::from_config(&config),
            Err(RelayError::NotConfigured)
        ));

        config.endpoint = Some("  ".to_string());
        assert!(RelayClient::from_config(&config).is_err());

        config.endpoint = Some("https://relay.example.workers.dev".to_string());
        config.model = "gpt-4o".to_string();
        let client = RelayClient::from_config(&config).unwrap();
        assert_eq!(client.endpoint(), "https://relay.example.workers.dev");
        assert_eq!(client.model(), "gpt-4o");
    }
}
