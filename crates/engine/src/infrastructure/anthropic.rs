//! Anthropic Messages API client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::infrastructure::ports::{
    FinishReason, LlmError, LlmPort, LlmRequest, LlmResponse, TokenUsage,
};

/// Default API base URL.
pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";

/// Default model.
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-5-sonnet-20241022";

/// Default completion budget.
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

const API_VERSION: &str = "2023-06-01";

/// Client for the Anthropic Messages API
#[derive(Clone)]
pub struct AnthropicClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicClient {
    pub fn new(base_url: &str, api_key: &str, model: &str, max_tokens: u32) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            max_tokens,
        }
    }
}

#[async_trait]
impl LlmPort for AnthropicClient {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let api_request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: build_messages(&request),
            system: request.system_prompt.clone(),
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&api_request)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .map_err(|e| LlmError::RequestFailed(e.to_string()))?;
            return Err(LlmError::RequestFailed(format!("{status}: {error_text}")));
        }

        let api_response: MessagesResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        convert_response(api_response)
    }
}

fn build_messages(request: &LlmRequest) -> Vec<ApiMessage> {
    request
        .messages
        .iter()
        .map(|msg| ApiMessage {
            role: "user",
            content: msg.content.clone(),
        })
        .collect()
}

fn convert_response(response: MessagesResponse) -> Result<LlmResponse, LlmError> {
    let block = response
        .content
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::InvalidResponse("Empty content in LLM response".to_string()))?;

    let finish_reason = match response.stop_reason.as_deref() {
        Some("end_turn") | Some("stop_sequence") => FinishReason::Stop,
        Some("max_tokens") => FinishReason::Length,
        _ => FinishReason::Unknown,
    };

    Ok(LlmResponse {
        content: block.text.unwrap_or_default(),
        finish_reason,
        usage: response.usage.map(|u| TokenUsage {
            input_tokens: u.input_tokens,
            output_tokens: u.output_tokens,
        }),
    })
}

// Anthropic API types

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ApiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
}

#[derive(Debug, Serialize)]
struct ApiMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
    usage: Option<ApiUsage>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::ChatMessage;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> AnthropicClient {
        AnthropicClient::new(&server.uri(), "test-key", DEFAULT_ANTHROPIC_MODEL, 2048)
    }

    #[tokio::test]
    async fn generate_sends_messages_request_and_reads_first_block() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "test-key"))
            .and(header("anthropic-version", "2023-06-01"))
            .and(body_json(json!({
                "model": "claude-3-5-sonnet-20241022",
                "max_tokens": 2048,
                "messages": [{ "role": "user", "content": "Expand Bram" }],
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "msg_1",
                "type": "message",
                "role": "assistant",
                "content": [{ "type": "text", "text": "[\"a\", \"b\"]" }],
                "stop_reason": "end_turn",
                "usage": { "input_tokens": 12, "output_tokens": 5 },
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server)
            .generate(LlmRequest::new(vec![ChatMessage::user("Expand Bram")]))
            .await
            .expect("generate");

        assert_eq!(response.content, "[\"a\", \"b\"]");
        assert_eq!(response.finish_reason, FinishReason::Stop);
        assert_eq!(response.usage.map(|u| u.output_tokens), Some(5));
    }

    #[tokio::test]
    async fn system_prompt_and_configured_budget_are_forwarded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(body_json(json!({
                "model": "claude-3-5-sonnet-20241022",
                "max_tokens": 64,
                "messages": [{ "role": "user", "content": "hi" }],
                "system": "Be brief.",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "content": [{ "type": "text", "text": "hello" }],
                "stop_reason": "max_tokens",
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = AnthropicClient::new(&server.uri(), "test-key", DEFAULT_ANTHROPIC_MODEL, 64);
        let request = LlmRequest::new(vec![ChatMessage::user("hi")]).with_system_prompt("Be brief.");
        let response = client.generate(request).await.expect("generate");

        assert_eq!(response.finish_reason, FinishReason::Length);
        assert!(response.usage.is_none());
    }

    #[tokio::test]
    async fn empty_content_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "content": [], "stop_reason": null })),
            )
            .mount(&server)
            .await;

        let result = client_for(&server)
            .generate(LlmRequest::new(vec![ChatMessage::user("hi")]))
            .await;

        assert!(matches!(result, Err(LlmError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn error_status_is_request_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "type": "error",
                "error": { "type": "authentication_error", "message": "invalid x-api-key" },
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .generate(LlmRequest::new(vec![ChatMessage::user("hi")]))
            .await
            .expect_err("should fail");

        match err {
            LlmError::RequestFailed(message) => {
                assert!(message.contains("401"));
                assert!(message.contains("invalid x-api-key"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
