//! Ollama provider — non-streaming `/api/chat` over HTTP.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::llm::{CompletionRequest, CompletionResponse, LlmConfig, LlmProvider};

const PROVIDER: &str = "ollama";

/// LLM provider backed by a local Ollama server.
pub struct OllamaProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaProvider {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| LlmError::RequestFailed {
                provider: PROVIDER.to_string(),
                reason: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }
}

/// Request body for `POST /api/chat`.
#[derive(Debug, Serialize)]
struct ChatApiRequest<'a> {
    model: &'a str,
    messages: Vec<ChatApiMessage<'a>>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<ChatApiOptions>,
}

#[derive(Debug, Serialize)]
struct ChatApiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatApiOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<i32>,
}

/// Response body for a non-streaming `/api/chat` call.
#[derive(Debug, Deserialize)]
struct ChatApiResponse {
    message: Option<ChatApiResponseMessage>,
    #[serde(default)]
    prompt_eval_count: u32,
    #[serde(default)]
    eval_count: u32,
}

#[derive(Debug, Deserialize)]
struct ChatApiResponseMessage {
    content: String,
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = ChatApiRequest {
            model: &self.model,
            messages: request
                .messages
                .iter()
                .map(|m| ChatApiMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            stream: false,
            options: if request.temperature.is_some() || request.max_tokens.is_some() {
                Some(ChatApiOptions {
                    temperature: request.temperature,
                    num_predict: request.max_tokens.map(|n| n as i32),
                })
            } else {
                None
            },
        };

        let url = format!("{}/api/chat", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed {
                provider: PROVIDER.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(LlmError::RequestFailed {
                provider: PROVIDER.to_string(),
                reason: format!("HTTP {status}: {detail}"),
            });
        }

        let parsed: ChatApiResponse =
            response.json().await.map_err(|e| LlmError::InvalidResponse {
                provider: PROVIDER.to_string(),
                reason: format!("Failed to decode chat response: {e}"),
            })?;

        let content = parsed
            .message
            .map(|m| m.content)
            .ok_or_else(|| LlmError::InvalidResponse {
                provider: PROVIDER.to_string(),
                reason: "Chat response had no message".to_string(),
            })?;

        tracing::debug!(
            input_tokens = parsed.prompt_eval_count,
            output_tokens = parsed.eval_count,
            "Ollama completion finished"
        );

        Ok(CompletionResponse {
            content,
            input_tokens: parsed.prompt_eval_count,
            output_tokens: parsed.eval_count,
        })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ChatMessage;

    #[test]
    fn request_body_shape() {
        let body = ChatApiRequest {
            model: "mistral-small3.2",
            messages: vec![ChatApiMessage {
                role: "user",
                content: "hello",
            }],
            stream: false,
            options: Some(ChatApiOptions {
                temperature: Some(0.0),
                num_predict: Some(256),
            }),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "mistral-small3.2");
        assert_eq!(json["stream"], false);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["options"]["num_predict"], 256);
    }

    #[test]
    fn options_omitted_when_unset() {
        let request = CompletionRequest::new(vec![ChatMessage::user("hi")]);
        assert!(request.temperature.is_none() && request.max_tokens.is_none());

        let body = ChatApiRequest {
            model: "m",
            messages: vec![],
            stream: false,
            options: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("options").is_none());
    }

    #[test]
    fn response_tolerates_missing_counts() {
        let parsed: ChatApiResponse =
            serde_json::from_str(r#"{"message":{"role":"assistant","content":"hi"}}"#).unwrap();
        assert_eq!(parsed.prompt_eval_count, 0);
        assert_eq!(parsed.eval_count, 0);
        assert_eq!(parsed.message.unwrap().content, "hi");
    }

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let config = LlmConfig {
            base_url: "http://localhost:11434/".to_string(),
            model: "m".to_string(),
            request_timeout: std::time::Duration::from_secs(5),
        };
        let provider = OllamaProvider::new(&config).unwrap();
        assert_eq!(provider.base_url, "http://localhost:11434");
    }
}
