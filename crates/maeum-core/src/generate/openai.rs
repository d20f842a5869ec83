//! OpenAI-compatible chat-completion client.
//!
//! The wire structures follow the OpenAI REST shape so any compatible
//! hosted service works by pointing the base URL elsewhere. Only the
//! fields this client reads are modeled; unknown response fields are
//! ignored.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CounselError;
use crate::generate::{GenerationRequest, ResponseGenerator};

// ── Wire types ───────────────────────────────────────────────────────────────

/// A single message in the request conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WireMessage {
    /// `"system"`, `"user"`, or `"assistant"`.
    role: String,
    content: String,
}

/// Request body for `POST {base}/chat/completions`.
#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<WireMessage>,
    temperature: f32,
}

/// A single choice in the completion response.
#[derive(Debug, Clone, Deserialize)]
struct ChatChoice {
    message: WireMessage,
}

/// Response body for `POST {base}/chat/completions`.
#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

// ── Client ───────────────────────────────────────────────────────────────────

/// Generator backed by an OpenAI-compatible chat-completion endpoint.
pub struct OpenAiGenerator {
    client: Client,
    url: String,
    api_key: String,
    model: String,
}

impl OpenAiGenerator {
    /// Build a generator for `model` served under `base_url`.
    ///
    /// The HTTP client is built once here and reused for every call.
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CounselError> {
        let client = Client::builder()
            .user_agent(concat!("maeum/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| CounselError::GenerationUnavailable {
                message: format!("http client: {e}"),
            })?;
        Ok(Self {
            client,
            url: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key: api_key.into(),
            model: model.into(),
        })
    }
}

#[async_trait]
impl ResponseGenerator for OpenAiGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, CounselError> {
        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                WireMessage {
                    role: "system".to_owned(),
                    content: request.system_prompt.clone(),
                },
                WireMessage {
                    role: "user".to_owned(),
                    content: request.user_prompt.clone(),
                },
            ],
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CounselError::GenerationUnavailable {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CounselError::GenerationUnavailable {
                message: format!("{status}: {body}"),
            });
        }

        let completion = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| CounselError::GenerationUnavailable {
                message: format!("decode: {e}"),
            })?;

        let reply = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| CounselError::GenerationUnavailable {
                message: "response contained no choices".to_owned(),
            })?;

        debug!(reply_len = reply.len(), "completion received");
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_to_openai_shape() {
        let body = ChatCompletionRequest {
            model: "gpt-4o-mini".to_owned(),
            messages: vec![
                WireMessage {
                    role: "system".to_owned(),
                    content: "너는 따뜻한 심리상담사이다.".to_owned(),
                },
                WireMessage {
                    role: "user".to_owned(),
                    content: "상담 프롬프트".to_owned(),
                },
            ],
            temperature: 0.7,
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["temperature"], json!(0.7_f32));
    }

    #[test]
    fn response_decodes_first_choice_and_ignores_extras() {
        let body = json!({
            "id": "chatcmpl-ab12",
            "object": "chat.completion",
            "created": 1_700_000_000,
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": "많이 힘드셨겠어요." },
                "finish_reason": "stop"
            }],
            "usage": { "total_tokens": 120 }
        });

        let completion: ChatCompletionResponse = serde_json::from_value(body).unwrap();
        assert_eq!(completion.choices.len(), 1);
        assert_eq!(completion.choices[0].message.content, "많이 힘드셨겠어요.");
    }

    #[test]
    fn empty_choice_list_decodes() {
        let completion: ChatCompletionResponse =
            serde_json::from_value(json!({ "choices": [] })).unwrap();
        assert!(completion.choices.is_empty());
    }

    #[test]
    fn request_url_joins_base_and_path() {
        let generator = OpenAiGenerator::new(
            "https://api.openai.com/v1/",
            "sk-test",
            "gpt-4o-mini",
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(generator.url, "https://api.openai.com/v1/chat/completions");
    }
}
