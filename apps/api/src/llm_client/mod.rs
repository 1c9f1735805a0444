/// LLM Client: the single point of entry for all chat-completion calls.
///
/// ARCHITECTURAL RULE: No other module may call the model API directly.
/// Pipelines depend on the `ChatModel` trait; `LlmClient` is the production implementation.
///
/// Every call asks for a JSON object response. Nothing is retried and nothing is
/// repaired: a malformed reply surfaces when the schema parser rejects it.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// One request to the model: a system message, a user message, and sampling temperature.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f64,
}

impl ChatRequest {
    pub fn new(model: &str, prompts: PromptPair, temperature: f64) -> Self {
        Self {
            model: model.to_string(),
            system_prompt: prompts.system,
            user_prompt: prompts.user,
            temperature,
        }
    }
}

/// A system prompt and a user prompt built together by one of the prompt builders.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
}

/// The model's reply: raw JSON text plus the token counts reported for the call.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatCompletion {
    pub content: String,
    pub usage: TokenUsage,
}

/// A chat model that answers with a JSON object.
///
/// Carried in `AppState` as `Arc<dyn ChatModel>` so handlers can run against a stub.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete_json(&self, request: &ChatRequest) -> Result<ChatCompletion, LlmError>;
}

#[derive(Debug, Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    temperature: f64,
    messages: [OpenAiMessage<'a>; 2],
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct OpenAiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

impl<'a> OpenAiRequest<'a> {
    fn from_chat(request: &'a ChatRequest) -> Self {
        Self {
            model: &request.model,
            temperature: request.temperature,
            messages: [
                OpenAiMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                OpenAiMessage {
                    role: "user",
                    content: &request.user_prompt,
                },
            ],
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        }
    }
}

impl OpenAiResponse {
    fn into_completion(self) -> Result<ChatCompletion, LlmError> {
        let content = self
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or(LlmError::EmptyContent)?;

        Ok(ChatCompletion {
            content,
            usage: self.usage.unwrap_or_default(),
        })
    }
}

/// OpenAI-compatible chat-completions client.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, base_url: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key,
            base_url,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl ChatModel for LlmClient {
    async fn complete_json(&self, request: &ChatRequest) -> Result<ChatCompletion, LlmError> {
        let body = OpenAiRequest::from_chat(request);

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!("LLM API returned {status}");
            let message = serde_json::from_str::<OpenAiError>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: OpenAiResponse = response.json().await?;
        let completion = parsed.into_completion()?;

        debug!(
            "LLM call succeeded: model={}, prompt_tokens={}, completion_tokens={}",
            request.model, completion.usage.prompt_tokens, completion.usage.completion_tokens
        );

        Ok(completion)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ChatRequest {
        ChatRequest {
            model: "gpt-4o-mini".to_string(),
            system_prompt: "sys".to_string(),
            user_prompt: "user".to_string(),
            temperature: 0.2,
        }
    }

    #[test]
    fn test_request_body_demands_json_object() {
        let chat = request();
        let body = serde_json::to_value(OpenAiRequest::from_chat(&chat)).unwrap();
        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["response_format"]["type"], "json_object");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "sys");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "user");
        assert!((body["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_response_with_usage() {
        let raw = r#"{
            "choices": [{"message": {"role": "assistant", "content": "{\"ok\": true}"}}],
            "usage": {"prompt_tokens": 120, "completion_tokens": 30, "total_tokens": 150}
        }"#;
        let parsed: OpenAiResponse = serde_json::from_str(raw).unwrap();
        let completion = parsed.into_completion().unwrap();
        assert_eq!(completion.content, r#"{"ok": true}"#);
        assert_eq!(completion.usage.prompt_tokens, 120);
        assert_eq!(completion.usage.completion_tokens, 30);
    }

    #[test]
    fn test_missing_usage_defaults_to_zero() {
        let raw = r#"{"choices": [{"message": {"content": "{}"}}]}"#;
        let parsed: OpenAiResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.into_completion().unwrap().usage, TokenUsage::default());
    }

    #[test]
    fn test_null_content_is_empty_error() {
        let raw = r#"{"choices": [{"message": {"content": null}}]}"#;
        let parsed: OpenAiResponse = serde_json::from_str(raw).unwrap();
        assert!(matches!(parsed.into_completion(), Err(LlmError::EmptyContent)));
    }

    #[test]
    fn test_no_choices_is_empty_error() {
        let parsed: OpenAiResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(matches!(parsed.into_completion(), Err(LlmError::EmptyContent)));
    }

    #[test]
    fn test_completions_url_joins_base() {
        let client = LlmClient::new("key".to_string(), "http://localhost:9000/v1".to_string()).unwrap();
        assert_eq!(client.completions_url(), "http://localhost:9000/v1/chat/completions");
    }
}
