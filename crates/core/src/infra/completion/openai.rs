use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{CompletionClient, CompletionError, GenerationRequest};

/// OpenAI 互換 Chat Completions API を使用したクライアント
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(api_key: String, api_base: &str, timeout_secs: u64) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| CompletionError::NotAvailable(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            endpoint: chat_endpoint(api_base),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn chat_endpoint(api_base: &str) -> String {
    format!("{}/chat/completions", api_base.trim_end_matches('/'))
}

fn build_body(request: &GenerationRequest) -> ChatRequest<'_> {
    ChatRequest {
        model: &request.model,
        messages: vec![Message {
            role: "user",
            content: &request.prompt,
        }],
        max_tokens: request.max_tokens,
        temperature: request.temperature,
    }
}

/// 先頭 choice の message.content を取り出す
fn first_choice_content(response: ChatResponse) -> Result<String, CompletionError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| CompletionError::MalformedResponse("No choices in response".to_string()))
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: &GenerationRequest) -> Result<String, CompletionError> {
        log::debug!(
            "chat completion: model={} max_tokens={}",
            request.model,
            request.max_tokens
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&build_body(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout
                } else {
                    CompletionError::Failed(format!("HTTP request failed: {e}"))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Failed(format!(
                "Completion API error: {status} - {body}"
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::MalformedResponse(format!("Response parse error: {e}")))?;

        first_choice_content(chat_response)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_client_name() {
        let client = OpenAiClient::new("test-key".to_string(), "https://api.openai.com/v1", 30).unwrap();
        assert_eq!(client.name(), "openai");
        assert_eq!(client.endpoint(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn test_chat_endpoint_trailing_slash() {
        assert_eq!(
            chat_endpoint("http://localhost:8000/v1/"),
            "http://localhost:8000/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let req = GenerationRequest::new("Analyze this", "gpt-3.5-turbo", 350, 0.7);
        let value = serde_json::to_value(build_body(&req)).unwrap();
        assert_eq!(value["model"], "gpt-3.5-turbo");
        assert_eq!(value["max_tokens"], 350);
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "Analyze this");
        assert_eq!(value["messages"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_first_choice_content() {
        let parsed: ChatResponse = serde_json::from_str(
            r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"ancient"}},{"index":1,"message":{"role":"assistant","content":"old"}}]}"#,
        )
        .unwrap();
        assert_eq!(first_choice_content(parsed).unwrap(), "ancient");
    }

    #[test]
    fn test_missing_choices_is_malformed() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(
            first_choice_content(parsed),
            Err(CompletionError::MalformedResponse(_))
        ));

        let parsed: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#).unwrap();
        assert!(first_choice_content(parsed).is_err());
    }
}
