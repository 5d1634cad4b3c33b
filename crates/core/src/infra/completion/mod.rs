pub mod openai;
mod noop;
pub mod prompts;
#[cfg(any(test, feature = "test-util"))]
mod scripted;

pub use noop::NoopCompletionClient;
#[cfg(any(test, feature = "test-util"))]
pub use scripted::ScriptedCompletionClient;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::error::AppError;

/// 補完エラー
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("Completion client not available: {0}")]
    NotAvailable(String),
    #[error("Completion failed: {0}")]
    Failed(String),
    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),
    #[error("Completion timeout")]
    Timeout,
}

impl From<CompletionError> for AppError {
    fn from(e: CompletionError) -> Self {
        match e {
            CompletionError::Timeout => AppError::timeout(e.to_string()),
            other => AppError::provider(other.to_string()),
        }
    }
}

/// 1回の補完呼び出しのパラメータ
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub prompt: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl GenerationRequest {
    /// max_tokens は1以上、temperature は [0, 1] に丸める
    pub fn new(prompt: impl Into<String>, model: impl Into<String>, max_tokens: u32, temperature: f32) -> Self {
        let temperature = if temperature.is_finite() {
            temperature.clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self {
            prompt: prompt.into(),
            model: model.into(),
            max_tokens: max_tokens.max(1),
            temperature,
        }
    }
}

/// 補完クライアント trait（外部 LLM プロバイダやテストダブルが実装する）
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &GenerationRequest) -> Result<String, CompletionError>;

    fn name(&self) -> &str;
}
