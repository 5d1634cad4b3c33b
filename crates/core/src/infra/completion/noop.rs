use async_trait::async_trait;
use super::{CompletionClient, CompletionError, GenerationRequest};

/// NoopCompletionClient: プロンプト末尾の行をそのまま返すモック実装。
/// API キー未設定時の開発用。
pub struct NoopCompletionClient;

#[async_trait]
impl CompletionClient for NoopCompletionClient {
    async fn complete(&self, request: &GenerationRequest) -> Result<String, CompletionError> {
        let last_line = request
            .prompt
            .lines()
            .map(str::trim)
            .rev()
            .find(|line| !line.is_empty())
            .unwrap_or_default();
        Ok(format!("[noop] {last_line}"))
    }

    fn name(&self) -> &str {
        "noop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_client() {
        let req = GenerationRequest::new("Rewrite this:\n\n'He ran fast.'\n", "m", 150, 0.7);
        let result = NoopCompletionClient.complete(&req).await.unwrap();
        assert_eq!(result, "[noop] 'He ran fast.'");
    }

    #[tokio::test]
    async fn test_noop_empty_prompt() {
        let req = GenerationRequest::new("", "m", 150, 0.7);
        let result = NoopCompletionClient.complete(&req).await.unwrap();
        assert_eq!(result, "[noop] ");
    }

    #[test]
    fn test_noop_name() {
        assert_eq!(NoopCompletionClient.name(), "noop");
    }
}
