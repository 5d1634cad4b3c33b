use crate::domain::error::AppError;
use crate::domain::settings::AppSettings;
use crate::infra::completion::prompts;
use crate::infra::completion::{CompletionClient, GenerationRequest};

/// 文体分析ステップ: 1回の補完呼び出しで分析テキストを得る。
/// 再試行も内容の検証もしない。
pub struct AnalysisStep<'a> {
    client: &'a dyn CompletionClient,
    settings: &'a AppSettings,
}

impl<'a> AnalysisStep<'a> {
    pub fn new(client: &'a dyn CompletionClient, settings: &'a AppSettings) -> Self {
        Self { client, settings }
    }

    pub async fn run(&self, text: &str) -> Result<String, AppError> {
        let request = GenerationRequest::new(
            prompts::analysis_prompt(text),
            self.settings.model.as_str(),
            prompts::ANALYSIS_MAX_TOKENS,
            self.settings.temperature,
        );
        let analysis = self.client.complete(&request).await?;
        Ok(analysis)
    }
}
