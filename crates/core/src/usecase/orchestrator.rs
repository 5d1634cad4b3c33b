use std::sync::Arc;
use std::time::Instant;

use crate::domain::error::AppError;
use crate::domain::replacement::ReplacementCandidate;
use crate::domain::settings::AppSettings;
use crate::domain::types::{AnalyzeResponse, Mode, RewriteOutcome};
use crate::infra::completion::prompts;
use crate::infra::completion::{CompletionClient, GenerationRequest};
use crate::infra::metrics::{Phase, PhaseTiming};
use crate::usecase::analysis::AnalysisStep;
use crate::usecase::replacement::ReplacementValidator;

/// 分析→書き換えの実行結果
#[derive(Debug, Clone)]
pub struct RewriteReport {
    pub analysis: String,
    pub outcome: RewriteOutcome,
    /// word モードのときの採用候補
    pub candidate: Option<ReplacementCandidate>,
    /// 実行順のフェーズ所要時間
    pub timings: Vec<PhaseTiming>,
}

impl RewriteReport {
    pub fn into_response(self) -> AnalyzeResponse {
        AnalyzeResponse {
            analysis: self.analysis,
            outcome: self.outcome,
        }
    }
}

/// 書き換えオーケストレータ。補完クライアントは起動時に一度だけ構築して注入する。
pub struct RewriteOrchestrator {
    client: Arc<dyn CompletionClient>,
    settings: AppSettings,
}

impl RewriteOrchestrator {
    pub fn new(client: Arc<dyn CompletionClient>, settings: AppSettings) -> Self {
        Self { client, settings }
    }

    pub fn provider_name(&self) -> &str {
        self.client.name()
    }

    /// 分析してからモード別に書き換える
    ///
    /// - word: `highlighted` を `story` の文脈で置き換える（2〜4回の呼び出し）
    /// - sentence: `highlighted`（空なら `story`）を1回で書き直す
    pub async fn analyze_and_rewrite(
        &self,
        story: &str,
        highlighted: &str,
        mode: Mode,
    ) -> Result<RewriteReport, AppError> {
        let analysis_source = if story.is_empty() { highlighted } else { story };
        let start = Instant::now();
        let analysis = AnalysisStep::new(self.client.as_ref(), &self.settings)
            .run(analysis_source)
            .await?;
        let mut timings = vec![PhaseTiming::since(Phase::Analysis, start)];

        let start = Instant::now();
        match mode {
            Mode::Word => {
                let candidate = ReplacementValidator::new(self.client.as_ref(), &self.settings)
                    .replace(&analysis, analysis_source, highlighted)
                    .await?;
                timings.push(PhaseTiming::since(Phase::Replacement, start));
                Ok(RewriteReport {
                    analysis,
                    outcome: RewriteOutcome::WordReplacement(candidate.text.clone()),
                    candidate: Some(candidate),
                    timings,
                })
            }
            Mode::Sentence => {
                let target = if highlighted.is_empty() { story } else { highlighted };
                let prompt = prompts::sentence_rewrite_prompt(&analysis, target);
                let rewrite = self.complete(prompt, prompts::REWRITE_MAX_TOKENS).await?;
                timings.push(PhaseTiming::since(Phase::SentenceRewrite, start));
                Ok(RewriteReport {
                    analysis,
                    outcome: RewriteOutcome::SentenceRewrite(rewrite),
                    candidate: None,
                    timings,
                })
            }
        }
    }

    /// 分析なしで1回だけ書き換える
    pub async fn direct_rewrite(
        &self,
        text: &str,
        mode: Mode,
    ) -> Result<(String, PhaseTiming), AppError> {
        let start = Instant::now();
        let prompt = prompts::direct_rewrite_prompt(text, mode);
        let rewrite = self.complete(prompt, prompts::REWRITE_MAX_TOKENS).await?;
        Ok((rewrite, PhaseTiming::since(Phase::DirectRewrite, start)))
    }

    async fn complete(&self, prompt: String, max_tokens: u32) -> Result<String, AppError> {
        let request = GenerationRequest::new(
            prompt,
            self.settings.model.as_str(),
            max_tokens,
            self.settings.temperature,
        );
        Ok(self.client.complete(&request).await?)
    }
}
