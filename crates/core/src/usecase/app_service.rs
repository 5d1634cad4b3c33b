use std::sync::Arc;
use std::time::Instant;

use crate::domain::error::{AppError, ErrorCode};
use crate::domain::settings::AppSettings;
use crate::domain::types::{AnalyzeInput, AnalyzeResponse, Mode, RewriteInput, RewriteResponse};
use crate::infra::completion::CompletionClient;
use crate::infra::metrics::{Metrics, MetricsSummary, Phase};
use crate::usecase::orchestrator::RewriteOrchestrator;

pub const MSG_NO_INPUT: &str = "No input data provided";
pub const MSG_NO_HIGHLIGHT: &str = "No highlighted text provided";
pub const MSG_NO_REWRITE_TEXT: &str = "No text provided for rewriting";

/// アプリケーションサービス（HTTP ハンドラの共有 State）
pub struct AppService {
    orchestrator: RewriteOrchestrator,
    metrics: Metrics,
}

impl AppService {
    pub fn new(client: Arc<dyn CompletionClient>, settings: AppSettings) -> Self {
        Self {
            orchestrator: RewriteOrchestrator::new(client, settings),
            metrics: Metrics::new(),
        }
    }

    // ==================== Analyze ====================

    /// 分析 + 書き換え。入力エラーは補完 API を呼ぶ前に返す。
    pub async fn analyze(&self, input: AnalyzeInput) -> Result<AnalyzeResponse, AppError> {
        let start = Instant::now();
        self.metrics.inc_analyze_requests();

        let result = self.run_analyze(input).await;

        match &result {
            Ok(_) => self
                .metrics
                .record_latency(Phase::AnalyzeRequest, start.elapsed().as_millis() as u64),
            Err(e) => self.on_error("analyze", e),
        }
        result
    }

    async fn run_analyze(&self, input: AnalyzeInput) -> Result<AnalyzeResponse, AppError> {
        let story = input.story.trim();
        let highlighted = input.highlighted.trim();

        if story.is_empty() && highlighted.is_empty() {
            return Err(AppError::invalid_input(MSG_NO_HIGHLIGHT));
        }
        let mode = Mode::parse(input.mode.as_deref())?;
        if mode == Mode::Word && highlighted.is_empty() {
            return Err(AppError::invalid_input(MSG_NO_HIGHLIGHT));
        }

        let report = self
            .orchestrator
            .analyze_and_rewrite(story, highlighted, mode)
            .await?;

        let used_fallback = report.candidate.as_ref().is_some_and(|c| c.used_fallback());
        self.metrics.record_outcome(mode, used_fallback);
        self.metrics.record_timings(&report.timings);

        Ok(report.into_response())
    }

    // ==================== Rewrite ====================

    /// 分析なしの直接リライト
    pub async fn rewrite(&self, input: RewriteInput) -> Result<RewriteResponse, AppError> {
        let start = Instant::now();
        self.metrics.inc_rewrite_requests();

        let result = self.run_rewrite(input).await;

        match &result {
            Ok(_) => self
                .metrics
                .record_latency(Phase::RewriteRequest, start.elapsed().as_millis() as u64),
            Err(e) => self.on_error("rewrite", e),
        }
        result
    }

    async fn run_rewrite(&self, input: RewriteInput) -> Result<RewriteResponse, AppError> {
        let text = input.text.trim();
        if text.is_empty() {
            return Err(AppError::invalid_input(MSG_NO_REWRITE_TEXT));
        }
        let mode = Mode::parse(input.mode.as_deref())?;

        let (rewrite, timing) = self.orchestrator.direct_rewrite(text, mode).await?;
        self.metrics.record_timings(&[timing]);
        Ok(RewriteResponse { rewrite })
    }

    // ==================== Metrics ====================

    pub fn get_metrics(&self) -> MetricsSummary {
        self.metrics.summary()
    }

    pub fn record_error(&self, code: ErrorCode) {
        self.metrics.inc_error(code);
    }

    pub fn provider_name(&self) -> &str {
        self.orchestrator.provider_name()
    }

    fn on_error(&self, phase: &str, e: &AppError) {
        if e.code.is_client_error() {
            log::warn!("{phase}: {e}");
        } else {
            log::error!("{phase}: {e}");
        }
        self.metrics.inc_error(e.code);
    }
}
