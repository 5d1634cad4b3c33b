use std::collections::{BTreeMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use serde::Serialize;

use crate::domain::error::ErrorCode;
use crate::domain::types::Mode;

/// 直近レイテンシ記録の保持件数
const RECENT_CAPACITY: usize = 20;

/// レイテンシ計測の対象
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// `/api/analyze` 全体
    AnalyzeRequest,
    /// `/api/rewrite` 全体
    RewriteRequest,
    /// 分析呼び出し
    Analysis,
    /// 置換候補の生成と判定（2〜4回の呼び出し）
    Replacement,
    SentenceRewrite,
    DirectRewrite,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AnalyzeRequest => "analyze_request",
            Self::RewriteRequest => "rewrite_request",
            Self::Analysis => "analysis",
            Self::Replacement => "replacement",
            Self::SentenceRewrite => "sentence_rewrite",
            Self::DirectRewrite => "direct_rewrite",
        }
    }
}

/// 1フェーズ分の所要時間
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseTiming {
    pub phase: Phase,
    pub duration_ms: u64,
}

impl PhaseTiming {
    pub fn since(phase: Phase, start: Instant) -> Self {
        Self {
            phase,
            duration_ms: start.elapsed().as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LatencyRecord {
    pub phase: Phase,
    pub duration_ms: u64,
    pub timestamp: String,
}

#[derive(Debug, Default, Clone, Copy)]
struct PhaseStats {
    count: u64,
    total_ms: u64,
    max_ms: u64,
}

#[derive(Debug, Default)]
struct MetricsState {
    analyze_requests: u64,
    rewrite_requests: u64,
    word_replacements: u64,
    sentence_rewrites: u64,
    replacement_fallbacks: u64,
    errors: BTreeMap<ErrorCode, u64>,
    phases: BTreeMap<Phase, PhaseStats>,
    recent: VecDeque<LatencyRecord>,
}

/// フェーズ別レイテンシ集計
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhaseLatency {
    pub count: u64,
    pub avg_ms: f64,
    pub max_ms: u64,
}

/// メトリクスサマリー（`/api/metrics` で返す）
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub analyze_requests: u64,
    pub rewrite_requests: u64,
    pub word_replacements: u64,
    pub sentence_rewrites: u64,
    pub replacement_fallbacks: u64,
    /// エラーコードごとの件数
    pub errors: BTreeMap<ErrorCode, u64>,
    pub phase_latency_ms: BTreeMap<Phase, PhaseLatency>,
    /// 新しい順
    pub recent_latencies: Vec<LatencyRecord>,
}

impl MetricsSummary {
    pub fn error_count(&self, code: ErrorCode) -> u64 {
        self.errors.get(&code).copied().unwrap_or(0)
    }

    pub fn latency(&self, phase: Phase) -> Option<&PhaseLatency> {
        self.phase_latency_ms.get(&phase)
    }
}

/// プロセス内メトリクス。平均は全件の累積から求め、個別記録は直近分だけ残す。
#[derive(Default)]
pub struct Metrics {
    state: Mutex<MetricsState>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MetricsState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn inc_analyze_requests(&self) {
        self.state().analyze_requests += 1;
    }

    pub fn inc_rewrite_requests(&self) {
        self.state().rewrite_requests += 1;
    }

    /// `/api/analyze` の成功結果を数える
    pub fn record_outcome(&self, mode: Mode, used_fallback: bool) {
        let mut state = self.state();
        match mode {
            Mode::Word => state.word_replacements += 1,
            Mode::Sentence => state.sentence_rewrites += 1,
        }
        if used_fallback {
            state.replacement_fallbacks += 1;
        }
    }

    pub fn inc_error(&self, code: ErrorCode) {
        *self.state().errors.entry(code).or_default() += 1;
    }

    pub fn record_latency(&self, phase: Phase, duration_ms: u64) {
        let mut state = self.state();

        let stats = state.phases.entry(phase).or_default();
        stats.count += 1;
        stats.total_ms = stats.total_ms.saturating_add(duration_ms);
        stats.max_ms = stats.max_ms.max(duration_ms);

        if state.recent.len() == RECENT_CAPACITY {
            state.recent.pop_front();
        }
        state.recent.push_back(LatencyRecord {
            phase,
            duration_ms,
            timestamp: chrono::Utc::now().to_rfc3339(),
        });
    }

    pub fn record_timings(&self, timings: &[PhaseTiming]) {
        for timing in timings {
            self.record_latency(timing.phase, timing.duration_ms);
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        let state = self.state();

        let phase_latency_ms = state
            .phases
            .iter()
            .map(|(phase, stats)| {
                let latency = PhaseLatency {
                    count: stats.count,
                    avg_ms: stats.total_ms as f64 / stats.count as f64,
                    max_ms: stats.max_ms,
                };
                (*phase, latency)
            })
            .collect();

        MetricsSummary {
            analyze_requests: state.analyze_requests,
            rewrite_requests: state.rewrite_requests,
            word_replacements: state.word_replacements,
            sentence_rewrites: state.sentence_rewrites,
            replacement_fallbacks: state.replacement_fallbacks,
            errors: state.errors.clone(),
            phase_latency_ms,
            recent_latencies: state.recent.iter().rev().cloned().collect(),
        }
    }
}
