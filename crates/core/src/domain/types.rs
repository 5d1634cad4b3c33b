use serde::{Deserialize, Serialize};

use super::error::AppError;

/// 書き換えモード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// ハイライトされた単語を置き換える
    Word,
    /// 文全体を書き直す
    #[default]
    Sentence,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::Sentence => "sentence",
        }
    }

    /// リクエストの mode 文字列を解釈する（未指定なら sentence）
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        match raw {
            None => Ok(Self::default()),
            Some("word") => Ok(Self::Word),
            Some("sentence") => Ok(Self::Sentence),
            Some(other) => Err(AppError::invalid_mode(other)),
        }
    }
}

/// `/api/analyze` の入力
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeInput {
    pub story: String,
    pub highlighted: String,
    pub mode: Option<String>,
}

/// `/api/rewrite` の入力
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteInput {
    pub text: String,
    pub mode: Option<String>,
}

/// 書き換え結果（モードに応じてどちらか一方のみ）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RewriteOutcome {
    WordReplacement(String),
    SentenceRewrite(String),
}

impl RewriteOutcome {
    pub fn text(&self) -> &str {
        match self {
            Self::WordReplacement(text) | Self::SentenceRewrite(text) => text,
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Self::WordReplacement(_) => Mode::Word,
            Self::SentenceRewrite(_) => Mode::Sentence,
        }
    }
}

/// `/api/analyze` のレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzeResponse {
    pub analysis: String,
    #[serde(flatten)]
    pub outcome: RewriteOutcome,
}

/// `/api/rewrite` のレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewriteResponse {
    pub rewrite: String,
}
