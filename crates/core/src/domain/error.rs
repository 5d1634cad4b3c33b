use serde::Serialize;

/// アプリケーション共通エラーコード
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ErrorCode {
    #[serde(rename = "E_INVALID_INPUT")]
    InvalidInput,
    #[serde(rename = "E_INVALID_MODE")]
    InvalidMode,
    #[serde(rename = "E_PROVIDER")]
    Provider,
    #[serde(rename = "E_TIMEOUT")]
    Timeout,
    #[serde(rename = "E_INTERNAL")]
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "E_INVALID_INPUT",
            Self::InvalidMode => "E_INVALID_MODE",
            Self::Provider => "E_PROVIDER",
            Self::Timeout => "E_TIMEOUT",
            Self::Internal => "E_INTERNAL",
        }
    }

    /// 呼び出し側の入力に起因するエラーか
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput | Self::InvalidMode)
    }
}

/// アプリケーションエラー（HTTP レスポンス兼用）
#[derive(Debug, Clone, Serialize)]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub recoverable: bool,
}

impl AppError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::InvalidInput,
            message: msg.into(),
            recoverable: true,
        }
    }

    pub fn invalid_mode(mode: &str) -> Self {
        Self {
            code: ErrorCode::InvalidMode,
            message: format!("Invalid mode: {mode}"),
            recoverable: true,
        }
    }

    pub fn provider(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Provider,
            message: msg.into(),
            recoverable: false,
        }
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Timeout,
            message: msg.into(),
            recoverable: true,
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::Internal,
            message: msg.into(),
            recoverable: false,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}
