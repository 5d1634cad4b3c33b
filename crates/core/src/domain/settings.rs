use serde::{Deserialize, Serialize};

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_API_BASE: &str = "OPENAI_API_BASE";
pub const ENV_MODEL: &str = "STORYVOICE_MODEL";
pub const ENV_TEMPERATURE: &str = "STORYVOICE_TEMPERATURE";
pub const ENV_TIMEOUT_SECS: &str = "STORYVOICE_TIMEOUT_SECS";
pub const ENV_HOST: &str = "STORYVOICE_HOST";
pub const ENV_PORT: &str = "STORYVOICE_PORT";

/// アプリケーション設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// 補完 API キー（未設定なら noop クライアントで起動）
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// OpenAI 互換 API のベース URL
    pub api_base: String,
    /// 使用モデル
    pub model: String,
    /// サンプリング温度 (0.0–1.0)
    pub temperature: f32,
    /// 補完 API のタイムアウト秒数
    pub timeout_secs: u64,
    /// 待ち受けホスト
    pub host: String,
    /// 待ち受けポート
    pub port: u16,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.7,
            timeout_secs: 30,
            host: "127.0.0.1".to_string(),
            port: 5001,
        }
    }
}

impl AppSettings {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意のキー参照関数から設定を組み立てる。解釈できない値はデフォルトのまま。
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        settings.api_key = get(ENV_API_KEY);
        if let Some(base) = get(ENV_API_BASE) {
            settings.api_base = base;
        }
        if let Some(model) = get(ENV_MODEL) {
            settings.model = model;
        }
        if let Some(host) = get(ENV_HOST) {
            settings.host = host;
        }
        if let Some(raw) = get(ENV_TEMPERATURE) {
            match raw.parse::<f32>() {
                Ok(t) if t.is_finite() => settings.temperature = t.clamp(0.0, 1.0),
                _ => log::warn!("{ENV_TEMPERATURE}={raw} を解釈できません。デフォルト値を使用します"),
            }
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => settings.timeout_secs = secs,
                _ => log::warn!("{ENV_TIMEOUT_SECS}={raw} を解釈できません。デフォルト値を使用します"),
            }
        }
        if let Some(raw) = get(ENV_PORT) {
            match raw.parse::<u16>() {
                Ok(port) => settings.port = port,
                Err(_) => log::warn!("{ENV_PORT}={raw} を解釈できません。デフォルト値を使用します"),
            }
        }

        settings
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
