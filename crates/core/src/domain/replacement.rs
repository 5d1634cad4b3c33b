use serde::Serialize;

use super::error::AppError;

/// 検証判定の合格トークン
pub const VALID_TOKEN: &str = "VALID";
/// 検証判定の不合格トークン
pub const INVALID_TOKEN: &str = "INVALID";

/// 候補に対するモデルの検証判定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Judgment {
    Valid,
    Invalid,
    /// VALID / INVALID のどちらでもない出力。Invalid と同じ扱い。
    Unparseable,
}

impl Judgment {
    /// トリム後の完全一致のみで判定する（小文字や説明付きは Unparseable）
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            VALID_TOKEN => Self::Valid,
            INVALID_TOKEN => Self::Invalid,
            _ => Self::Unparseable,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// 候補の出どころ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    /// 最初に生成した置換語
    Initial,
    /// 初回が不合格だったときの短いフレーズ (2–3語)
    ShortPhrase,
}

/// 置換候補
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplacementCandidate {
    pub text: String,
    pub source: CandidateSource,
    /// 検証判定で VALID を得たか
    pub valid: bool,
}

impl ReplacementCandidate {
    /// 初回候補をそのまま採用しなかった（フォールバックに入った）か
    pub fn used_fallback(&self) -> bool {
        !(self.source == CandidateSource::Initial && self.valid)
    }
}

/// 置換状態機械への入力
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplacementEvent {
    /// 生成呼び出しの結果（整形済み）
    Generated(String),
    /// 検証呼び出しの結果
    Judged(Judgment),
}

/// 置換状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplacementState {
    Init,
    ValidateInitial {
        initial: String,
    },
    Fallback {
        initial: String,
    },
    ValidatePhrase {
        initial: String,
        phrase: String,
    },
    Accept(ReplacementCandidate),
}

impl ReplacementState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Init => "init",
            Self::ValidateInitial { .. } => "validate_initial",
            Self::Fallback { .. } => "fallback",
            Self::ValidatePhrase { .. } => "validate_phrase",
            Self::Accept(_) => "accept",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Accept(_))
    }

    /// 状態遷移
    ///
    /// - Init + Generated → ValidateInitial（空の候補はエラー）
    /// - ValidateInitial + Judged(Valid) → Accept(initial)
    /// - ValidateInitial + Judged(その他) → Fallback
    /// - Fallback + Generated → ValidatePhrase（空のフレーズなら Accept(initial)）
    /// - ValidatePhrase + Judged(Valid) → Accept(phrase)
    /// - ValidatePhrase + Judged(その他) → Accept(initial)
    pub fn advance(self, event: ReplacementEvent) -> Result<Self, AppError> {
        match (self, event) {
            (Self::Init, ReplacementEvent::Generated(text)) => {
                if text.is_empty() {
                    return Err(AppError::provider("Empty replacement from completion API"));
                }
                Ok(Self::ValidateInitial { initial: text })
            }
            (Self::ValidateInitial { initial }, ReplacementEvent::Judged(judgment)) => {
                if judgment.is_valid() {
                    Ok(Self::Accept(ReplacementCandidate {
                        text: initial,
                        source: CandidateSource::Initial,
                        valid: true,
                    }))
                } else {
                    Ok(Self::Fallback { initial })
                }
            }
            (Self::Fallback { initial }, ReplacementEvent::Generated(phrase)) => {
                if phrase.is_empty() {
                    return Ok(Self::Accept(ReplacementCandidate {
                        text: initial,
                        source: CandidateSource::Initial,
                        valid: false,
                    }));
                }
                Ok(Self::ValidatePhrase { initial, phrase })
            }
            (Self::ValidatePhrase { initial, phrase }, ReplacementEvent::Judged(judgment)) => {
                if judgment.is_valid() {
                    Ok(Self::Accept(ReplacementCandidate {
                        text: phrase,
                        source: CandidateSource::ShortPhrase,
                        valid: true,
                    }))
                } else {
                    Ok(Self::Accept(ReplacementCandidate {
                        text: initial,
                        source: CandidateSource::Initial,
                        valid: false,
                    }))
                }
            }
            (state, event) => Err(AppError::internal(format!(
                "{:?} は {} 状態では処理できません",
                event,
                state.as_str()
            ))),
        }
    }
}

/// モデル出力から候補テキストを取り出す: 前後の空白と引用符を除去
pub fn clean_candidate(raw: &str) -> String {
    const QUOTES: &[char] = &['"', '\'', '`', '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}'];
    raw.trim().trim_matches(QUOTES).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::ErrorCode;

    fn generated(s: &str) -> ReplacementEvent {
        ReplacementEvent::Generated(s.to_string())
    }

    fn judged(raw: &str) -> ReplacementEvent {
        ReplacementEvent::Judged(Judgment::parse(raw))
    }

    #[test]
    fn test_judgment_exact_match_only() {
        assert_eq!(Judgment::parse("VALID"), Judgment::Valid);
        assert_eq!(Judgment::parse("  VALID\n"), Judgment::Valid);
        assert_eq!(Judgment::parse("INVALID"), Judgment::Invalid);
        assert_eq!(Judgment::parse("valid"), Judgment::Unparseable);
        assert_eq!(Judgment::parse("VALID."), Judgment::Unparseable);
        assert_eq!(Judgment::parse("VALID - it fits"), Judgment::Unparseable);
        assert_eq!(Judgment::parse(""), Judgment::Unparseable);
        assert!(!Judgment::Unparseable.is_valid());
        assert!(!Judgment::Invalid.is_valid());
    }

    #[test]
    fn test_accept_initial_on_first_valid() {
        let state = ReplacementState::Init
            .advance(generated("ancient"))
            .unwrap()
            .advance(judged("VALID"))
            .unwrap();

        match state {
            ReplacementState::Accept(c) => {
                assert_eq!(c.text, "ancient");
                assert_eq!(c.source, CandidateSource::Initial);
                assert!(c.valid);
                assert!(!c.used_fallback());
            }
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[test]
    fn test_fallback_phrase_accepted() {
        let state = ReplacementState::Init
            .advance(generated("ancient"))
            .unwrap()
            .advance(judged("INVALID"))
            .unwrap();
        assert_eq!(state.as_str(), "fallback");

        let state = state
            .advance(generated("worn by years"))
            .unwrap()
            .advance(judged("VALID"))
            .unwrap();
        match state {
            ReplacementState::Accept(c) => {
                assert_eq!(c.text, "worn by years");
                assert_eq!(c.source, CandidateSource::ShortPhrase);
                assert!(c.used_fallback());
            }
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[test]
    fn test_both_rejected_returns_initial() {
        let state = ReplacementState::Init
            .advance(generated("ancient"))
            .unwrap()
            .advance(judged("nope"))
            .unwrap()
            .advance(generated("worn by years"))
            .unwrap()
            .advance(judged("valid"))
            .unwrap();
        assert!(state.is_terminal());
        match state {
            ReplacementState::Accept(c) => {
                assert_eq!(c.text, "ancient");
                assert_eq!(c.source, CandidateSource::Initial);
                assert!(!c.valid);
            }
            other => panic!("unexpected state: {other:?}"),
        }
    }

    #[test]
    fn test_empty_initial_is_provider_error() {
        let err = ReplacementState::Init.advance(generated("")).unwrap_err();
        assert_eq!(err.code, ErrorCode::Provider);
    }

    #[test]
    fn test_empty_phrase_accepts_initial() {
        let state = ReplacementState::Fallback {
            initial: "ancient".to_string(),
        }
        .advance(generated(""))
        .unwrap();
        assert_eq!(
            state,
            ReplacementState::Accept(ReplacementCandidate {
                text: "ancient".to_string(),
                source: CandidateSource::Initial,
                valid: false,
            })
        );
    }

    #[test]
    fn test_out_of_order_event_rejected() {
        let err = ReplacementState::Init.advance(judged("VALID")).unwrap_err();
        assert_eq!(err.code, ErrorCode::Internal);

        let accepted = ReplacementState::Accept(ReplacementCandidate {
            text: "x".to_string(),
            source: CandidateSource::Initial,
            valid: true,
        });
        assert!(accepted.advance(generated("y")).is_err());
    }

    #[test]
    fn test_clean_candidate() {
        assert_eq!(clean_candidate("  ancient \n"), "ancient");
        assert_eq!(clean_candidate("\"ancient\""), "ancient");
        assert_eq!(clean_candidate("\u{201C}worn by years\u{201D}"), "worn by years");
        assert_eq!(clean_candidate("'grizzled'"), "grizzled");
        assert_eq!(clean_candidate("\"  \""), "");
    }
}
