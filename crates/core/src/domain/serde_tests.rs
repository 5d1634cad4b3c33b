#[cfg(test)]
mod tests {
    use crate::domain::error::{AppError, ErrorCode};
    use crate::domain::replacement::{CandidateSource, Judgment, ReplacementCandidate};
    use crate::domain::types::{
        AnalyzeInput, AnalyzeResponse, Mode, RewriteInput, RewriteOutcome, RewriteResponse,
    };

    #[test]
    fn test_mode_serialization() {
        assert_eq!(serde_json::to_string(&Mode::Word).unwrap(), "\"word\"");
        assert_eq!(
            serde_json::to_string(&Mode::Sentence).unwrap(),
            "\"sentence\""
        );
    }

    #[test]
    fn test_mode_parse() {
        assert_eq!(Mode::parse(None).unwrap(), Mode::Sentence);
        assert_eq!(Mode::parse(Some("word")).unwrap(), Mode::Word);
        assert_eq!(Mode::parse(Some("sentence")).unwrap(), Mode::Sentence);

        let err = Mode::parse(Some("banana")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidMode);
        assert!(err.message.contains("banana"));

        // 大文字は受け付けない
        assert!(Mode::parse(Some("Word")).is_err());
    }

    #[test]
    fn test_analyze_input_defaults_missing_fields() {
        let input: AnalyzeInput = serde_json::from_str(r#"{"story":"The dog."}"#).unwrap();
        assert_eq!(input.story, "The dog.");
        assert!(input.highlighted.is_empty());
        assert!(input.mode.is_none());

        let input: RewriteInput = serde_json::from_str(r#"{"mode":"word"}"#).unwrap();
        assert!(input.text.is_empty());
        assert_eq!(input.mode.as_deref(), Some("word"));
    }

    #[test]
    fn test_analyze_response_word_shape() {
        let resp = AnalyzeResponse {
            analysis: "calm".to_string(),
            outcome: RewriteOutcome::WordReplacement("ancient".to_string()),
        };
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["analysis"], "calm");
        assert_eq!(value["word_replacement"], "ancient");
        assert!(value.get("sentence_rewrite").is_none());
    }

    #[test]
    fn test_analyze_response_sentence_shape() {
        let resp = AnalyzeResponse {
            analysis: "calm".to_string(),
            outcome: RewriteOutcome::SentenceRewrite("He sprinted.".to_string()),
        };
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["sentence_rewrite"], "He sprinted.");
        assert!(value.get("word_replacement").is_none());
        assert_eq!(resp.outcome.mode(), Mode::Sentence);
        assert_eq!(resp.outcome.text(), "He sprinted.");
    }

    #[test]
    fn test_rewrite_response_shape() {
        let json = serde_json::to_string(&RewriteResponse {
            rewrite: "He dashed.".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"rewrite":"He dashed."}"#);
    }

    #[test]
    fn test_error_code_serialization() {
        assert_eq!(
            serde_json::to_string(&ErrorCode::InvalidInput).unwrap(),
            "\"E_INVALID_INPUT\""
        );
        assert_eq!(
            serde_json::to_string(&ErrorCode::Provider).unwrap(),
            "\"E_PROVIDER\""
        );
        assert_eq!(ErrorCode::InvalidMode.as_str(), "E_INVALID_MODE");
        assert!(ErrorCode::InvalidMode.is_client_error());
        assert!(!ErrorCode::Timeout.is_client_error());
    }

    #[test]
    fn test_app_error_serialization() {
        let err = AppError::invalid_input("No input data provided");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("E_INVALID_INPUT"));
        assert!(json.contains("recoverable"));
        assert_eq!(
            err.to_string(),
            "[InvalidInput] No input data provided"
        );
    }

    #[test]
    fn test_candidate_serialization() {
        let c = ReplacementCandidate {
            text: "worn by years".to_string(),
            source: CandidateSource::ShortPhrase,
            valid: true,
        };
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("short_phrase"));
        assert_eq!(
            serde_json::to_string(&Judgment::Unparseable).unwrap(),
            "\"unparseable\""
        );
    }
}
