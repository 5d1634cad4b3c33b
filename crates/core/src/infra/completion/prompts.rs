//! 用途別プロンプトテンプレートと出力トークン上限
use crate::domain::replacement::{INVALID_TOKEN, VALID_TOKEN};
use crate::domain::types::Mode;

/// 文体分析
pub const ANALYSIS_MAX_TOKENS: u32 = 350;
/// 文の書き換え・直接リライト
pub const REWRITE_MAX_TOKENS: u32 = 150;
/// 置換語・短いフレーズの生成
pub const REPLACEMENT_MAX_TOKENS: u32 = 20;
/// VALID / INVALID 判定
pub const JUDGMENT_MAX_TOKENS: u32 = 5;

/// 文体分析プロンプト: 語り口、人物像、リズム、反復モチーフ
pub fn analysis_prompt(text: &str) -> String {
    format!(
        "\
You are a personalized sentence replacement AI for creative writers. Your job is to analyze the following text for:
- Tone and voice [KEY FOCUS], focusing on word choice frequency and grounded qualities.
- Character traits and personalities.
- Cadence, vocabulary style, and unique structures.
- Recurring objects or symbols.

Analyze the text and provide a structured paragraph describing these elements:

'{text}'"
    )
}

/// 初回の置換語生成プロンプト
pub fn word_replacement_prompt(analysis: &str, story: &str, highlighted: &str) -> String {
    format!(
        "\
Based on the analysis provided below:

{analysis}

Here is the full text:

'{story}'

Replace the highlighted word '{highlighted}' with another word that maintains the author's tone, voice, and specific characteristics and fits the surrounding sentence.
Respond with the replacement word only, without quotes or explanation."
    )
}

/// 候補の適合判定プロンプト（VALID / INVALID のみで答えさせる）
pub fn validation_prompt(story: &str, highlighted: &str, candidate: &str) -> String {
    format!(
        "\
Here is the full text:

'{story}'

The word '{highlighted}' is to be replaced with '{candidate}'.
Does '{candidate}' fit grammatically and contextually in place of '{highlighted}' while keeping the author's voice?
Answer with exactly one word: {VALID_TOKEN} or {INVALID_TOKEN}."
    )
}

/// 初回候補が不合格だったときの短いフレーズ生成プロンプト
pub fn short_phrase_prompt(analysis: &str, story: &str, highlighted: &str, rejected: &str) -> String {
    format!(
        "\
Based on the analysis provided below:

{analysis}

Here is the full text:

'{story}'

The replacement '{rejected}' for the highlighted word '{highlighted}' did not fit the context.
Propose a short phrase of 2 to 3 words that can replace '{highlighted}' while preserving the author's tone and voice.
Respond with the phrase only, without quotes or explanation."
    )
}

/// 分析結果を踏まえた文の書き換えプロンプト
pub fn sentence_rewrite_prompt(analysis: &str, sentence: &str) -> String {
    format!(
        "\
Based on the analysis provided below:

{analysis}

Rewrite the following sentence while maintaining the original author's tone and voice.
Keep roughly the same length and make sure it stays coherent with the surrounding story.
Make sure your sentence is distinct from the original. Respond with the rewritten sentence only:

'{sentence}'"
    )
}

/// 分析なしの直接リライトプロンプト
pub fn direct_rewrite_prompt(text: &str, mode: Mode) -> String {
    match mode {
        Mode::Word => format!(
            "\
Replace the word with a suitable alternative. Explain your choice:

'{text}'"
        ),
        Mode::Sentence => format!(
            "\
Rewrite the following sentence. Explain your choices:

'{text}'"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_prompt_contains_text_and_focus() {
        let p = analysis_prompt("The old dog slept by the fire.");
        assert!(p.contains("'The old dog slept by the fire.'"));
        assert!(p.contains("Tone and voice"));
        assert!(p.contains("Recurring objects or symbols"));
    }

    #[test]
    fn test_word_replacement_prompt() {
        let p = word_replacement_prompt("calm, rustic", "The old dog slept.", "old");
        assert!(p.contains("calm, rustic"));
        assert!(p.contains("'The old dog slept.'"));
        assert!(p.contains("'old'"));
    }

    #[test]
    fn test_validation_prompt_asks_for_tokens() {
        let p = validation_prompt("The old dog slept.", "old", "ancient");
        assert!(p.contains("'ancient'"));
        assert!(p.contains("VALID or INVALID"));
    }

    #[test]
    fn test_short_phrase_prompt_mentions_rejected() {
        let p = short_phrase_prompt("a", "The old dog slept.", "old", "ancient");
        assert!(p.contains("'ancient'"));
        assert!(p.contains("2 to 3 words"));
    }

    #[test]
    fn test_sentence_rewrite_prompt() {
        let p = sentence_rewrite_prompt("terse", "He ran fast.");
        assert!(p.contains("terse"));
        assert!(p.ends_with("'He ran fast.'"));
    }

    #[test]
    fn test_direct_rewrite_prompt_per_mode() {
        assert!(direct_rewrite_prompt("fast", Mode::Word).starts_with("Replace the word"));
        assert!(direct_rewrite_prompt("He ran fast.", Mode::Sentence).starts_with("Rewrite the following sentence"));
    }
}
