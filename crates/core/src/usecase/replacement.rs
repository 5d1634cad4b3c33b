use crate::domain::error::AppError;
use crate::domain::replacement::{
    clean_candidate, Judgment, ReplacementCandidate, ReplacementEvent, ReplacementState,
};
use crate::domain::settings::AppSettings;
use crate::infra::completion::prompts;
use crate::infra::completion::{CompletionClient, GenerationRequest};

/// 置換語バリデータ
///
/// 置換語を生成してモデル自身に適合判定させ、不合格なら短いフレーズを1回だけ試す。
/// フレーズも不合格なら最初の置換語を返す。補完 API のエラーはそのまま呼び出し元へ返す。
pub struct ReplacementValidator<'a> {
    client: &'a dyn CompletionClient,
    settings: &'a AppSettings,
}

impl<'a> ReplacementValidator<'a> {
    pub fn new(client: &'a dyn CompletionClient, settings: &'a AppSettings) -> Self {
        Self { client, settings }
    }

    pub async fn replace(
        &self,
        analysis: &str,
        story: &str,
        highlighted: &str,
    ) -> Result<ReplacementCandidate, AppError> {
        let mut state = ReplacementState::Init;

        loop {
            log::debug!("replacement state: {}", state.as_str());

            let event = match &state {
                ReplacementState::Init => {
                    let prompt = prompts::word_replacement_prompt(analysis, story, highlighted);
                    ReplacementEvent::Generated(self.generate(prompt).await?)
                }
                ReplacementState::ValidateInitial { initial } => {
                    ReplacementEvent::Judged(self.judge(story, highlighted, initial).await?)
                }
                ReplacementState::Fallback { initial } => {
                    log::info!("置換候補 '{initial}' が不合格のため短いフレーズを生成します");
                    let prompt = prompts::short_phrase_prompt(analysis, story, highlighted, initial);
                    ReplacementEvent::Generated(self.generate(prompt).await?)
                }
                ReplacementState::ValidatePhrase { phrase, .. } => {
                    ReplacementEvent::Judged(self.judge(story, highlighted, phrase).await?)
                }
                ReplacementState::Accept(candidate) => return Ok(candidate.clone()),
            };

            state = state.advance(event)?;
        }
    }

    async fn generate(&self, prompt: String) -> Result<String, AppError> {
        let raw = self
            .client
            .complete(&self.request(prompt, prompts::REPLACEMENT_MAX_TOKENS))
            .await?;
        Ok(clean_candidate(&raw))
    }

    async fn judge(&self, story: &str, highlighted: &str, candidate: &str) -> Result<Judgment, AppError> {
        let prompt = prompts::validation_prompt(story, highlighted, candidate);
        let raw = self
            .client
            .complete(&self.request(prompt, prompts::JUDGMENT_MAX_TOKENS))
            .await?;
        let judgment = Judgment::parse(&raw);
        if judgment == Judgment::Unparseable {
            log::debug!("判定出力を解釈できません（INVALID 扱い）: {raw:?}");
        }
        Ok(judgment)
    }

    fn request(&self, prompt: String, max_tokens: u32) -> GenerationRequest {
        GenerationRequest::new(
            prompt,
            self.settings.model.as_str(),
            max_tokens,
            self.settings.temperature,
        )
    }
}
