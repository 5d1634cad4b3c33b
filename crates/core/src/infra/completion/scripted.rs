use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::{CompletionClient, CompletionError, GenerationRequest};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// ScriptedCompletionClient: 登録順に応答を返し、受け取ったリクエストを記録するテストダブル。
pub struct ScriptedCompletionClient {
    responses: Mutex<VecDeque<Result<String, CompletionError>>>,
    calls: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedCompletionClient {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// 成功応答を順に登録したクライアントを作る
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let client = Self::new();
        for r in responses {
            client.push_ok(r);
        }
        client
    }

    pub fn push_ok(&self, text: impl Into<String>) {
        lock(&self.responses).push_back(Ok(text.into()));
    }

    pub fn push_err(&self, err: CompletionError) {
        lock(&self.responses).push_back(Err(err));
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// 記録済みリクエストのクローン
    pub fn calls(&self) -> Vec<GenerationRequest> {
        lock(&self.calls).clone()
    }

    pub fn remaining(&self) -> usize {
        lock(&self.responses).len()
    }
}

impl Default for ScriptedCompletionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionClient for ScriptedCompletionClient {
    async fn complete(&self, request: &GenerationRequest) -> Result<String, CompletionError> {
        lock(&self.calls).push(request.clone());
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Err(CompletionError::NotAvailable("script exhausted".to_string())))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
