use async_trait::async_trait;
use heal_assistant::{
    Error, Result,
    llm::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice, LlmClient},
    predict::{Scorer, SymptomReport},
    wizard::PredictionBackend,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Mock LLM client for testing
#[derive(Debug, Default)]
pub struct MockLlmClient {
    pub reply: Option<String>,
    pub error: Option<String>,
    pub requests: Arc<Mutex<Vec<ChatCompletionRequest>>>,
}

impl MockLlmClient {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            ..Self::default()
        }
    }

    pub fn failing(error: &str) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::default()
        }
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn create_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        self.requests.lock().unwrap().push(request);

        if let Some(ref error) = self.error {
            return Err(Error::upstream(error.clone()));
        }

        let choices = self
            .reply
            .iter()
            .map(|reply| Choice {
                index: 0,
                message: ChatMessage::assistant(reply.clone()),
                finish_reason: Some("Stop".to_string()),
            })
            .collect();

        Ok(ChatCompletionResponse {
            id: "chatcmpl-mock".to_string(),
            choices,
        })
    }
}

/// Scorer returning a canned result (or error) and recording what it was given.
#[derive(Debug, Default)]
pub struct StubScorer {
    pub result: Option<Value>,
    pub reports: Arc<Mutex<Vec<SymptomReport>>>,
}

impl StubScorer {
    pub fn returning(result: Value) -> Self {
        Self {
            result: Some(result),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn get_reports(&self) -> Vec<SymptomReport> {
        self.reports.lock().unwrap().clone()
    }
}

#[async_trait]
impl Scorer for StubScorer {
    async fn score(&self, report: &SymptomReport) -> Result<Value> {
        self.reports.lock().unwrap().push(report.clone());
        self.result
            .clone()
            .ok_or_else(|| Error::prediction_process("scorer exited with exit status: 1"))
    }
}

#[async_trait]
impl PredictionBackend for StubScorer {
    async fn predict(&self, report: &SymptomReport) -> Result<Value> {
        self.score(report).await
    }
}
