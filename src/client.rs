//! Typed HTTP client for the relay endpoints, used by the chat and intake
//! front-end models.

use crate::{
    Error, Result,
    predict::SymptomReport,
    server::types::{ChatRequest, ChatResponse, ErrorResponse, HealthResponse},
};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct RelayClient {
    http: Client,
    base_url: String,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        let response = self.http.get(self.url("/health")).send().await?;
        decode(response).await
    }

    pub async fn chat(&self, message: &str) -> Result<String> {
        let response = self
            .http
            .post(self.url("/api/chat"))
            .json(&ChatRequest {
                message: message.to_string(),
            })
            .send()
            .await?;
        let body: ChatResponse = decode(response).await?;
        Ok(body.reply)
    }

    pub async fn predict(&self, report: &SymptomReport) -> Result<Value> {
        let response = self
            .http
            .post(self.url("/api/predict"))
            .json(report)
            .send()
            .await?;
        decode(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    debug!("Relay responded with {}", status);

    if status.is_success() {
        return Ok(response.json().await?);
    }

    let text = response.text().await?;
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .map(|e| e.error)
        .unwrap_or(text);
    Err(Error::Relay {
        status: status.as_u16(),
        message,
    })
}
