use crate::{Result, client::RelayClient};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const FALLBACK_REPLY: &str = "Sorry, something went wrong. Please try again later.";

/// Anything that can answer a chat message on behalf of the session.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn chat(&self, message: &str) -> Result<String>;
}

#[async_trait]
impl ChatBackend for RelayClient {
    async fn chat(&self, message: &str) -> Result<String> {
        RelayClient::chat(self, message).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatEntry {
    pub id: u64,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Append-only conversation log behind the chat screen.
#[derive(Debug, Default)]
pub struct ChatSession {
    entries: Vec<ChatEntry>,
    next_id: u64,
    busy: bool,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.entries
    }

    /// True while a message is in flight; the input stays disabled.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Sends `text` and records both sides of the exchange. Blank input and
    /// input arriving while busy are ignored; returns whether anything was sent.
    pub async fn send(&mut self, text: &str, backend: &dyn ChatBackend) -> bool {
        if self.busy || text.trim().is_empty() {
            return false;
        }

        self.push(Sender::User, text.to_string());
        self.busy = true;

        let reply = match backend.chat(text).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Chat request failed: {}", e);
                FALLBACK_REPLY.to_string()
            }
        };

        self.push(Sender::Bot, reply);
        self.busy = false;
        true
    }

    fn push(&mut self, sender: Sender, text: String) {
        self.next_id += 1;
        self.entries.push(ChatEntry {
            id: self.next_id,
            sender,
            text,
            timestamp: Utc::now(),
        });
    }
}
