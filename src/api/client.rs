use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::models::{ChatReply, ChatRequest, FeedbackRequest, HistoryEntry};

/// Backend operations consumed by the chat session. The session only ever has
/// one request outstanding, interprets no failure causes, and retries nothing;
/// errors come back as-is and the session decides what the user sees.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// One chat round trip: user text in, bot reply (and possibly a freshly
    /// issued conversation id) out.
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatReply>;

    /// Fetch the server's canonical history for a conversation.
    async fn fetch_history(&self, conversation_id: &str) -> Result<Vec<HistoryEntry>>;

    /// Mark a conversation as complete on the server. The acknowledgment body
    /// is ignored.
    async fn finalize(&self, conversation_id: &str) -> Result<()>;

    /// Deliver a feedback/human-handoff request.
    async fn send_feedback(&self, feedback: &FeedbackRequest) -> Result<()>;
}

/// `ChatBackend` over plain JSON/HTTP against a configured base URL.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatReply> {
        let url = format!("{}/api/chat", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await?
            .error_for_status()?;

        let response_text = response.text().await?;
        serde_json::from_str(&response_text)
            .with_context(|| format!("Failed to parse chat reply: {}", response_text))
    }

    async fn fetch_history(&self, conversation_id: &str) -> Result<Vec<HistoryEntry>> {
        let url = format!("{}/api/conversations/{}", self.base_url, conversation_id);
        let response = self.client.get(&url).send().await?.error_for_status()?;

        let response_text = response.text().await?;
        serde_json::from_str(&response_text)
            .with_context(|| format!("Failed to parse conversation history: {}", response_text))
    }

    async fn finalize(&self, conversation_id: &str) -> Result<()> {
        let url = format!(
            "{}/api/conversations/{}/finalize",
            self.base_url, conversation_id
        );
        self.client.post(&url).send().await?.error_for_status()?;
        Ok(())
    }

    async fn send_feedback(&self, feedback: &FeedbackRequest) -> Result<()> {
        let url = format!("{}/api/feedback", self.base_url);
        self.client
            .post(&url)
            .json(feedback)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
