use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reply body from `POST /api/chat`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatReply {
    pub message: String,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

/// One entry of the canonical history from `GET /api/conversations/{id}`.
/// `id` is the server's ordering key; local message ids are minted fresh when
/// the history is adopted.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryEntry {
    pub id: u64,
    pub role: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}
