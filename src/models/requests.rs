use serde::{Deserialize, Serialize};

/// Body for `POST /api/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finalize_previous: Option<bool>,
}

/// Body for `POST /api/feedback`, used by the human-agent handoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub email: String,
    pub message: String,
}
