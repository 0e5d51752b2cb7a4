// Models module - transcript and wire data structures
pub mod types;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use types::{Message, Sender};
pub use requests::{ChatRequest, FeedbackRequest};
pub use responses::{ChatReply, HistoryEntry};
