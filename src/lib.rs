pub mod api;
pub mod app;
pub mod chat;
pub mod cli;
pub mod config;
pub mod logging;
pub mod models;

// Re-export the main surface
pub use api::{ChatBackend, HttpBackend};
pub use chat::{ChatSession, MessageStore, SessionError, SnapshotStore, APOLOGY_MESSAGE};
pub use cli::Cli;
pub use config::{normalize_base_url, ClientConfig};
pub use logging::ConversationLogger;
pub use models::{Message, Sender};
