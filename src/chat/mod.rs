// Chat module - message store, snapshot persistence, and session handling
pub mod store;
pub mod persist;
pub mod session;

// Re-export commonly used items
pub use store::MessageStore;
pub use persist::SnapshotStore;
pub use session::{ChatSession, SessionError, APOLOGY_MESSAGE};
