// API module - HTTP access to the chat backend
pub mod client;

pub use client::{ChatBackend, HttpBackend};
