use anyhow::Result;
use std::path::PathBuf;

use crate::cli::Cli;

/// Default backend base URL when neither the flag nor DESKCHAT_API_URL is set.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Name of the per-project state directory (snapshot + transcript logs).
pub const DEFAULT_STATE_DIR: &str = ".deskchat";

/// Configuration for the deskchat client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the chat backend, without a trailing slash.
    pub api_url: String,
    /// Directory holding the conversation snapshot and transcript logs.
    pub state_dir: PathBuf,
    /// Write a JSONL transcript log under the state directory.
    pub log_transcript: bool,
    /// Verbose debug output.
    pub verbose: bool,
}

/// Normalize the backend base URL so endpoint paths can be appended blindly.
pub fn normalize_base_url(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

impl ClientConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let state_dir = match &cli.state_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?.join(DEFAULT_STATE_DIR),
        };

        Ok(Self {
            api_url: normalize_base_url(&cli.api_url),
            state_dir,
            log_transcript: !cli.no_log,
            verbose: cli.verbose,
        })
    }
}
