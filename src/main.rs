use anyhow::Result;
use clap::Parser;
use std::sync::Arc;

use deskchat::app::{run_one_shot, run_repl_mode};
use deskchat::{ChatBackend, ChatSession, Cli, ClientConfig, ConversationLogger, HttpBackend, SnapshotStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = ClientConfig::from_cli(&cli)?;

    if config.verbose {
        eprintln!("Backend base URL: {}", config.api_url);
        eprintln!("State directory: {}", config.state_dir.display());
    }

    let backend: Arc<dyn ChatBackend> = Arc::new(HttpBackend::new(config.api_url.clone()));
    let snapshots = SnapshotStore::new(&config.state_dir);
    let mut session = ChatSession::new(backend, snapshots);

    if cli.fresh {
        // Drops whatever snapshot is on disk; nothing was restored, so there
        // is no conversation to finalize.
        session.reset();
    } else {
        session.restore();
    }

    if config.log_transcript {
        session.logger = match ConversationLogger::new(&config.state_dir).await {
            Ok(logger) => Some(logger),
            Err(e) => {
                eprintln!("Logging disabled: {}", e);
                None
            }
        };
    }

    match &cli.message {
        Some(message) => run_one_shot(session, message).await,
        None => run_repl_mode(&config, session).await,
    }
}
