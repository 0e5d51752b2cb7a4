use clap::Parser;
use std::path::PathBuf;

use crate::config::DEFAULT_API_URL;

/// CLI arguments for deskchat
#[derive(Parser)]
#[command(name = "deskchat")]
#[command(about = "Deskchat - terminal client for the support-desk chat backend")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Send a single message, print the reply and exit. Omit for interactive
    /// chat.
    #[arg(value_name = "MESSAGE")]
    pub message: Option<String>,

    /// Base URL of the chat backend (e.g., http://localhost:5000)
    #[arg(long, value_name = "URL", env = "DESKCHAT_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Directory for the conversation snapshot and transcript logs
    /// (default: .deskchat in the current directory)
    #[arg(long, value_name = "PATH", env = "DESKCHAT_STATE_DIR")]
    pub state_dir: Option<PathBuf>,

    /// Discard the saved conversation and start fresh
    #[arg(long)]
    pub fresh: bool,

    /// Disable the JSONL transcript log
    #[arg(long)]
    pub no_log: bool,

    /// Enable verbose debug output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;
    use std::path::PathBuf;

    // Helper function to parse CLI args from a string slice
    fn parse_cli_from_args(args: &[&str]) -> Result<Cli, clap::Error> {
        let mut cli_args = vec!["deskchat"];
        cli_args.extend(args);

        Cli::try_parse_from(cli_args)
    }

    #[test]
    fn test_default_cli_parsing() -> Result<(), Box<dyn std::error::Error>> {
        let cli = parse_cli_from_args(&[])?;

        assert!(cli.message.is_none());
        assert!(cli.state_dir.is_none());
        assert!(!cli.fresh);
        assert!(!cli.no_log);
        assert!(!cli.verbose);

        Ok(())
    }

    #[test]
    fn test_one_shot_message() -> Result<(), Box<dyn std::error::Error>> {
        let cli = parse_cli_from_args(&["where is my order?"])?;

        assert_eq!(cli.message.as_deref(), Some("where is my order?"));

        Ok(())
    }

    #[test]
    fn test_api_url_flag() -> Result<(), Box<dyn std::error::Error>> {
        let cli = parse_cli_from_args(&["--api-url", "http://localhost:8000"])?;

        assert_eq!(cli.api_url, "http://localhost:8000");

        Ok(())
    }

    #[test]
    fn test_state_dir_flag() -> Result<(), Box<dyn std::error::Error>> {
        let cli = parse_cli_from_args(&["--state-dir", "/tmp/deskchat-state"])?;

        assert_eq!(cli.state_dir, Some(PathBuf::from("/tmp/deskchat-state")));

        Ok(())
    }

    #[test]
    fn test_fresh_flag() -> Result<(), Box<dyn std::error::Error>> {
        let cli = parse_cli_from_args(&["--fresh"])?;

        assert!(cli.fresh);

        Ok(())
    }

    #[test]
    fn test_no_log_flag() -> Result<(), Box<dyn std::error::Error>> {
        let cli = parse_cli_from_args(&["--no-log"])?;

        assert!(cli.no_log);

        Ok(())
    }

    #[test]
    fn test_short_verbose_flag() -> Result<(), Box<dyn std::error::Error>> {
        let cli = parse_cli_from_args(&["-v"])?;

        assert!(cli.verbose);

        Ok(())
    }
}
