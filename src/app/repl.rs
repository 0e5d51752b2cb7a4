use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::chat::{ChatSession, SessionError};
use crate::config::ClientConfig;
use crate::models::{Message, Sender};

// Hidden instructions behind the /lang toggle. They are sent to the backend
// but never shown as user messages.
const LANG_INSTRUCTION_EN: &str = "Please answer in English from now on.";
const LANG_INSTRUCTION_DE: &str = "Bitte antworte ab jetzt auf Deutsch.";

/// Run interactive REPL mode
pub async fn run_repl_mode(config: &ClientConfig, mut session: ChatSession) -> Result<()> {
    println!("{}", "💬 Deskchat - support chat".bright_cyan().bold());
    println!(
        "{}",
        format!("Backend: {}", config.api_url).bright_black()
    );
    if let Some(logger) = &session.logger {
        println!(
            "{}",
            format!("Transcript log: {}", logger.path().display()).bright_black()
        );
    }
    println!(
        "{}",
        "Type 'exit' or 'quit' to leave, or '/help' for commands\n".bright_black()
    );

    if !session.messages().is_empty() {
        println!(
            "{} {}",
            "📜".bright_cyan(),
            format!(
                "Restored {} messages from the previous session",
                session.messages().len()
            )
            .bright_black()
        );
        print_transcript(session.messages());
    }

    let mut rl = DefaultEditor::new()?;

    loop {
        let readline = rl.readline(&format!("{} ", "You:".bright_green().bold()));

        match readline {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                if line == "exit" || line == "quit" {
                    println!("{}", "Goodbye!".bright_cyan());
                    break;
                }

                rl.add_history_entry(line)?;

                if let Some(command) = line.strip_prefix('/') {
                    handle_command(command, &mut session).await;
                    continue;
                }

                match session.send(line).await {
                    Ok(reply) => {
                        println!("\n{} {}\n", "Bot:".bright_blue().bold(), reply.content);
                    }
                    Err(SessionError::Busy) => {
                        println!(
                            "{}",
                            "⏳ Still waiting for the previous reply...".yellow()
                        );
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "^C".bright_black());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_cyan());
                break;
            }
            Err(err) => {
                eprintln!("{} {}", "Error:".bright_red().bold(), err);
                break;
            }
        }
    }

    if let Some(logger) = session.logger.as_mut() {
        logger.shutdown().await;
    }

    Ok(())
}

/// Send a single message, print the reply and exit.
pub async fn run_one_shot(mut session: ChatSession, message: &str) -> Result<()> {
    match session.send(message).await {
        Ok(reply) => println!("{}", reply.content),
        Err(SessionError::Busy) => unreachable!("one-shot mode sends exactly once"),
    }

    if let Some(logger) = session.logger.as_mut() {
        logger.shutdown().await;
    }

    Ok(())
}

async fn handle_command(command: &str, session: &mut ChatSession) {
    let mut parts = command.splitn(2, ' ');
    let name = parts.next().unwrap_or_default();
    let argument = parts.next().map(str::trim).unwrap_or_default();

    match name {
        "reset" => {
            session.reset();
            println!("{}", "🧹 Conversation cleared.".bright_black());
        }
        "lang" => {
            let instruction = match argument {
                "en" => LANG_INSTRUCTION_EN,
                "de" => LANG_INSTRUCTION_DE,
                _ => {
                    println!("{}", "Usage: /lang <en|de>".yellow());
                    return;
                }
            };
            match session.set_language(instruction).await {
                Some(confirmation) => {
                    println!("\n{} {}\n", "Bot:".bright_blue().bold(), confirmation.content);
                }
                None => {
                    println!(
                        "{}",
                        "⚠️ Could not reach the backend; language unchanged.".yellow()
                    );
                }
            }
        }
        "sync" => {
            session.sync_with_server().await;
            print_transcript(session.messages());
        }
        "agent" => {
            if argument.is_empty() {
                println!("{}", "Usage: /agent <email>".yellow());
                return;
            }
            match session.request_human_agent(argument).await {
                Ok(()) => println!(
                    "{}",
                    "🙋 Request sent - a human agent will reach out by email.".green()
                ),
                Err(e) => {
                    eprintln!("Human agent request failed: {}", e);
                    println!(
                        "{}",
                        "⚠️ Could not send the request right now; please try again later."
                            .yellow()
                    );
                }
            }
        }
        "history" => {
            print_transcript(session.messages());
        }
        "help" => {
            println!("{}", "Commands:".bright_black());
            println!("{}", "  /reset          clear the conversation".bright_black());
            println!("{}", "  /lang <en|de>   switch the response language".bright_black());
            println!("{}", "  /sync           reload the conversation from the server".bright_black());
            println!("{}", "  /agent <email>  ask for a human agent".bright_black());
            println!("{}", "  /history        reprint the transcript".bright_black());
        }
        _ => {
            println!(
                "{}",
                format!("Unknown command '/{}'; try /help", name).yellow()
            );
        }
    }
}

fn print_transcript(messages: &[Message]) {
    if messages.is_empty() {
        println!("{}", "(no messages yet)".bright_black());
        return;
    }
    for message in messages {
        let label = match message.sender {
            Sender::User => "You:".bright_green().bold(),
            Sender::Bot => "Bot:".bright_blue().bold(),
        };
        println!(
            "{} {} {}",
            message
                .timestamp
                .format("%H:%M:%S")
                .to_string()
                .bright_black(),
            label,
            message.content
        );
    }
    println!();
}
