//! `gamechat ask`: Single-question or interactive chat mode.

use gamechat_agent::RESET_MESSAGE;
use gamechat_core::message::Conversation;
use std::io::Write;
use std::path::Path;
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn run(config_path: Option<&Path>, message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config(config_path)?;

    // Check for API key early: give a clear error
    if !config.has_api_key() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables (or put it in .env):");
        eprintln!("    OPENAI_API_KEY   = 'sk-...'");
        eprintln!("    GAMECHAT_API_KEY = 'sk-...'   (takes precedence)");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", gamechat_config::AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let state = gamechat_gateway::build_state(&config).await?;
    let orchestrator = &state.orchestrator;
    let mut conv = Conversation::new();

    if let Some(msg) = message {
        // Single message mode
        eprint!("  Thinking...");
        let outcome = orchestrator.handle(&msg, &mut conv).await;
        eprint!("\r              \r");
        println!("{}", outcome?.answer);
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  GameChat Interactive Mode");
    println!();
    println!("  Provider:  {}", config.default_provider);
    println!("  Model:     {}", orchestrator.model());
    println!("  Dataset:   {} rows, {} columns", state.rows, orchestrator.summaries().len());
    println!();
    println!("  Type your question and press Enter.");
    println!("  Type 'reset' to forget the conversation, 'exit' or Ctrl+C to quit.");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print!("  You > ");
    std::io::stdout().flush()?;

    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        match input {
            "exit" | "quit" => break,
            "reset" => {
                conv = Conversation::new();
                println!("  {RESET_MESSAGE}\n");
            }
            "" => {}
            _ => {
                eprint!("  ...");
                match orchestrator.handle(input, &mut conv).await {
                    Ok(outcome) => {
                        eprint!("\r     \r");
                        println!();
                        for line in outcome.answer.lines() {
                            println!("  Assistant > {line}");
                        }
                        println!();
                    }
                    Err(e) => {
                        eprint!("\r     \r");
                        eprintln!("  [Error] {e}");
                        println!();
                    }
                }
            }
        }

        print!("  You > ");
        std::io::stdout().flush()?;
    }

    println!();
    println!("  Goodbye! 👋");
    println!();

    Ok(())
}
