use clap::Parser;
use colored::*;
use firebox::chat::{ChatMessage, ChatRole};
use firebox::client::FireboxAI;
use firebox::config::{FireboxConfig, API_KEY_ENV};
use firebox::session::{CycleOutcome, InputEvent, Session};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use spinners::{Spinner, Spinners};
use std::fs;
use std::path::Path;

/// Command line arguments for the Firebox CLI
#[derive(Parser)]
#[clap(
    name = "firebox",
    about = "Interactive CLI for the Firebox AI assistant"
)]
struct CliArgs {
    /// API key for the Gemini endpoint (falls back to GEMINI_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Model name to use
    #[arg(long)]
    model: Option<String>,

    /// Maximum tokens in the response
    #[arg(long)]
    max_tokens: Option<u32>,

    /// Disable the response refinement pass
    #[arg(long)]
    no_refine: bool,
}

/// Prints one transcript message with its role tag
fn render_message(message: &ChatMessage) {
    let tag = match message.role {
        ChatRole::User => "> You:".bright_cyan(),
        ChatRole::Assistant => "> Firebox:".bright_green(),
    };
    println!("{} {}", tag, message.content);
}

/// Re-renders the full transcript in chronological order
fn render_transcript(session: &Session) {
    if session.transcript().is_empty() {
        println!("{}", "(no messages yet)".bright_black());
        return;
    }
    for message in session.transcript() {
        render_message(message);
    }
}

/// Resolves startup configuration from flags and the environment.
///
/// An absent or invalid credential is a startup fault: it is logged and
/// surfaced, and the process halts.
fn resolve_config(args: &CliArgs) -> FireboxConfig {
    let config = match args.api_key.clone() {
        Some(key) => FireboxConfig::new(key),
        None => FireboxConfig::from_env(),
    };

    let mut config = match config {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            eprintln!(
                "{} {} Set {} or pass --api-key.",
                "Error:".bright_red(),
                e,
                API_KEY_ENV
            );
            std::process::exit(1);
        }
    };

    if let Some(model) = args.model.clone() {
        config = config.model(model);
    }
    if let Some(max_tokens) = args.max_tokens {
        config = config.max_output_tokens(max_tokens);
    }
    config
}

/// Runs one interaction cycle and renders its outcome
async fn run_cycle(session: &mut Session, ai: &FireboxAI, event: InputEvent) {
    let mut sp = Spinner::new(
        Spinners::Dots12,
        "Generating response...".bright_magenta().to_string(),
    );
    let outcome = session.step(ai, event).await;
    sp.stop();
    print!("\r\x1B[K");

    match outcome {
        CycleOutcome::Exchanged { user, assistant } => {
            render_message(&user);
            render_message(&assistant);
        }
        CycleOutcome::Rejected { warning } => {
            println!("{} {}", "!".bright_yellow(), warning);
        }
    }
    println!("{}", "─".repeat(50).bright_black());
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    firebox::init_logging();
    let args = CliArgs::parse();

    let config = resolve_config(&args);
    let model = config.model.clone();
    let ai = FireboxAI::new(config);
    let mut session = Session::new(!args.no_refine);

    println!("{}", "🔥 Firebox AI Assistant".bright_cyan());
    println!("Model: {}", model.bright_green());
    println!(
        "{}",
        "Commands: /upload <path>, /refine on|off, /history. Type 'exit' to quit.".bright_black()
    );
    println!("{}", "─".repeat(50).bright_black());

    let mut rl = DefaultEditor::new()?;

    loop {
        let readline = rl.readline("> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    // Idle cycle: nothing to process
                    continue;
                }
                if trimmed.eq_ignore_ascii_case("exit") {
                    println!("{}", "👋 Goodbye!".bright_cyan());
                    break;
                }
                let _ = rl.add_history_entry(trimmed);

                if let Some(state) = trimmed.strip_prefix("/refine") {
                    match state.trim() {
                        "on" => {
                            session.set_refine_enabled(true);
                            println!("{}", "Refinement enabled.".bright_green());
                        }
                        "off" => {
                            session.set_refine_enabled(false);
                            println!("{}", "Refinement disabled.".bright_yellow());
                        }
                        _ => eprintln!("{} Usage: /refine on|off", "Error:".bright_red()),
                    }
                    continue;
                }

                if trimmed == "/history" {
                    render_transcript(&session);
                    continue;
                }

                let event = if let Some(path) = trimmed.strip_prefix("/upload") {
                    let path = path.trim();
                    if path.is_empty() {
                        eprintln!("{} Usage: /upload <path>", "Error:".bright_red());
                        continue;
                    }
                    match fs::read(path) {
                        Ok(data) => {
                            let file_name = Path::new(path)
                                .file_name()
                                .map(|n| n.to_string_lossy().into_owned())
                                .unwrap_or_else(|| path.to_string());
                            InputEvent::Upload { file_name, data }
                        }
                        Err(e) => {
                            log::error!("File upload error: {}", e);
                            eprintln!("{} could not read '{}': {}", "Error:".bright_red(), path, e);
                            continue;
                        }
                    }
                } else {
                    InputEvent::Query(trimmed.to_string())
                };

                run_cycle(&mut session, &ai, event).await;
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("\n{}", "👋 Goodbye!".bright_cyan());
                break;
            }
            Err(err) => {
                log::error!("Readline error: {:?}", err);
                eprintln!("{} {:?}", "Error:".bright_red(), err);
                break;
            }
        }
    }

    Ok(())
}
