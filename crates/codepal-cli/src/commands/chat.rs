//! Chat command - interactive session with a persistent input buffer.

use std::time::Duration;

use codepal_core::{get_client, handle_submit, Mode, ModelClient, MAX_CHARS};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tokio::runtime::Runtime;

use crate::render::{print_outcome, prompt_estimate};
use crate::session::SessionInput;

/// A line typed at the session prompt.
#[derive(Debug, PartialEq, Eq)]
enum SessionCommand<'a> {
    /// Text to append to the input
    Text(&'a str),
    Submit,
    SetMode(&'a str),
    ListModes,
    Show,
    Clear,
    Help,
    Quit,
    Unknown(&'a str),
}

fn parse_line(line: &str) -> SessionCommand<'_> {
    let trimmed = line.trim();
    if trimmed == "quit" || trimmed == "exit" {
        return SessionCommand::Quit;
    }

    let Some(command) = trimmed.strip_prefix(':') else {
        return SessionCommand::Text(line);
    };

    let (name, arg) = command
        .split_once(char::is_whitespace)
        .map(|(n, a)| (n, a.trim()))
        .unwrap_or((command, ""));

    match name {
        "submit" | "s" => SessionCommand::Submit,
        "mode" | "m" => SessionCommand::SetMode(arg),
        "modes" => SessionCommand::ListModes,
        "show" => SessionCommand::Show,
        "clear" => SessionCommand::Clear,
        "help" | "h" => SessionCommand::Help,
        "quit" | "q" => SessionCommand::Quit,
        other => SessionCommand::Unknown(other),
    }
}

/// Lines worth recalling with the arrow keys; blank lines are skipped.
fn history_entry(line: &str) -> Option<&str> {
    (!line.trim().is_empty()).then_some(line)
}

fn print_help() {
    println!("{}", "Paste code or type your question; each line is added to the input.".bright_black());
    println!("{}", "  :submit, :s        send the input in the current mode".bright_black());
    println!("{}", "  :mode <name>       switch mode (explain, review, refactor, ask)".bright_black());
    println!("{}", "  :modes             list modes".bright_black());
    println!("{}", "  :show              print the current input".bright_black());
    println!("{}", "  :clear             empty the input".bright_black());
    println!("{}", "  quit, exit         leave the session".bright_black());
}

fn print_modes(current: Mode) {
    for mode in Mode::ALL {
        let marker = if mode == current { "*" } else { " " };
        println!("  {} {:<9} {}", marker, mode.name(), mode.label());
    }
}

fn thinking_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Thinking...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

pub(crate) fn run(runtime: &Runtime, initial_mode: Mode) -> miette::Result<()> {
    println!("{}", "Initializing AI Code Assistant...".bright_black());
    let client = get_client()
        .map_err(|e| miette::miette!("Failed to initialize model client: {}", e))?;

    let mut editor =
        DefaultEditor::new().map_err(|e| miette::miette!("Failed to start line editor: {}", e))?;

    let mut input = SessionInput::new();
    let mut mode = initial_mode;

    println!("{}", "=== AI Code Assistant ===".bright_magenta().bold());
    println!("{}", format!("Model: {}", client.model()).bright_black());
    print_help();
    println!();

    loop {
        let prompt = format!("[{}] > ", mode.name());
        let line = match editor.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(miette::miette!("Failed to read input: {}", err)),
        };

        if let Some(entry) = history_entry(&line) {
            let _ = editor.add_history_entry(entry);
        }

        match parse_line(&line) {
            SessionCommand::Text(text) => {
                let dropped = input.push_line(text);
                if dropped > 0 {
                    println!(
                        "{}",
                        format!("Input limited to {} characters; {} dropped.", MAX_CHARS, dropped)
                            .yellow()
                    );
                }
                println!("{}", input.usage_label().bold());
            }
            SessionCommand::Submit => submit(runtime, client, mode, input.as_str()),
            SessionCommand::SetMode(name) => match name.parse::<Mode>() {
                Ok(new_mode) => {
                    mode = new_mode;
                    println!("{}", format!("Mode: {}", mode.label()).green());
                }
                Err(e) => println!("{}", e.to_string().yellow()),
            },
            SessionCommand::ListModes => print_modes(mode),
            SessionCommand::Show => {
                println!("{}", input.as_str());
                println!("{}", input.usage_label().bold());
            }
            SessionCommand::Clear => {
                input.clear();
                println!("{}", input.usage_label().bold());
            }
            SessionCommand::Help => print_help(),
            SessionCommand::Quit => break,
            SessionCommand::Unknown(name) => {
                println!("{}", format!("Unknown command ':{}'. Type :help.", name).yellow());
            }
        }
    }

    println!("{}", "Goodbye!".bright_green());
    Ok(())
}

/// Run one submission to completion. Input is left untouched whatever happens.
fn submit(runtime: &Runtime, client: &dyn ModelClient, mode: Mode, text: &str) {
    if let Some(words) = prompt_estimate(mode, text) {
        println!(
            "{}",
            format!("Prompt length: {} words (approx token estimate)", words).bright_black()
        );
    }

    let spinner = thinking_spinner();
    let outcome = runtime.block_on(handle_submit(client, mode, text));
    spinner.finish_and_clear();

    print_outcome(mode, &outcome);
    println!();
}
