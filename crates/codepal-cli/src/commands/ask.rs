//! Ask command - submit one snippet or question and print the outcome.

use std::io::Read;
use std::path::Path;

use codepal_core::{get_client, handle_submit, Mode};

use crate::render::{print_outcome, prompt_estimate, OutcomeReport};

pub(crate) async fn run(
    mode: Mode,
    file: Option<&Path>,
    text: Option<String>,
    json: bool,
) -> miette::Result<()> {
    let input = read_input(file, text)?;

    let client = get_client()
        .map_err(|e| miette::miette!("Failed to initialize model client: {}", e))?;

    if let Some(words) = prompt_estimate(mode, &input).filter(|_| !json) {
        println!("Mode: {}", mode.label());
        println!("Prompt length: {} words (approx token estimate)\n", words);
    }

    let outcome = handle_submit(client, mode, &input).await;

    if json {
        let report = OutcomeReport::new(mode, &outcome);
        let rendered = serde_json::to_string_pretty(&report)
            .map_err(|e| miette::miette!("Failed to serialize outcome: {}", e))?;
        println!("{}", rendered);
    } else if outcome.is_success() {
        print_outcome(mode, &outcome);
    }

    match (outcome.message(), outcome.diagnostic()) {
        (None, _) => Ok(()),
        (Some(message), None) => Err(miette::miette!("{}", message)),
        (Some(message), Some(diagnostic)) => {
            Err(miette::miette!(help = diagnostic.to_string(), "{}", message))
        }
    }
}

/// Take input from the argument, a file, or stdin, in that order.
fn read_input(file: Option<&Path>, text: Option<String>) -> miette::Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .map_err(|e| miette::miette!("Failed to read {}: {}", path.display(), e));
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| miette::miette!("Failed to read stdin: {}", e))?;
    Ok(buffer)
}
