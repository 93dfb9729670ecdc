//! Info command - show the effective configuration.

use codepal_core::{AssistConfig, Mode, CODE_FENCE_LANGUAGE, MAX_CHARS};

pub(crate) fn run() -> miette::Result<()> {
    let config = AssistConfig::from_env();
    let params = &config.generation;

    println!("Codepal AI Code Assistant");
    println!("=========================");
    println!();
    println!("Version:        {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Model server:   {}", config.base_url);
    println!("Model:          {}", config.model);
    println!("  Override with CODEPAL_OLLAMA_URL and CODEPAL_MODEL");
    println!();
    println!("Generation:");
    println!("  temperature   {}", params.temperature);
    println!("  top_p         {}", params.top_p);
    println!("  max tokens    {}", params.max_tokens);
    println!(
        "  stop          {}",
        params
            .stop
            .as_ref()
            .map(|s| s.join(", "))
            .unwrap_or_else(|| "none".to_string())
    );
    println!();
    println!("Input limit:    {} characters", MAX_CHARS);
    println!("Code language:  {}", CODE_FENCE_LANGUAGE);
    println!();

    println!("Modes:");
    for mode in Mode::ALL {
        println!("  {:<9} {}", mode.name(), mode.label());
    }

    Ok(())
}
