//! Check command - verify the model server and model are available.

use codepal_core::{get_client, FailureKind, ModelClient};

pub(crate) async fn run() -> miette::Result<()> {
    let client = get_client()
        .map_err(|e| miette::miette!("Failed to initialize model client: {}", e))?;

    println!("Checking {} for model '{}'...", client.base_url(), client.model());

    match client.check_availability().await {
        Ok(()) => {
            println!("Model server is running and '{}' is available.", client.model());
            Ok(())
        }
        Err(e) if e.kind() == FailureKind::Connectivity => Err(miette::miette!(
            help = "Start the server with: ollama serve",
            "Failed to connect to the model server at {}. Please check if the LLM is running locally.",
            client.base_url()
        )),
        Err(e) => Err(miette::miette!("{}", e)),
    }
}
