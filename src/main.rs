use std::collections::BTreeMap;
use std::path::PathBuf;

use dealflow::pipeline::{run_batch, PipelineError, TextBlock};

#[tokio::main]
async fn main() -> Result<(), PipelineError> {
    // Initialize Telemetry
    tracing_subscriber::fmt()
        .with_env_filter("dealflow=debug,info")
        .with_target(false)
        .json()
        .init();

    let path: PathBuf = std::env::args_os()
        .nth(1)
        .map(Into::into)
        .ok_or_else(|| PipelineError::Usage("dealflow <input.json>".to_string()))?;

    let raw = std::fs::read_to_string(&path)?;
    let input: BTreeMap<String, Vec<TextBlock>> = serde_json::from_str(&raw)?;
    tracing::info!(venues = input.len(), "Dealflow batch starting");

    let runs = run_batch(input).await;
    println!("{}", serde_json::to_string_pretty(&runs)?);
    Ok(())
}
