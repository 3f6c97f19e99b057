use thiserror::Error;

/// Failures at the pipeline boundary. Extraction itself never errors;
/// these cover input handling and task execution around it.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed input document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("usage: {0}")]
    Usage(String),
}
