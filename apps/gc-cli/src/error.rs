use std::path::PathBuf;

use gc_cycle::CycleError;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read scenario file: {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scenario: {0}")]
    Cycle(#[from] CycleError),

    #[error("Command {index} ({op}) failed: {source}")]
    Command {
        index: usize,
        op: &'static str,
        source: CycleError,
    },
}
