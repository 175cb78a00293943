use thiserror::Error;

/// Failures of the command-line tool itself. Expression errors are reported
/// in the printed result instead.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid context JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Usage(String),
}
