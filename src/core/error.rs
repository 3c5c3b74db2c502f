//! Error type shared by the core operations

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Missing required input: {0}")]
    MissingInput(&'static str),

    #[error("Missing credentials for {0}")]
    MissingCredentials(&'static str),

    #[error("Failed to read {0}: {1}")]
    FileRead(String, String),

    #[error("Failed to write {0}: {1}")]
    FileWrite(String, String),

    #[error("Invalid JSON in {0}: {1}")]
    InvalidJson(String, String),

    #[error("Download of {0} failed: {1}")]
    Download(String, String),

    #[error("Command `{0}` failed: {1}")]
    ShellExec(String, String),

    #[error("Model reply could not be parsed: {0}")]
    MalformedReply(String),

    #[error("Image search for '{0}' failed: {1}")]
    WebSearch(String, String),

    #[error(transparent)]
    Upstream(#[from] anyhow::Error),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Caller errors, as opposed to failures of an external service or tool
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::MissingInput(_) | Self::MissingCredentials(_))
    }
}
