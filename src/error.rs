use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Cannot load package provider class '{provider}': {reason}")]
    ProviderLoad { provider: String, reason: String },

    #[error("{0}")]
    ProviderExecution(String),

    #[error("{0}")]
    Helper(String),

    #[error("missing required argument '{0}'")]
    MissingArgument(&'static str),

    #[error("System command '{command}' failed: {reason}")]
    CommandFailed { command: String, reason: String },

    #[error("IO error at '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    StdIoError(#[from] std::io::Error),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error("Config file not found at: {path}")]
    ConfigNotFound { path: PathBuf },

    /// A dispatched action ended in a failed reply (CLI surface only).
    #[error("{0}")]
    ActionFailed(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, AgentError>;
