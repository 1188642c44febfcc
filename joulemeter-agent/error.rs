use std::io;
use thiserror::Error;

use joulemeter_raw::MsrError;

#[derive(Error, Debug)]
pub enum AgentError {
    #[error("MSR operation failed: {0}")]
    MsrError(#[from] MsrError),

    #[error("Unsupported CPU vendor: {0}")]
    UnsupportedVendor(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("{failed} of {total} register locations could not be read")]
    ReadFailed { failed: usize, total: usize },
}

pub type Result<T> = std::result::Result<T, AgentError>;
