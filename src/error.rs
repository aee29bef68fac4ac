use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FwdashError {
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Workflow step not found: {0}")]
    StepNotFound(String),

    #[error("Dataset file not found: {0}")]
    DatasetNotFound(PathBuf),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Signal handler error: {0}")]
    SignalHandler(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, FwdashError>;
