//! Error types

use thiserror::Error;

/// Engine and input errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid direction: {0}")]
    InvalidDirection(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("no session is running")]
    NoSession,
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}
