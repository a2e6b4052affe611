//! Error types for loading configuration and scenarios.
//!
//! The engine itself never fails. Errors only arise at the edges: reading
//! files, parsing them, and checking command-line values.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Scenario file that could not be read or parsed
    #[error("Scenario error in {}: {message}", .path.display())]
    Scenario { path: PathBuf, message: String },

    /// Configuration file or value errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Values rejected before they reach the engine
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    pub fn scenario(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Scenario {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
