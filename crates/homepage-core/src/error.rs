//! Error types for the homepage core library.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types for the homepage generator.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration loading error (including a missing layout file).
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Malformed INI input, with the 1-based line number.
    #[error("INI error in {path} at line {line}: {message}")]
    Ini {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A list section points at a tab that was never declared.
    #[error("No tab with id {tab} (referenced by list {list})")]
    UnknownTab { list: String, tab: String },

    /// A button section points at a list that was never declared.
    #[error("No list with id {list} (referenced by section [{button}])")]
    UnknownList { button: String, list: String },

    /// A required key was absent when first accessed.
    #[error("Missing key `{key}` in [{section}]")]
    MissingKey { section: String, key: String },

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic configuration crate error.
    #[error("Config crate error: {0}")]
    ConfigCrate(#[from] config::ConfigError),
}

impl CoreError {
    /// Create a new configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new INI syntax error.
    pub fn ini(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::Ini {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    /// Create a new missing-key error.
    pub fn missing_key(section: impl Into<String>, key: impl Into<String>) -> Self {
        Self::MissingKey {
            section: section.into(),
            key: key.into(),
        }
    }
}
