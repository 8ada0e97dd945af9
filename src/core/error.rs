//! Error types for the snaplens library.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using snaplens's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading snapshots or producing reports.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot file not found.
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed or unsupported snapshot content.
    #[error("Snapshot error: {message}")]
    Snapshot { message: String },

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(String),
}

impl From<minijinja::Error> for Error {
    fn from(err: minijinja::Error) -> Self {
        Self::Template(err.to_string())
    }
}

impl Error {
    /// Create a new snapshot error.
    pub fn snapshot(message: impl Into<String>) -> Self {
        Self::Snapshot {
            message: message.into(),
        }
    }

    /// Create a new config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::snapshot("unsupported format version 9");
        assert_eq!(
            err.to_string(),
            "Snapshot error: unsupported format version 9"
        );

        let err = Error::FileNotFound {
            path: PathBuf::from("dump.json"),
        };
        assert_eq!(err.to_string(), "File not found: dump.json");
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("bad value");
        assert_eq!(err.to_string(), "Configuration error: bad value");
    }
}
