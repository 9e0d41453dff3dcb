//! Configuration error types

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the settings file failed
    #[error("Failed to access config file {path}: {source}")]
    Io {
        /// File that could not be accessed
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The settings file is not valid TOML for [`crate::Config`]
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        /// File that could not be parsed
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The configuration could not be rendered as TOML
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The platform has no per-user config directory
    #[error("Could not determine config directory")]
    NoConfigDir,

    /// The output folder is not a usable vault-relative folder
    #[error("Invalid output folder '{folder}': {reason}")]
    InvalidOutputFolder {
        /// Rejected folder value
        folder: String,
        /// Why it was rejected
        reason: &'static str,
    },
}

/// Specialized Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_folder(folder: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidOutputFolder {
            folder: folder.into(),
            reason,
        }
    }
}
