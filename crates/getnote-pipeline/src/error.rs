//! Import error types

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::string::FromUtf8Error;
use thiserror::Error;
use zip::result::ZipError;

/// Import error type
#[derive(Debug, Error)]
pub enum ImportError {
    /// The archive could not be read or decoded; aborts the whole run
    #[error("Failed to open archive {path}: {source}")]
    ArchiveOpen {
        path: PathBuf,
        #[source]
        source: ZipError,
    },

    /// A single archive entry could not be read
    #[error("Failed to read entry {name}: {source}")]
    EntryRead {
        name: String,
        #[source]
        source: ZipError,
    },

    /// Entry bytes are not valid UTF-8
    #[error("Entry {name} is not valid UTF-8: {source}")]
    InvalidUtf8 {
        name: String,
        #[source]
        source: FromUtf8Error,
    },

    /// HTML to Markdown conversion failed
    #[error("Markdown conversion failed: {0}")]
    Conversion(String),

    /// Writing to the vault failed
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Specialized Result type for import operations
pub type ImportResult<T> = Result<T, ImportError>;

impl ImportError {
    /// Create a conversion error
    pub fn conversion(msg: impl Into<String>) -> Self {
        Self::Conversion(msg.into())
    }

    /// Create a vault write error
    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

/// Per-entry processing stage, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStage {
    Extracting,
    Converting,
    Cleaning,
    Composing,
    Writing,
}

impl fmt::Display for ImportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Extracting => "extracting",
            Self::Converting => "converting",
            Self::Cleaning => "cleaning",
            Self::Composing => "composing",
            Self::Writing => "writing",
        };
        f.write_str(name)
    }
}

/// A failure confined to one archive entry. Counted, logged, never fatal.
#[derive(Debug, Error)]
#[error("{path}: {stage} failed: {source}")]
pub struct EntryFailure {
    /// Archive path of the entry
    pub path: String,
    /// Stage that failed
    pub stage: ImportStage,
    #[source]
    pub source: ImportError,
}

impl EntryFailure {
    pub fn new(path: impl Into<String>, stage: ImportStage, source: ImportError) -> Self {
        Self {
            path: path.into(),
            stage,
            source,
        }
    }
}
