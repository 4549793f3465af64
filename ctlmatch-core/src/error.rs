//! Typed error handling for ctlmatch.
//!
//! Every failure in the core is fatal for the run: there is no partial
//! result and no retry. The variants exist so callers can tell *why* a run
//! stopped and which input caused it.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for ctlmatch operations.
#[derive(Error, Debug)]
pub enum CtlmatchError {
    /// An input file is missing or unreadable
    #[error("I/O error at {path}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// A catalog row has no value for the configured text column
    #[error("Missing field '{column}' in catalog row {row}{}", path_suffix(.path))]
    MissingField {
        /// Catalog file, if the rows came from a file
        path: Option<PathBuf>,
        /// Data row number (1-indexed, header excluded)
        row: usize,
        column: String,
    },

    /// The catalog could not be decoded as CSV
    #[error("CSV error{}: {message}", path_suffix(.path))]
    Csv {
        path: Option<PathBuf>,
        message: String,
        /// Line number in the source (1-indexed) if available
        line: Option<u64>,
    },

    /// ctlmatch.toml could not be parsed
    #[error("Config error at {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// A caller-supplied value is not acceptable (e.g. an unknown output format)
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

impl CtlmatchError {
    /// I/O failure on `path`.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    /// Create a missing-field error for a catalog row.
    pub fn missing_field(path: Option<PathBuf>, row: usize, column: impl Into<String>) -> Self {
        Self::MissingField {
            path,
            row,
            column: column.into(),
        }
    }

    /// Convert a `csv` error, keeping its line position when it has one.
    pub fn csv(path: Option<PathBuf>, err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line());
        Self::Csv {
            path,
            message: err.to_string(),
            line,
        }
    }

    /// Unparsable config file at `path`.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Input file the error refers to, when known.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => Some(path),
            Self::Config { path, .. } => Some(path),
            Self::MissingField { path, .. } | Self::Csv { path, .. } => path.as_ref(),
            Self::InvalidArgument { .. } => None,
        }
    }
}

/// Convenience type alias for ctlmatch results.
pub type CtlmatchResult<T> = Result<T, CtlmatchError>;

/// Attaches a path to `std::io::Error` results.
pub trait IoResultExt<T> {
    /// Wraps the error as [`CtlmatchError::Io`] naming `path`.
    fn with_path(self, path: impl Into<PathBuf>) -> CtlmatchResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> CtlmatchResult<T> {
        self.map_err(|e| CtlmatchError::io(path, e))
    }
}
