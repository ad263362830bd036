//! Error taxonomy for a lint run.
//!
//! Absent ambient files are not errors and never reach this type. Lint
//! findings are not errors either; they travel in a `Report` and only
//! influence the exit code.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, HintError>;

#[derive(Error, Debug)]
pub enum HintError {
    /// Arguments rejected by the parser.
    #[error("{0}")]
    Usage(String),

    /// A file that exists could not be read.
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A required file (target source, `--config`, `--reporter`) is missing.
    #[error("{what} not found: {}", .path.display())]
    MissingFile { what: &'static str, path: PathBuf },

    /// A config file was found but is not a valid config object.
    #[error("malformed config {}: {message}", .path.display())]
    MalformedConfig { path: PathBuf, message: String },

    #[error("lint engine failed on {file}: {message}")]
    Engine { file: String, message: String },

    #[error("reporter '{name}' failed: {message}")]
    Reporter { name: String, message: String },
}

impl HintError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        HintError::Io {
            path: path.into(),
            source,
        }
    }
}
