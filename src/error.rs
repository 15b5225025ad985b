//! # Errors raised while loading ploidy tables
//!
//! Loading distinguishes two classes of failure. Unreadable files and malformed
//! coordinate columns are recoverable: the caller gets no table and decides what to
//! do. A line whose coordinates parse but whose sex or ploidy column is missing or
//! garbled is a configuration error and is reported as fatal, see [`PloidyError::is_fatal`].
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PloidyError {
    /// The table file could not be opened or read
    #[error("Could not read ploidy file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Chromosome, start or end column rejected by the region parser
    #[error("Could not parse region ({message}): {line}")]
    Coordinates { line: String, message: String },

    /// Sex or ploidy column missing or not parseable
    #[error("Could not parse: {line}")]
    MalformedRecord { line: String },

    #[error("Unknown ploidy preset '{name}'")]
    UnknownPreset { name: String },
}

pub type Result<T> = std::result::Result<T, PloidyError>;

impl PloidyError {
    pub fn coordinates(line: &str, message: impl Into<String>) -> Self {
        Self::Coordinates {
            line: line.to_owned(),
            message: message.into(),
        }
    }

    pub fn malformed(line: &str) -> Self {
        Self::MalformedRecord {
            line: line.to_owned(),
        }
    }

    /// `true` for errors that mean the table itself is misconfigured and loading
    /// must not be retried or worked around.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MalformedRecord { .. })
    }
}
