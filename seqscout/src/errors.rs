//! Error types for seqscout.
//!
//! Every fallible operation in the crate returns [`ScanResult`]. The
//! taxonomy distinguishes errors that are local to a single pattern
//! (collected into the run summary while sibling patterns continue) from
//! errors that invalidate the whole run (see [`ScanError::is_fatal`]):
//! once the shared result sink can no longer be written safely, letting
//! the run continue would risk a truncated or interleaved output file.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for scan operations
pub type ScanResult<T> = Result<T, ScanError>;

/// Errors that can occur while loading inputs or running a scan
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("Invalid pattern '{0}': pattern sequence is empty")]
    InvalidPattern(String),
    #[error("Malformed FASTA in {path} (line {line}): {reason}")]
    FastaParse {
        path: PathBuf,
        line: usize,
        reason: String,
    },
    #[error("No sequences found in {0}")]
    EmptyFasta(PathBuf),
    #[error("Invalid sequence length range: min={min}, max={max}")]
    InvalidLengthRange { min: usize, max: usize },
    #[error("Failed to write match record to result sink: {0}")]
    SinkWrite(#[source] io::Error),
    #[error("Result sink lock poisoned by a panicked worker")]
    SinkPoisoned,
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl ScanError {
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound(path.into())
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied(path.into())
    }

    pub fn invalid_pattern(id: impl Into<String>) -> Self {
        Self::InvalidPattern(id.into())
    }

    pub fn fasta_parse(path: impl Into<PathBuf>, line: usize, reason: impl Into<String>) -> Self {
        Self::FastaParse {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }

    pub fn empty_fasta(path: impl Into<PathBuf>) -> Self {
        Self::EmptyFasta(path.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Whether this error invalidates the whole run.
    ///
    /// Per-pattern errors are collected without aborting sibling tasks;
    /// sink and pool errors abort the run because the output can no longer
    /// be trusted to be complete.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::SinkWrite(_) | Self::SinkPoisoned | Self::ThreadPool(_)
        )
    }
}
