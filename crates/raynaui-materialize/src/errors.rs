use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of layout operations that the caller must handle.
#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl MaterializeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        MaterializeError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type MaterializeResult<T> = Result<T, MaterializeError>;

/// Non-fatal problem recorded while writing one bundle.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("No files to write")]
    NoFiles,
    #[error("File already exists: {path} (use --overwrite to overwrite)")]
    Conflict { path: String },
    #[error("Refusing to write outside the output directory: {path}")]
    InvalidPath { path: String },
    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl WriteError {
    /// Bundle-relative path the error refers to, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            WriteError::NoFiles => None,
            WriteError::Conflict { path }
            | WriteError::InvalidPath { path }
            | WriteError::Io { path, .. } => Some(path.as_str()),
        }
    }
}
