//! Error types for vendoring operations.
//!
//! I/O and JSON causes are exposed through `source()`, not repeated in `Display`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VendorError {
    #[error("Failed to read manifest {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid manifest {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to prepare directory {path}: {reason}")]
    Directory { path: PathBuf, reason: String },

    #[error("Failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to install {repo} into {path}: `{command}` {detail}")]
    Install {
        repo: String,
        path: PathBuf,
        command: String,
        detail: String,
    },
}

impl VendorError {
    pub(crate) fn directory(path: impl Into<PathBuf>, err: impl ToString) -> Self {
        Self::Directory {
            path: path.into(),
            reason: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VendorError>;
