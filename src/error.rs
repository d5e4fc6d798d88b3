use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a path could not be expressed relative to the reference directory.
#[derive(Debug, Error)]
pub enum RelativizeError {
    #[error("cannot canonicalize {}: {source}", .path.display())]
    Canonicalize {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("reference directory {} is outside root {}", .path.display(), .root.display())]
    ReferenceOutsideRoot { path: PathBuf, root: PathBuf },

    #[error("{} is outside root {}", .path.display(), .root.display())]
    TargetOutsideRoot { path: PathBuf, root: PathBuf },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Directory not found: {0}")]
    RootNotFound(String),

    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

pub type CliResult<T> = Result<T, CliError>;
