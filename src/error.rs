//! Error types for pressgen operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while generating a theme or rendering partials.
///
/// Only fatal conditions surface here. Degraded conditions (missing
/// landmarks, unresolvable asset references) are logged as warnings and
/// substituted with empty values instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("index.html not found in {}", .0.display())]
    MissingIndex(PathBuf),

    #[error("cannot create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("invalid partial data: {0}")]
    PartialData(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
