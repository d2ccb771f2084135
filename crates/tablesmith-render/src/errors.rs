use std::path::PathBuf;

use thiserror::Error;

/// Errors emitted while writing artifacts.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid output path: {0}")]
    InvalidPath(PathBuf),
}
