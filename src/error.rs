use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum DumpError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Cannot scan {path}: {reason}")]
    InvalidRoot { path: PathBuf, reason: String },
    #[error("Cannot write output {path}: {source}")]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Walk error: {0}")]
    Walk(String),
    #[error("Invalid config {path}: {reason}")]
    Config { path: PathBuf, reason: String },
}
impl DumpError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DumpError::Io {
            path: path.into(),
            source,
        }
    }
    pub(crate) fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DumpError::Output {
            path: path.into(),
            source,
        }
    }
    /// Process exit code for this failure: `2` for a bad root, `3` for an
    /// unwritable output, `1` for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            DumpError::InvalidRoot { .. } => 2,
            DumpError::Output { .. } => 3,
            DumpError::Io { .. } | DumpError::Walk(_) | DumpError::Config { .. } => 1,
        }
    }
}
