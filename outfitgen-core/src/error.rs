use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, rendering, or writing outfit variants.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("template {template} references missing parameter `{key}`")]
    MissingParameter { template: String, key: String },
    #[error("unknown shared string reference `{0}`")]
    UnknownReference(String),
    #[error("malformed manifest: {0}")]
    Manifest(#[from] serde_json::Error),
    #[error("i/o failure at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenerateError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
