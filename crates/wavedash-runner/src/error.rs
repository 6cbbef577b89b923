use std::path::PathBuf;

use wavedash_core::error::GeometryError;

/// Failures that stop the runner before or after the session runs.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid level: {0}")]
    Geometry(#[from] GeometryError),

    #[error("session task failed: {0}")]
    Session(#[from] tokio::task::JoinError),

    #[error("failed to encode summary: {0}")]
    Summary(#[from] serde_json::Error),
}

impl RunnerError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn toml(path: &std::path::Path, source: toml::de::Error) -> Self {
        Self::Toml {
            path: path.to_path_buf(),
            source,
        }
    }
}
