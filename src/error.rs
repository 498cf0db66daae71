use std::path::PathBuf;

use thiserror::Error;

/// Failures at the document boundary.
///
/// Individual nodes never fail to convert; they are dropped instead. These
/// variants cover the cases where no document model can be produced at all.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to parse HTML document: {0}")]
    Html(#[source] std::io::Error),

    #[error("HTML document has no body element")]
    MissingBody,
}
