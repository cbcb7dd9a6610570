use std::path::PathBuf;

use thiserror::Error;

/// Failures outside the graph engine: bad roots, config files, directory walks.
#[derive(Debug, Error)]
pub enum IncgraphError {
    #[error("project root is not a directory: {0:?}")]
    InvalidRoot(PathBuf),

    #[error("cannot read config file {path:?}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path:?}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid ignore pattern")]
    Walk(#[from] ignore::Error),
}

pub type Result<T> = std::result::Result<T, IncgraphError>;
