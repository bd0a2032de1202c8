use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to create cache directory '{path}'")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize cache payload")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write cache entry '{path}'")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to remove cache entry '{path}'")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
