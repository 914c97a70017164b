use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LoaderError>;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Missing required environment variable {0}")]
    Configuration(&'static str),

    #[error("Invalid DB_PORT value: {0}")]
    InvalidPort(String),

    #[error("Failed to connect to database: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse input JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid player record at index {index}: {source}")]
    Record {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Schema setup failed: {0}")]
    Schema(#[source] storage::StorageError),

    #[error("Insert failed for player {id}: {source}")]
    Insert {
        id: i32,
        #[source]
        source: storage::StorageError,
    },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),
}
