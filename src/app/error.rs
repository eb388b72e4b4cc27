use thiserror::Error;

use crate::parser::ParseError;

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported encoding label: {0}")]
    UnknownEncoding(String),

    #[error("Snapshot parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Watcher is already running")]
    AlreadyRunning,
}

pub type Result<T> = std::result::Result<T, WatchError>;
