//! Error types for casket

use thiserror::Error;

/// Result type alias for casket operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in casket operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read stream while hashing: {0}")]
    StreamRead(#[source] std::io::Error),

    #[error("failed to rewind stream after hashing: {0}")]
    StreamSeek(#[source] std::io::Error),

    #[error("storage write failed: {0}")]
    Write(#[source] std::io::Error),

    #[error("storage read failed: {0}")]
    Read(#[source] std::io::Error),

    #[error("blob not found: {0}")]
    NotFound(String),

    #[error("blob already exists: {0}")]
    AlreadyExists(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for the create-collision produced when two writers race on the
    /// same content. Put folds this into success.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Error::AlreadyExists(_))
    }
}
