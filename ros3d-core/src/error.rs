//! Error types for ros3d

use thiserror::Error;

/// Main error type for ros3d operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Result type alias for ros3d operations
pub type Result<T> = std::result::Result<T, Error>;
