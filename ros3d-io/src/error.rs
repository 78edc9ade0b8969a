//! Error types for point cloud decoding

use thiserror::Error;

/// Per-frame decode failures
///
/// Every variant is recoverable: the caller drops the frame and keeps
/// displaying the last good buffer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Truncated payload: expected at least {expected} bytes, got {actual}")]
    TruncatedPayload { expected: usize, actual: usize },

    #[error("Malformed point step: {point_step} bytes is smaller than the {minimum} mandatory bytes")]
    MalformedStride { point_step: u32, minimum: u32 },

    #[error("Invalid base64 payload: {0}")]
    InvalidEncoding(#[from] base64::DecodeError),
}

/// Result type alias for decode operations
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;
