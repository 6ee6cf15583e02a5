use thiserror::Error;

/// Errors produced when decoding checksums.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChecksumError {
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid checksum length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
