use std::io;
use std::path::PathBuf;

/// Errors produced by ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// `lock` was called for a pass with no generated files.
    #[error("no files defined")]
    NoFilesDefined,

    /// The ledger was already truncated by an earlier `lock` on this instance.
    #[error("ledger {0:?} is already locked")]
    AlreadyLocked(PathBuf),

    /// The current working directory could not be determined.
    #[error("failed to resolve current directory: {0}")]
    CurrentDir(#[source] io::Error),

    /// A configured output directory or ledger file cannot form a valid path.
    #[error("invalid ledger path component {0:?}")]
    InvalidPath(PathBuf),

    /// Creating the ledger directory or truncating the ledger file failed.
    #[error("failed to prepare ledger {path:?}: {source}")]
    Prepare {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A generated file could not be read for checksumming.
    #[error("failed to create checksum from file ({path:?}): {source}")]
    ChecksumCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A record could not be appended to the ledger.
    #[error("failed to write checksum to file ({path:?}): {source}")]
    ChecksumWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The finalize hook for this file already recorded its checksum.
    #[error("checksum for {path:?} was already recorded")]
    AlreadyFinalized { path: PathBuf },

    /// An existing ledger could not be read back.
    #[error("failed to read ledger {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A declared path cannot be written as a single UTF-8 ledger line.
    #[error("cannot record {path:?} in the ledger: {reason}")]
    UnrepresentablePath { path: PathBuf, reason: String },

    /// A ledger line does not match `<path>::<hex checksum>`.
    #[error("malformed ledger record {line:?}: {reason}")]
    MalformedRecord { line: String, reason: String },
}

/// Convenience alias used throughout the ledger crate.
pub type Result<T> = std::result::Result<T, LedgerError>;
