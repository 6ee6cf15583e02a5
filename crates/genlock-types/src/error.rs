use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type returned by finalize hooks.
///
/// Boxed so hook implementations keep their own error enums; callers can
/// downcast to recover the concrete type.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced while rendering a generated file.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Creating the target directory or writing the file failed.
    #[error("failed to write generated file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file was written but its finalize hook failed.
    #[error("finalize hook failed for {path:?}: {source}")]
    Finalize {
        path: PathBuf,
        #[source]
        source: HookError,
    },
}

/// Convenience alias used throughout the types crate.
pub type Result<T> = std::result::Result<T, RenderError>;
