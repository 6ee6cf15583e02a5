//! Foundation types for genlock.
//!
//! This crate models what a code generator hands to the ledger: a set of
//! [`GeneratedFile`] descriptors, each with an immutable declared path, the
//! [`Section`]s that make up its content, and a slot for a single finalize
//! hook that runs once the rendered bytes are on disk.
//!
//! # Key Types
//!
//! - [`GeneratedFile`] — Declared destination plus content and hook slot
//! - [`Section`] — A rendered piece of file content
//! - [`FinalizeFn`] — Callback invoked with the path actually written
//! - [`RenderError`] — Write or finalize failure for one file

pub mod error;
pub mod file;
pub mod section;

pub use error::{HookError, RenderError};
pub use file::{FinalizeFn, GeneratedFile};
pub use section::Section;
