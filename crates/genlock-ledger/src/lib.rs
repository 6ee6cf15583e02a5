//! Generated-file integrity ledger.
//!
//! For every file a generation pass writes, this crate appends one
//! `<declared path>::<sha256 hex>` line to a single ledger file, so later
//! tooling can tell whether a generated file was edited by hand.
//!
//! - [`LedgerPathResolver`] derives the absolute ledger location from an
//!   output directory
//! - [`Ledger`] truncates the ledger and installs one finalize hook per file
//! - [`LedgerWriter`] serializes appends so concurrent hooks never interleave
//! - [`LedgerRecord`] is the on-disk line format
//! - [`generate`] wires all of the above for a generator pipeline

pub mod config;
pub mod error;
pub mod ledger;
pub mod path;
pub mod pipeline;
pub mod record;
pub mod writer;

pub use config::{LedgerConfig, SyncMode, DEFAULT_LEDGER_FILE};
pub use error::{LedgerError, Result};
pub use ledger::Ledger;
pub use path::LedgerPathResolver;
pub use pipeline::generate;
pub use record::{read_records, LedgerRecord, RECORD_SEPARATOR};
pub use writer::LedgerWriter;
