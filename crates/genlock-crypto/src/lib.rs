//! Content checksums for genlock.
//!
//! Provides the [`Checksum`] value recorded in the ledger and the streaming
//! SHA-256 routines that produce it. Every tool that reads or writes a ledger
//! must agree on the algorithm and on lowercase hex encoding, so both live here
//! and nowhere else.
//!
//! All hashing wraps an established library; there is no custom cryptography.

pub mod checksum;
pub mod error;

pub use checksum::{checksum_bytes, checksum_file, checksum_reader, Checksum};
pub use error::ChecksumError;
