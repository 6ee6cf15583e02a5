use std::mem;
use std::path::PathBuf;

use genlock_types::GeneratedFile;
use tracing::{info, warn};

use crate::config::LedgerConfig;
use crate::error::Result;
use crate::ledger::Ledger;
use crate::path::LedgerPathResolver;

/// Generator entry point: lock the ledger for `files` and install their hooks.
///
/// Runs as the last step of a generation pass, before any file is written.
/// The files are always handed back through `files`, with hooks installed on
/// success and untouched on failure. Returns the absolute ledger path.
pub fn generate(files: &mut Vec<GeneratedFile>, config: &LedgerConfig) -> Result<PathBuf> {
    let path = LedgerPathResolver::from_config(config).resolve()?;
    let mut ledger = Ledger::with_path(path, mem::take(files), config.sync_mode);
    let result = ledger.lock();
    *files = ledger.into_files();

    match &result {
        Ok(path) => info!(path = %path.display(), "created ledger file"),
        Err(e) => warn!(error = %e, "ledger not created"),
    }
    result
}
