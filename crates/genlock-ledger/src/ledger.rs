use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use genlock_crypto::checksum_file;
use genlock_types::{FinalizeFn, GeneratedFile, HookError};
use tracing::{debug, info};

use crate::config::{LedgerConfig, SyncMode};
use crate::error::{LedgerError, Result};
use crate::path::LedgerPathResolver;
use crate::record::{line_path, read_records, LedgerRecord};
use crate::writer::LedgerWriter;

/// Checksum ledger for one generation pass.
///
/// The ledger path is resolved once at construction and never changes.
/// [`Ledger::lock`] truncates the ledger file and installs a finalize hook on
/// every file; each hook appends exactly one record when its file has been
/// written. The ledger file is truncated at most once per instance.
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    files: Vec<GeneratedFile>,
    sync_mode: SyncMode,
    writer: Option<Arc<LedgerWriter>>,
}

impl Ledger {
    /// Bind `files` to the ledger location described by `config`.
    ///
    /// An empty file list is accepted here; [`Ledger::lock`] rejects it.
    pub fn new(files: Vec<GeneratedFile>, config: &LedgerConfig) -> Result<Self> {
        let path = LedgerPathResolver::from_config(config).resolve()?;
        Ok(Self::with_path(path, files, config.sync_mode))
    }

    /// Build a ledger from an already resolved absolute path.
    pub(crate) fn with_path(
        path: PathBuf,
        files: Vec<GeneratedFile>,
        sync_mode: SyncMode,
    ) -> Self {
        Self {
            path,
            files,
            sync_mode,
            writer: None,
        }
    }

    /// Absolute path of the ledger file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn files(&self) -> &[GeneratedFile] {
        &self.files
    }

    /// Hand the files back to the pipeline, hooks included.
    pub fn into_files(self) -> Vec<GeneratedFile> {
        self.files
    }

    /// Whether [`Ledger::lock`] has already reset the ledger file.
    pub fn is_locked(&self) -> bool {
        self.writer.is_some()
    }

    /// Reset the ledger file and install a checksum hook on every file.
    ///
    /// Fails without touching the filesystem when there are no files or the
    /// ledger was already locked. If the ledger cannot be prepared no hook is
    /// installed.
    pub fn lock(&mut self) -> Result<PathBuf> {
        if self.files.is_empty() {
            return Err(LedgerError::NoFilesDefined);
        }
        if self.writer.is_some() {
            return Err(LedgerError::AlreadyLocked(self.path.clone()));
        }

        let writer = Arc::new(LedgerWriter::create(&self.path, self.sync_mode)?);
        for file in &mut self.files {
            let hook = hook_for(file.path().to_path_buf(), Arc::clone(&writer));
            file.set_finalize(hook);
        }
        self.writer = Some(writer);

        info!(path = %self.path.display(), files = self.files.len(), "ledger locked");
        Ok(self.path.clone())
    }

    /// Read back the records appended so far.
    pub fn records(&self) -> Result<Vec<LedgerRecord>> {
        read_records(&self.path)
    }
}

/// Build the finalize hook for one file.
///
/// Called once per file so every hook owns its own declared path.
fn hook_for(declared: PathBuf, writer: Arc<LedgerWriter>) -> FinalizeFn {
    let recorded = AtomicBool::new(false);
    Arc::new(move |written: &Path| {
        finalize(&declared, written, &writer, &recorded).map_err(HookError::from)
    })
}

/// Record one file's checksum, at most once per hook.
///
/// A failed attempt releases the claim so the caller may retry.
fn finalize(
    declared: &Path,
    written: &Path,
    writer: &LedgerWriter,
    recorded: &AtomicBool,
) -> Result<()> {
    if recorded
        .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        .is_err()
    {
        return Err(LedgerError::AlreadyFinalized {
            path: declared.to_path_buf(),
        });
    }
    let result = record_checksum(declared, written, writer);
    if result.is_err() {
        recorded.store(false, Ordering::Release);
    }
    result
}

/// Checksum the bytes at `written` and append them under `declared`.
fn record_checksum(declared: &Path, written: &Path, writer: &LedgerWriter) -> Result<()> {
    line_path(declared)?;
    let checksum = checksum_file(written).map_err(|source| LedgerError::ChecksumCreation {
        path: declared.to_path_buf(),
        source,
    })?;
    debug!(
        declared = %declared.display(),
        written = %written.display(),
        checksum = %checksum.short_hex(),
        "checksum computed"
    );
    writer.append(&LedgerRecord::new(declared, checksum))
}
