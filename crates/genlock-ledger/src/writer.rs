use std::fs::{DirBuilder, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use crate::config::{SyncMode, LEDGER_DIR_MODE, LEDGER_FILE_MODE};
use crate::error::{LedgerError, Result};
use crate::record::LedgerRecord;

/// Append-only writer for a single ledger file.
///
/// A writer only exists once its file has been created or truncated, so
/// every append lands in a ledger that was reset for the current pass.
/// Each append is an independent open-write-close cycle held under the
/// writer's mutex; concurrent hooks never interleave partial lines.
#[derive(Debug)]
pub struct LedgerWriter {
    path: PathBuf,
    sync_mode: SyncMode,
    append_lock: Mutex<()>,
}

impl LedgerWriter {
    /// Ensure the parent directory exists, then create or truncate the
    /// ledger file to zero length.
    pub fn create(path: &Path, sync_mode: SyncMode) -> Result<Self> {
        let prepare_err = |source: io::Error| LedgerError::Prepare {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            dir_builder().create(parent).map_err(prepare_err)?;
        }
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        set_file_mode(&mut options);
        options.open(path).map_err(prepare_err)?;

        debug!(path = %path.display(), "ledger truncated");
        Ok(Self {
            path: path.to_path_buf(),
            sync_mode,
            append_lock: Mutex::new(()),
        })
    }

    /// Path of the ledger file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record as a single line.
    pub fn append(&self, record: &LedgerRecord) -> Result<()> {
        let line = record.to_line()?;
        // The guarded value is `()`, so a poisoned lock carries no broken state.
        let _guard = self
            .append_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.append_line(line.as_bytes())
            .map_err(|source| LedgerError::ChecksumWrite {
                path: self.path.clone(),
                source,
            })?;
        debug!(
            path = %record.path.display(),
            checksum = %record.checksum.short_hex(),
            "ledger record appended"
        );
        Ok(())
    }

    fn append_line(&self, line: &[u8]) -> io::Result<()> {
        let mut options = OpenOptions::new();
        options.append(true).create(true);
        set_file_mode(&mut options);
        let mut file: File = options.open(&self.path)?;
        file.write_all(line)?;
        if matches!(self.sync_mode, SyncMode::EveryWrite) {
            file.sync_all()?;
        }
        Ok(())
    }
}

fn dir_builder() -> DirBuilder {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(LEDGER_DIR_MODE);
    }
    builder
}

#[cfg(unix)]
fn set_file_mode(options: &mut OpenOptions) {
    use std::os::unix::fs::OpenOptionsExt;
    options.mode(LEDGER_FILE_MODE);
}

#[cfg(not(unix))]
fn set_file_mode(_options: &mut OpenOptions) {}
