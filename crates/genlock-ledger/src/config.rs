use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Ledger location relative to the output directory.
pub const DEFAULT_LEDGER_FILE: &str = "gen/genlock.lock";

/// Permission bits for a newly created ledger file (Unix only).
pub const LEDGER_FILE_MODE: u32 = 0o666;

/// Permission bits for newly created ledger directories (Unix only).
pub const LEDGER_DIR_MODE: u32 = 0o755;

/// Flush strategy for ledger appends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncMode {
    /// Rely on the OS to persist each appended line. Write errors the OS
    /// defers until close are not reported.
    OsDefault,
    /// `fsync` after every append. Deferred write errors surface as
    /// append failures instead of being lost when the handle closes.
    #[default]
    EveryWrite,
}

/// Configuration for a ledger instance.
///
/// The output directory is supplied by the caller (typically from the
/// generator's own `--output` flag); the ledger never reads process-wide
/// flag state itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Base output directory. `None` or empty means the current directory.
    pub output_dir: Option<PathBuf>,
    /// Ledger location relative to `output_dir`.
    pub ledger_file: PathBuf,
    /// Flush strategy for appends. Defaults to [`SyncMode::EveryWrite`].
    pub sync_mode: SyncMode,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            ledger_file: PathBuf::from(DEFAULT_LEDGER_FILE),
            sync_mode: SyncMode::default(),
        }
    }
}

impl LedgerConfig {
    /// Default configuration rooted at `output_dir`.
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: Some(output_dir.into()),
            ..Default::default()
        }
    }

    /// Skip the per-append fsync. Faster, but write errors deferred to
    /// close are dropped.
    pub fn os_buffered(mut self) -> Self {
        self.sync_mode = SyncMode::OsDefault;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_cwd_ledger() {
        let config = LedgerConfig::default();
        assert_eq!(config.output_dir, None);
        assert_eq!(config.ledger_file, PathBuf::from("gen/genlock.lock"));
        assert_eq!(config.sync_mode, SyncMode::EveryWrite);
    }

    #[test]
    fn builders_compose() {
        let config = LedgerConfig::with_output_dir("out").os_buffered();
        assert_eq!(config.output_dir, Some(PathBuf::from("out")));
        assert_eq!(config.sync_mode, SyncMode::OsDefault);
        assert_eq!(config.ledger_file, PathBuf::from(DEFAULT_LEDGER_FILE));
    }
}
