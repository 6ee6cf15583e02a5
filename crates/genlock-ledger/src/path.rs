use std::env;
use std::path::{Component, Path, PathBuf};

use crate::config::LedgerConfig;
use crate::error::{LedgerError, Result};

/// Computes the absolute, normalized location of the ledger file.
///
/// Resolution is `<output_dir>/<ledger_file>`, anchored at the current
/// working directory when relative, then cleaned lexically. Nothing on disk
/// is inspected, so symlinks are not followed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerPathResolver {
    output_dir: Option<PathBuf>,
    ledger_file: PathBuf,
}

impl LedgerPathResolver {
    pub fn new(output_dir: Option<PathBuf>, ledger_file: impl Into<PathBuf>) -> Self {
        Self {
            output_dir,
            ledger_file: ledger_file.into(),
        }
    }

    pub fn from_config(config: &LedgerConfig) -> Self {
        Self::new(config.output_dir.clone(), config.ledger_file.clone())
    }

    /// Resolve against the process's current working directory.
    pub fn resolve(&self) -> Result<PathBuf> {
        let cwd = env::current_dir().map_err(LedgerError::CurrentDir)?;
        self.resolve_from(&cwd)
    }

    /// Resolve against an explicit base directory.
    pub fn resolve_from(&self, cwd: &Path) -> Result<PathBuf> {
        let base = match self.output_dir.as_deref() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                if contains_nul(dir) {
                    return Err(LedgerError::InvalidPath(dir.to_path_buf()));
                }
                cwd.join(dir)
            }
            _ => cwd.to_path_buf(),
        };
        if contains_nul(&self.ledger_file) {
            return Err(LedgerError::InvalidPath(self.ledger_file.clone()));
        }
        Ok(normalize(&base.join(&self.ledger_file)))
    }
}

fn contains_nul(path: &Path) -> bool {
    path.to_string_lossy().contains('\0')
}

/// Lexically clean a path: drop `.`, collapse separators, and resolve `..`
/// against preceding components. `..` never climbs above the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let at_root = matches!(
                    out.components().next_back(),
                    None | Some(Component::RootDir | Component::Prefix(_))
                );
                let after_parent =
                    matches!(out.components().next_back(), Some(Component::ParentDir));
                if at_root && out.has_root() {
                    continue;
                }
                if at_root || after_parent {
                    out.push("..");
                } else {
                    out.pop();
                }
            }
            Component::Normal(name) => out.push(name),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}
