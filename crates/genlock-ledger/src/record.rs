use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use genlock_crypto::Checksum;

use crate::error::{LedgerError, Result};

/// Separator between the declared path and the checksum on a ledger line.
pub const RECORD_SEPARATOR: &str = "::";

/// One ledger line: a generated file's declared path and its checksum.
///
/// Displayed without the trailing newline; the writer appends it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerRecord {
    pub path: PathBuf,
    pub checksum: Checksum,
}

impl LedgerRecord {
    pub fn new(path: impl Into<PathBuf>, checksum: Checksum) -> Self {
        Self {
            path: path.into(),
            checksum,
        }
    }

    /// The full line as written to disk, newline included.
    ///
    /// Fails when the path could not be read back from that line.
    pub fn to_line(&self) -> Result<String> {
        let path = line_path(&self.path)?;
        Ok(format!("{path}{RECORD_SEPARATOR}{}\n", self.checksum.to_hex()))
    }
}

/// The declared path as it appears on a ledger line.
///
/// Non-UTF-8 paths and paths containing a line break are rejected: the
/// first would be recorded under a different name, the second would split
/// the record and make the whole ledger unreadable.
pub(crate) fn line_path(path: &Path) -> Result<&str> {
    let unrepresentable = |reason: &str| LedgerError::UnrepresentablePath {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };
    let text = path
        .to_str()
        .ok_or_else(|| unrepresentable("path is not valid UTF-8"))?;
    if text.contains(['\n', '\r']) {
        return Err(unrepresentable("path contains a line break"));
    }
    Ok(text)
}

impl fmt::Display for LedgerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.path.display(),
            RECORD_SEPARATOR,
            self.checksum.to_hex()
        )
    }
}

impl FromStr for LedgerRecord {
    type Err = LedgerError;

    /// Parse `<path>::<hex>`. The split is on the last separator so paths
    /// containing `::` survive.
    fn from_str(line: &str) -> Result<Self> {
        let malformed = |reason: String| LedgerError::MalformedRecord {
            line: line.to_string(),
            reason,
        };
        let (path, hex) = line
            .rsplit_once(RECORD_SEPARATOR)
            .ok_or_else(|| malformed(format!("missing `{RECORD_SEPARATOR}` separator")))?;
        if path.is_empty() {
            return Err(malformed("empty path".to_string()));
        }
        let checksum = Checksum::from_hex(hex).map_err(|e| malformed(e.to_string()))?;
        Ok(Self::new(path, checksum))
    }
}

/// Read every record from a ledger file, in file order.
///
/// Blank lines (including the one after the final newline) are skipped.
pub fn read_records(path: &Path) -> Result<Vec<LedgerRecord>> {
    let text = fs::read_to_string(path).map_err(|source| LedgerError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    text.lines()
        .filter(|line| !line.is_empty())
        .map(str::parse)
        .collect()
}
