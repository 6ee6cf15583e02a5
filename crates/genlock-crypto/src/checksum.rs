use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::ChecksumError;

/// Digest length of the ledger hash in bytes.
pub const CHECKSUM_LEN: usize = 32;

/// SHA-256 content checksum of a generated file.
///
/// Rendered as 64 lowercase hex characters. Identical bytes always produce
/// the same checksum, so a recorded value can be compared against a fresh
/// one computed later by any tool using the same algorithm.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Checksum([u8; CHECKSUM_LEN]);

impl Checksum {
    /// Wrap a pre-computed digest.
    pub fn from_digest(digest: [u8; CHECKSUM_LEN]) -> Self {
        Self(digest)
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; CHECKSUM_LEN] {
        &self.0
    }

    /// Lowercase hex encoding, as written to the ledger.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string. Accepts either case.
    pub fn from_hex(s: &str) -> Result<Self, ChecksumError> {
        let bytes = hex::decode(s).map_err(|e| ChecksumError::InvalidHex(e.to_string()))?;
        let digest: [u8; CHECKSUM_LEN] = bytes.as_slice().try_into().map_err(|_| {
            ChecksumError::InvalidLength {
                expected: CHECKSUM_LEN,
                actual: bytes.len(),
            }
        })?;
        Ok(Self(digest))
    }
}

impl fmt::Debug for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Checksum({})", self.short_hex())
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Checksum {
    type Err = ChecksumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Checksum an in-memory buffer.
pub fn checksum_bytes(data: &[u8]) -> Checksum {
    Checksum(Sha256::digest(data).into())
}

/// Stream a reader to EOF through SHA-256.
pub fn checksum_reader<R: Read>(mut reader: R) -> io::Result<Checksum> {
    let mut hasher = Sha256::new();
    io::copy(&mut reader, &mut hasher)?;
    Ok(Checksum(hasher.finalize().into()))
}

/// Checksum the full contents of the file at `path`.
///
/// The file is streamed rather than loaded, so memory use is independent of
/// file size. Open and read failures are returned unchanged so callers can
/// attach their own context.
pub fn checksum_file(path: &Path) -> io::Result<Checksum> {
    let file = File::open(path)?;
    checksum_reader(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn empty_input_matches_known_digest() {
        assert_eq!(checksum_bytes(b"").to_hex(), EMPTY_SHA256);
    }

    #[test]
    fn known_value() {
        assert_eq!(
            checksum_bytes(b"hello world").to_hex(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn file_checksum_matches_bytes_checksum() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"package foo\n").unwrap();
        file.flush().unwrap();

        let from_file = checksum_file(file.path()).unwrap();
        assert_eq!(from_file, checksum_bytes(b"package foo\n"));
    }

    #[test]
    fn file_larger_than_copy_buffer() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let data = vec![7u8; 64 * 1024 + 13];
        file.write_all(&data).unwrap();
        file.flush().unwrap();

        assert_eq!(checksum_file(file.path()).unwrap(), checksum_bytes(&data));
    }

    #[test]
    fn hashing_twice_is_identical() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"test data").unwrap();
        file.flush().unwrap();

        let first = checksum_file(file.path()).unwrap();
        let second = checksum_file(file.path()).unwrap();
        assert_eq!(first.to_hex(), second.to_hex());
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = checksum_file(&dir.path().join("absent.go")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn hex_is_64_lowercase_chars() {
        let hex = checksum_bytes(b"foo").to_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn from_hex_accepts_uppercase() {
        let sum = checksum_bytes(b"foo");
        let parsed: Checksum = sum.to_hex().to_uppercase().parse().unwrap();
        assert_eq!(parsed, sum);
    }

    #[test]
    fn from_hex_rejects_bad_input() {
        assert!(matches!(
            Checksum::from_hex("zz"),
            Err(ChecksumError::InvalidHex(_))
        ));
        assert_eq!(
            Checksum::from_hex("abcd"),
            Err(ChecksumError::InvalidLength {
                expected: 32,
                actual: 2
            })
        );
    }

    #[test]
    fn debug_uses_short_hex() {
        let sum = checksum_bytes(b"");
        assert_eq!(format!("{sum:?}"), "Checksum(e3b0c442)");
    }

    proptest! {
        #[test]
        fn reader_and_bytes_agree(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
            prop_assert_eq!(checksum_reader(data.as_slice()).unwrap(), checksum_bytes(&data));
        }

        #[test]
        fn hex_roundtrip(digest in any::<[u8; 32]>()) {
            let sum = Checksum::from_digest(digest);
            prop_assert_eq!(Checksum::from_hex(&sum.to_hex()).unwrap(), sum);
        }
    }
}
