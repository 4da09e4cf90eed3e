//! Content-addressed key type using BLAKE2b-256
//!
//! The key is both the blob's identity and its on-medium name. The digest
//! algorithm and width are a persisted-format contract: changing either
//! invalidates every key already handed out.

use crate::{Error, Result, KEY_HEX_LEN, KEY_SIZE};
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use std::fmt;
use std::io::{Read, Seek, SeekFrom};
use std::str::FromStr;

type Blake2b256 = Blake2b<U32>;

/// A 32-byte BLAKE2b digest used for content addressing
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key([u8; KEY_SIZE]);

impl Key {
    /// Create a key from raw digest bytes
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Key(bytes)
    }

    /// Hash an in-memory payload
    pub fn digest(data: &[u8]) -> Self {
        let mut hasher = Blake2b256::new();
        hasher.update(data);
        Key(hasher.finalize().into())
    }

    /// Hash a stream, then rewind it to the start.
    ///
    /// The stream is consumed to EOF to compute the digest and seeked back to
    /// position zero, so the caller can hand the same handle straight to the
    /// write path without re-acquiring it.
    pub fn digest_reader<R: Read + Seek>(reader: &mut R) -> Result<Self> {
        let mut hasher = Blake2b256::new();
        std::io::copy(reader, &mut hasher).map_err(Error::StreamRead)?;
        reader
            .seek(SeekFrom::Start(0))
            .map_err(Error::StreamSeek)?;
        Ok(Key(hasher.finalize().into()))
    }

    /// Get the raw digest bytes
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    /// Render as lowercase hex (64 chars)
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a hex string; must be exactly 64 hex characters
    pub fn from_hex(s: &str) -> Result<Self> {
        if s.len() != KEY_HEX_LEN {
            return Err(Error::InvalidKey(s.to_string()));
        }
        let bytes = hex::decode(s).map_err(|_| Error::InvalidKey(s.to_string()))?;
        let mut arr = [0u8; KEY_SIZE];
        arr.copy_from_slice(&bytes);
        Ok(Key(arr))
    }

    /// Short prefix for log lines (first 7 chars, like git)
    pub fn short(&self) -> String {
        self.to_hex()[..7].to_string()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self.short())
    }
}

impl FromStr for Key {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Key::from_hex(s)
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_digest_deterministic() {
        let k1 = Key::digest(b"hello");
        let k2 = Key::digest(b"hello");
        let k3 = Key::digest(b"world");

        assert_eq!(k1, k2);
        assert_ne!(k1, k3);
    }

    #[test]
    fn test_reference_vectors() {
        // Regression anchors: these values are part of the persisted-format
        // contract and must never change.
        assert_eq!(
            Key::digest(b"  ?HelloWorldTest!  ").to_hex(),
            "1fe569ab5a74d6bf7c7a783fcc61dfc30cba304628e31547c19135dd24f040d5"
        );
        assert_eq!(
            Key::digest(b"  Test  ").to_hex(),
            "966d77a20be11045ac1ffa0f42f8a97569e8ba70966b287575899d875bf62b9e"
        );
        assert_eq!(
            Key::digest(b"").to_hex(),
            "0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8"
        );
    }

    #[test]
    fn test_digest_reader_rewinds() {
        let mut cursor = Cursor::new(b"  ?HelloWorldTest!  ".to_vec());
        let key = Key::digest_reader(&mut cursor).unwrap();

        assert_eq!(
            key.to_hex(),
            "1fe569ab5a74d6bf7c7a783fcc61dfc30cba304628e31547c19135dd24f040d5"
        );
        // Stream must be back at the start, ready for the write path.
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn test_digest_reader_matches_digest() {
        let data = b"The quick brown fox jumps over the lazy dog";
        let mut cursor = Cursor::new(data.to_vec());
        assert_eq!(Key::digest_reader(&mut cursor).unwrap(), Key::digest(data));
    }

    #[test]
    fn test_hex_roundtrip() {
        let k1 = Key::digest(b"test data");
        let hex = k1.to_hex();
        assert_eq!(hex.len(), KEY_HEX_LEN);
        let k2 = Key::from_hex(&hex).unwrap();
        assert_eq!(k1, k2);
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        assert!(Key::from_hex("abc").is_err());
        assert!(Key::from_hex(&"z".repeat(64)).is_err());
        assert!(Key::from_hex(&"a".repeat(63)).is_err());
        assert!(Key::from_hex(&"a".repeat(65)).is_err());
    }

    #[test]
    fn test_short() {
        let k = Key::digest(b"test");
        assert_eq!(k.short().len(), 7);
    }
}
