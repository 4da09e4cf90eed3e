//! Content-addressed blob store
//!
//! [`ContentStore`] orchestrates hashing, dedup-on-write, and hash-keyed
//! retrieval/deletion over an injected [`Medium`]. It holds no mutable state
//! beyond the medium reference, so a single instance is safe to share across
//! concurrent callers without locking.

use crate::medium::{FsMedium, Medium, ReadSeek};
use crate::{Error, Key, Result};
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use std::sync::Arc;

/// A store mapping content keys to blob bytes
///
/// The key for every blob is the BLAKE2b-256 digest of its content, so
/// identical uploads collapse to a single stored object and a key always
/// names exactly one byte sequence.
pub struct ContentStore {
    medium: Arc<dyn Medium>,
}

impl ContentStore {
    /// Open a filesystem-backed store rooted at `root`.
    ///
    /// The root directory is created if absent; permission or IO failures
    /// propagate.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let medium = FsMedium::open(root)?;
        Ok(ContentStore {
            medium: Arc::new(medium),
        })
    }

    /// Build a store over any blob medium
    pub fn with_medium(medium: Arc<dyn Medium>) -> Self {
        ContentStore { medium }
    }

    /// Store the stream's content, returning its key.
    ///
    /// The stream is consumed once to compute the key, rewound, then copied
    /// to the medium - unless an object with that key already exists, in
    /// which case the write is skipped entirely and the existing key is
    /// returned. A create collision from a racing identical upload is folded
    /// into success for the same reason.
    ///
    /// A failure mid-copy may leave a truncated object behind; the store
    /// does not roll it back.
    pub fn put<R: Read + Seek>(&self, src: &mut R) -> Result<Key> {
        let key = Key::digest_reader(src)?;

        if self.medium.exists(&key)? {
            tracing::debug!(key = %key.short(), "dedup hit, skipping write");
            return Ok(key);
        }

        let mut dst = match self.medium.create(&key) {
            Ok(dst) => dst,
            // Benign race: a concurrent put of identical content won.
            Err(Error::AlreadyExists(_)) => return Ok(key),
            Err(e) => return Err(e),
        };
        std::io::copy(src, &mut dst).map_err(Error::Write)?;
        dst.flush().map_err(Error::Write)?;

        tracing::debug!(key = %key.short(), "stored new blob");
        Ok(key)
    }

    /// Store an in-memory payload.
    ///
    /// Non-seekable sources (network bodies and the like) must be buffered
    /// by the caller first; this is the entry point for them.
    pub fn put_bytes(&self, data: &[u8]) -> Result<Key> {
        self.put(&mut Cursor::new(data))
    }

    /// Open the blob named by `key` for reading.
    ///
    /// Returns `Ok(None)` if no such blob exists - absence is an expected
    /// outcome, not an error. The caller owns the handle and may seek
    /// within it.
    pub fn get(&self, key: &Key) -> Result<Option<Box<dyn ReadSeek>>> {
        if !self.medium.exists(key)? {
            return Ok(None);
        }
        match self.medium.open(key) {
            Ok(reader) => Ok(Some(reader)),
            // Deleted between the exists check and the open; still absent.
            Err(Error::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Read the full blob into memory. `Ok(None)` if absent.
    pub fn get_bytes(&self, key: &Key) -> Result<Option<Vec<u8>>> {
        match self.get(key)? {
            Some(mut reader) => {
                let mut buf = Vec::new();
                reader.read_to_end(&mut buf).map_err(Error::Read)?;
                Ok(Some(buf))
            }
            None => Ok(None),
        }
    }

    /// Delete the blob named by `key`.
    ///
    /// Deleting an absent key is `Error::NotFound` - unlike Get, the caller
    /// asked for a state change that did not happen.
    pub fn delete(&self, key: &Key) -> Result<()> {
        self.medium.remove(key)?;
        tracing::debug!(key = %key.short(), "deleted blob");
        Ok(())
    }

    /// True iff a blob with this key is stored
    pub fn contains(&self, key: &Key) -> Result<bool> {
        self.medium.exists(key)
    }
}

impl Clone for ContentStore {
    fn clone(&self) -> Self {
        ContentStore {
            medium: Arc::clone(&self.medium),
        }
    }
}
