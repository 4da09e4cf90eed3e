//! In-memory blob medium for tests and embedding
//!
//! Mirrors the filesystem medium's contract over a plain map, and counts
//! create calls so tests can assert that the dedup short-circuit performs
//! zero medium writes.

use crate::medium::{Medium, ReadSeek};
use crate::{Error, Key, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

type BlobMap = Arc<RwLock<HashMap<Key, Vec<u8>>>>;

/// Blob medium backed by an in-process map
#[derive(Default)]
pub struct MemMedium {
    blobs: BlobMap,
    write_count: AtomicU64,
}

impl MemMedium {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of objects currently stored
    pub fn object_count(&self) -> usize {
        self.blobs.read().len()
    }

    /// Number of create calls observed since construction
    pub fn write_count(&self) -> u64 {
        self.write_count.load(Ordering::SeqCst)
    }
}

/// Writable handle that commits its buffer into the map on flush (and again
/// on drop, in case the caller forgot).
struct MemWriter {
    key: Key,
    buf: Vec<u8>,
    blobs: BlobMap,
}

impl MemWriter {
    fn commit(&self) {
        self.blobs.write().insert(self.key, self.buf.clone());
    }
}

impl Write for MemWriter {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.commit();
        Ok(())
    }
}

impl Drop for MemWriter {
    fn drop(&mut self) {
        self.commit();
    }
}

impl Medium for MemMedium {
    fn exists(&self, key: &Key) -> Result<bool> {
        Ok(self.blobs.read().contains_key(key))
    }

    fn create(&self, key: &Key) -> Result<Box<dyn Write + Send>> {
        if self.blobs.read().contains_key(key) {
            return Err(Error::AlreadyExists(key.to_hex()));
        }
        self.write_count.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemWriter {
            key: *key,
            buf: Vec::new(),
            blobs: Arc::clone(&self.blobs),
        }))
    }

    fn open(&self, key: &Key) -> Result<Box<dyn ReadSeek>> {
        let data = self
            .blobs
            .read()
            .get(key)
            .cloned()
            .ok_or_else(|| Error::NotFound(key.to_hex()))?;
        Ok(Box::new(Cursor::new(data)))
    }

    fn remove(&self, key: &Key) -> Result<()> {
        self.blobs
            .write()
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound(key.to_hex()))
    }
}
