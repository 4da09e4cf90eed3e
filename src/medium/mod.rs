//! Blob medium - the addressable byte-storage backend
//!
//! The store talks to durable storage only through the [`Medium`] trait:
//! create/open/remove/exists by key. The default backend is the filesystem
//! ([`FsMedium`]); [`MemMedium`] backs tests and embedding.

mod fs;
mod memory;

pub use fs::FsMedium;
pub use memory::MemMedium;

use crate::{Key, Result};
use std::io::{Read, Seek, Write};

/// A readable, seekable blob handle.
///
/// Returned by [`Medium::open`]; released when dropped.
pub trait ReadSeek: Read + Seek + Send {}

impl<T: Read + Seek + Send> ReadSeek for T {}

/// Durable, addressable byte storage with existence checks.
///
/// Implementations must be safe for concurrent callers: each method is an
/// independent request, and the store holds no lock around them. `create`
/// uses create-new semantics so a racing duplicate write surfaces as
/// [`Error::AlreadyExists`](crate::Error::AlreadyExists) rather than
/// clobbering in-flight data.
pub trait Medium: Send + Sync {
    /// True iff an object named `key` is present.
    fn exists(&self, key: &Key) -> Result<bool>;

    /// Create a new object and return a writable handle.
    ///
    /// Fails with `AlreadyExists` if the key is already present. The handle
    /// must be flushed before drop to guarantee the bytes are committed.
    fn create(&self, key: &Key) -> Result<Box<dyn Write + Send>>;

    /// Open an existing object for reading. Fails with `NotFound` if absent.
    fn open(&self, key: &Key) -> Result<Box<dyn ReadSeek>>;

    /// Remove an object. Fails with `NotFound` if absent.
    fn remove(&self, key: &Key) -> Result<()>;
}
