//! Filesystem-backed blob medium
//!
//! Each blob lives at `<root>/<64-hex-key>` - a flat directory whose file
//! names are the content keys themselves.

use crate::medium::{Medium, ReadSeek};
use crate::{Error, Key, Result};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Blob medium backed by a directory on the local filesystem
pub struct FsMedium {
    root: PathBuf,
}

impl FsMedium {
    /// Open the medium rooted at `root`, creating the directory if needed.
    ///
    /// Creation is idempotent; permission or IO failures propagate.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        Ok(FsMedium { root })
    }

    /// Directory this medium stores blobs under
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn blob_path(&self, key: &Key) -> PathBuf {
        self.root.join(key.to_hex())
    }
}

impl Medium for FsMedium {
    fn exists(&self, key: &Key) -> Result<bool> {
        Ok(self.blob_path(key).try_exists()?)
    }

    fn create(&self, key: &Key) -> Result<Box<dyn Write + Send>> {
        let path = self.blob_path(key);
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| {
                if e.kind() == ErrorKind::AlreadyExists {
                    Error::AlreadyExists(key.to_hex())
                } else {
                    Error::Write(e)
                }
            })?;
        Ok(Box::new(file))
    }

    fn open(&self, key: &Key) -> Result<Box<dyn ReadSeek>> {
        let file = File::open(self.blob_path(key)).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::NotFound(key.to_hex())
            } else {
                Error::Read(e)
            }
        })?;
        Ok(Box::new(file))
    }

    fn remove(&self, key: &Key) -> Result<()> {
        std::fs::remove_file(self.blob_path(key)).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::NotFound(key.to_hex())
            } else {
                Error::Io(e)
            }
        })
    }
}
