//! # casket
//!
//! A minimal content-addressed blob store.
//!
//! Every blob is named by the BLAKE2b-256 digest of its own bytes: uploading
//! the same content twice yields the same key and stores one object, and a
//! key always resolves to exactly the bytes it was computed from.
//!
//! ## Core pieces
//!
//! - [`Key`]: the 32-byte content digest, rendered as 64 lowercase hex chars
//! - [`Medium`]: the addressable byte-storage backend (filesystem by default)
//! - [`ContentStore`]: Put/Get/Delete orchestration with dedup-on-write
//!
//! ## Example
//!
//! ```ignore
//! use casket::ContentStore;
//!
//! let store = ContentStore::open("/tmp/media")?;
//! let key = store.put_bytes(b"hello world")?;
//! let bytes = store.get_bytes(&key)?.expect("just stored");
//! ```

pub mod medium;
pub mod server;

mod error;
mod key;
mod store;

pub use error::{Error, Result};
pub use key::Key;
pub use medium::{FsMedium, Medium, MemMedium, ReadSeek};
pub use server::{serve, ServerConfig};
pub use store::ContentStore;

/// Digest width in bytes; part of the persisted-format contract
pub const KEY_SIZE: usize = 32;

/// Length of a key rendered as hex
pub const KEY_HEX_LEN: usize = 2 * KEY_SIZE;
