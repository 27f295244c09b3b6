//! Durable key/value storage for the session record. The record lives under two
//! fixed keys: the raw bearer token and the serialized profile. Implementations
//! are synchronous, matching how the session store treats storage as a local
//! side effect rather than a network call.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::{fmt, io, path::PathBuf};
use thiserror::Error;

/// Key holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";
/// Key holding the serialized profile of the signed-in worker.
pub const USER_KEY: &str = "user";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O failure on {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("corrupt session file {}: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("session storage lock poisoned")]
    Poisoned,
}

pub trait SessionStorage: Send + Sync + fmt::Debug {
    /// Returns the stored value for `key`, if any.
    ///
    /// # Errors
    /// Returns `StorageError` when the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns `StorageError` when the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`; removing a missing key is not an error.
    ///
    /// # Errors
    /// Returns `StorageError` when the backing store cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
