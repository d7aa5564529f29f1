//! Key-value byte store abstraction.
//!
//! # Responsibility
//! - Model the device-local storage the planner persists into: whole byte
//!   values addressed by string keys.
//! - Let callers inject either the durable SQLite store or an in-memory fake.
//! - Own the error vocabulary shared by store backends and database bootstrap.
//!
//! # Invariants
//! - `set` replaces the whole value for a key; there are no partial writes.
//! - Keys are independent: writing one key never touches another.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure raised while opening, reading or writing the planner store.
#[derive(Debug)]
pub enum StoreError {
    /// SQLite rejected a `kv_entries` read/write or a bootstrap statement.
    Sqlite(rusqlite::Error),
    /// Database file was written by a newer planner build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Connection has not been migrated to the schema this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Collection could not be serialized to JSON.
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "planner store sqlite failure: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "planner store schema {db_version} was written by a newer build (supports up to {latest_supported})"
            ),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it with `open_db`"
            ),
            Self::Encode(err) => write!(f, "failed to encode collection: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::UninitializedConnection { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Synchronous whole-value key-value storage.
pub trait KeyValueStore {
    /// Returns the stored bytes, or `None` when the key was never written.
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;
    /// Overwrites the value at `key`.
    fn set(&self, key: &str, value: &[u8]) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        (**self).set(key, value)
    }
}
