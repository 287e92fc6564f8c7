//! Persistence adapter: durable key-value storage for serialized collections.
//!
//! # Responsibility
//! - Define the async contract the note store persists through.
//! - Isolate storage backends from collection semantics.
//!
//! # Invariants
//! - Values are opaque blobs; implementations never inspect or validate them.
//! - `set` is durable on the production backend: a stored value survives
//!   process restart.
//!
//! # See also
//! - docs/architecture/persistence.md

use std::error::Error;
use std::fmt::{Display, Formatter};

use async_trait::async_trait;

use crate::db::DbError;

mod memory;
mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

pub type KvResult<T> = Result<T, KvError>;

#[derive(Debug)]
pub enum KvError {
    /// Connection bootstrap failed before the backend could serve requests.
    Db(DbError),
    /// SQLite rejected a read or write.
    Sqlite(rusqlite::Error),
    /// The backend cannot serve requests at all right now.
    Unavailable(String),
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Unavailable(reason) => write!(f, "storage backend unavailable: {reason}"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Sqlite(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for KvError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Async key-value contract the note store loads from and saves to.
///
/// Exactly two keys are in play at runtime; implementations must not assume
/// anything about key names or value shapes beyond UTF-8 text.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, or `None` when absent.
    async fn get(&self, key: &str) -> KvResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> KvResult<()>;
}
