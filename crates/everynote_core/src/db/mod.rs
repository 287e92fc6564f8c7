//! SQLite bootstrap for the key-value persistence backend.
//!
//! # Responsibility
//! - Open and configure SQLite connections for EveryNote storage.
//! - Apply schema migrations before a connection is handed out.
//!
//! # Invariants
//! - Migration version is tracked via `PRAGMA user_version`.
//! - No storage code touches application data before migrations succeed.
//!
//! # See also
//! - docs/architecture/persistence.md

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    /// Transport or SQL failure reported by SQLite itself.
    Sqlite(rusqlite::Error),
    /// The file on disk was stamped by a newer build of this crate.
    NewerSchema { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::NewerSchema { found, supported } => write!(
                f,
                "database schema version {found} is newer than this build supports ({supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::NewerSchema { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
