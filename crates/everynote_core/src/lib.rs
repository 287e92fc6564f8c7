//! Core domain logic for EveryNote.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod kv;
pub mod logging;
pub mod model;
pub mod store;

pub use kv::{KeyValueStore, KvError, KvResult, MemoryKeyValueStore, SqliteKeyValueStore};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{default_categories, Note, NoteId, DEFAULT_CATEGORY};
pub use store::{
    EditDraft, NoteStore, StoreError, StoreResult, CATEGORIES_KEY, NOTES_KEY,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
