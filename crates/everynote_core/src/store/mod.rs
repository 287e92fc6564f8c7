//! Note store: in-memory owner of the persisted collections.
//!
//! # Responsibility
//! - Own categories, notes, and the transient cursors; expose every mutation.
//! - Schedule persistence after each successful mutation.
//!
//! # Invariants
//! - All state changes flow through [`note_store::NoteStore`].
//! - Exactly two adapter keys are ever written, fixed below.
//!
//! # See also
//! - docs/architecture/data-model.md
//! - docs/architecture/persistence.md

pub mod note_store;
mod persister;

pub use note_store::{EditDraft, NoteStore, StoreError, StoreResult};

/// Adapter key holding the serialized category list.
pub const CATEGORIES_KEY: &str = "@categories";

/// Adapter key holding the serialized note list.
pub const NOTES_KEY: &str = "@notes";
