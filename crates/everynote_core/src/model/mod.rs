//! Domain records for categories and notes.
//!
//! # Responsibility
//! - Define the canonical note shape shared by store and persistence.
//! - Own the reserved-category and seed-category constants.
//!
//! # Invariants
//! - A category's identity is its exact (case-sensitive) name.
//! - `Note` field names are the persisted wire shape and must stay stable.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod note;
