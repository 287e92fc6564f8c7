//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted note record and its identifier type.
//! - Provide the reserved default category and the seed category set.
//!
//! # Invariants
//! - `id` is unique for the lifetime of a note collection and never reused.
//! - `date` is assigned at creation and never rewritten, including on edit.
//! - Serialized field names (`id`, `content`, `category`, `date`) are the
//!   stored data layout and must not change.
//!
//! # See also
//! - docs/architecture/data-model.md

use serde::{Deserialize, Serialize};

/// Creation-time note identifier, derived from epoch milliseconds.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = i64;

/// Reserved category that is always present and never deletable.
///
/// It doubles as the fallback selection target when the selected category
/// disappears in a cascade.
pub const DEFAULT_CATEGORY: &str = "General";

/// Seed category set used when no readable persisted data exists.
pub fn default_categories() -> Vec<String> {
    vec![
        DEFAULT_CATEGORY.to_string(),
        "Meeting".to_string(),
        "To-Do".to_string(),
    ]
}

/// A single note as held in memory and persisted to the adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Unique, monotonically increasing identifier assigned at creation.
    pub id: NoteId,
    /// Free-form body text, stored exactly as entered.
    pub content: String,
    /// Name of an existing category at the time of the operation.
    pub category: String,
    /// Human-readable creation date; untouched by later edits.
    pub date: String,
}

impl Note {
    /// Creates a note record from already-validated parts.
    pub fn new(
        id: NoteId,
        content: impl Into<String>,
        category: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            id,
            content: content.into(),
            category: category.into(),
            date: date.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{default_categories, Note, DEFAULT_CATEGORY};

    #[test]
    fn seed_categories_start_with_the_reserved_default() {
        let seed = default_categories();
        assert_eq!(seed[0], DEFAULT_CATEGORY);
        assert_eq!(seed, vec!["General", "Meeting", "To-Do"]);
    }

    #[test]
    fn note_serializes_with_stable_field_names() {
        let note = Note::new(1712000000000, "buy milk", "General", "2026-08-22");
        let json = serde_json::to_string(&note).unwrap();
        assert_eq!(
            json,
            r#"{"id":1712000000000,"content":"buy milk","category":"General","date":"2026-08-22"}"#
        );
    }

    #[test]
    fn note_deserializes_from_stored_layout() {
        let json = r#"{"id":42,"content":"standup","category":"Meeting","date":"1/2/2026"}"#;
        let note: Note = serde_json::from_str(json).unwrap();
        assert_eq!(note.id, 42);
        assert_eq!(note.content, "standup");
        assert_eq!(note.category, "Meeting");
        assert_eq!(note.date, "1/2/2026");
    }
}
