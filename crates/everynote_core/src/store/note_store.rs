//! Note store operations and invariant enforcement.
//!
//! # Responsibility
//! - Apply every category/note mutation against the in-memory collections.
//! - Load persisted state once at startup; persist after each mutation.
//!
//! # Invariants
//! - Every note's `category` names an existing category; deleting a category
//!   cascades to its notes in the same operation.
//! - `General` is always present and never a cascade target.
//! - Note ids are unique and strictly increasing in creation order.
//! - The selected category always names an existing category.
//!
//! # See also
//! - docs/architecture/data-model.md

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use chrono::{Local, Utc};
use log::{info, warn};
use serde::de::DeserializeOwned;

use super::persister::{Persister, SaveSnapshot};
use super::{CATEGORIES_KEY, NOTES_KEY};
use crate::kv::KeyValueStore;
use crate::model::note::{default_categories, Note, NoteId, DEFAULT_CATEGORY};

pub type StoreResult<T> = Result<T, StoreError>;

/// Validation rejections surfaced to the caller.
///
/// Every variant leaves the store untouched. The caller decides which of
/// them become user-facing notices and which stay silent.
#[derive(Debug)]
pub enum StoreError {
    /// Note content is empty once trimmed.
    EmptyContent,
    /// Category name is empty once trimmed.
    EmptyCategoryName,
    /// A category with this exact name already exists.
    DuplicateCategory(String),
    /// The reserved default category cannot be deleted.
    ProtectedCategory(String),
    /// The target category is not in the category set.
    UnknownCategory(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "note content is empty"),
            Self::EmptyCategoryName => write!(f, "category name is empty"),
            Self::DuplicateCategory(name) => write!(f, "category already exists: {name}"),
            Self::ProtectedCategory(name) => write!(f, "cannot delete default category: {name}"),
            Self::UnknownCategory(name) => write!(f, "unknown category: {name}"),
        }
    }
}

impl Error for StoreError {}

/// Draft exposed while a note is being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub note_id: NoteId,
    pub content: String,
    pub category: String,
}

/// In-memory owner of the note and category collections.
///
/// Single logical writer: mutations apply to memory synchronously and each
/// schedules one fire-and-forget snapshot write. [`NoteStore::load`] and
/// [`NoteStore::close`] are the only suspending operations.
pub struct NoteStore {
    adapter: Arc<dyn KeyValueStore>,
    persister: Persister,
    categories: Vec<String>,
    notes: Vec<Note>,
    selected: String,
    editing: Option<EditDraft>,
    last_id: NoteId,
    loaded: bool,
}

impl NoteStore {
    /// Creates a store seeded with the default categories.
    ///
    /// Spawns the persistence writer, so this must run inside a Tokio
    /// runtime. Call [`NoteStore::load`] once before rendering from the
    /// store.
    pub fn new(adapter: Arc<dyn KeyValueStore>) -> Self {
        let persister = Persister::spawn(Arc::clone(&adapter));
        Self {
            adapter,
            persister,
            categories: default_categories(),
            notes: Vec::new(),
            selected: DEFAULT_CATEGORY.to_string(),
            editing: None,
            last_id: 0,
            loaded: false,
        }
    }

    /// Category names in insertion order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Notes, newest first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Name of the currently selected category.
    pub fn selected_category(&self) -> &str {
        &self.selected
    }

    /// Draft of the note being edited, when the cursor is set.
    pub fn editing(&self) -> Option<&EditDraft> {
        self.editing.as_ref()
    }

    /// Loads persisted state, replacing the seeded collections.
    ///
    /// Absent or unreadable payloads fall back to defaults per key, and the
    /// loaded state is repaired to the store invariants; load itself never
    /// fails. Runs once per store; repeat calls are logged no-ops.
    pub async fn load(&mut self) {
        if self.loaded {
            warn!("event=store_load module=store status=skipped reason=already_loaded");
            return;
        }
        self.loaded = true;

        self.categories = self
            .read_collection(CATEGORIES_KEY)
            .await
            .unwrap_or_else(default_categories);
        self.notes = self.read_collection(NOTES_KEY).await.unwrap_or_default();

        self.repair_loaded_state();
        self.selected = DEFAULT_CATEGORY.to_string();
        self.editing = None;
        self.last_id = self.notes.iter().map(|note| note.id).max().unwrap_or(0);

        info!(
            "event=store_load module=store status=ok categories={} notes={}",
            self.categories.len(),
            self.notes.len()
        );
    }

    /// Shuts the store down after draining queued snapshot writes.
    ///
    /// Dropping the store instead still flushes best-effort, but only
    /// `close` guarantees the writes have landed when it returns.
    pub async fn close(self) {
        self.persister.close().await;
        info!("event=store_close module=store status=ok");
    }

    /// Adds a category named `name` (stored trimmed).
    pub fn add_category(&mut self, name: &str) -> StoreResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyCategoryName);
        }
        if self.categories.iter().any(|category| category == name) {
            return Err(StoreError::DuplicateCategory(name.to_string()));
        }

        self.categories.push(name.to_string());
        self.schedule_save();
        Ok(())
    }

    /// Removes `name` and every note filed under it, in one operation.
    ///
    /// Resets the selection to the default category when it pointed at the
    /// removed name. Returns `Ok(false)` when the category does not exist.
    /// Call only after the user has confirmed: the cascade is not undoable.
    pub fn delete_category(&mut self, name: &str) -> StoreResult<bool> {
        if name == DEFAULT_CATEGORY {
            return Err(StoreError::ProtectedCategory(name.to_string()));
        }
        let Some(position) = self.categories.iter().position(|category| category == name)
        else {
            return Ok(false);
        };

        self.categories.remove(position);
        self.notes.retain(|note| note.category != name);
        if self.selected == name {
            self.selected = DEFAULT_CATEGORY.to_string();
        }

        self.schedule_save();
        Ok(true)
    }

    /// Sets the selected-category cursor.
    pub fn select_category(&mut self, name: &str) {
        self.selected = name.to_string();
    }

    /// Creates a note, or updates the one named by `editing_id`.
    ///
    /// Content must survive trimming but is stored exactly as entered.
    /// Updating rewrites only content and category; id, date, and position
    /// stay put, and the editing cursor is cleared. Returns `Ok(None)` when
    /// `editing_id` no longer names a note: the target is gone, the cursor
    /// is cleared, and nothing is written.
    pub fn save_note(
        &mut self,
        content: &str,
        category: &str,
        editing_id: Option<NoteId>,
    ) -> StoreResult<Option<Note>> {
        if content.trim().is_empty() {
            return Err(StoreError::EmptyContent);
        }
        if !self.categories.iter().any(|existing| existing == category) {
            return Err(StoreError::UnknownCategory(category.to_string()));
        }

        if let Some(id) = editing_id {
            self.editing = None;
            let Some(note) = self.notes.iter_mut().find(|note| note.id == id) else {
                return Ok(None);
            };
            note.content = content.to_string();
            note.category = category.to_string();
            let updated = note.clone();
            self.schedule_save();
            return Ok(Some(updated));
        }

        let note = Note::new(self.next_note_id(), content, category, today());
        self.notes.insert(0, note.clone());
        self.schedule_save();
        Ok(Some(note))
    }

    /// Starts editing the note named by `id`.
    ///
    /// Sets the editing cursor, moves the selection to the note's category,
    /// and returns the draft for the caller's input surface. Absent ids are
    /// no-ops. Pure state transition; nothing is persisted.
    pub fn edit_note(&mut self, id: NoteId) -> Option<EditDraft> {
        let note = self.notes.iter().find(|note| note.id == id)?;
        let draft = EditDraft {
            note_id: note.id,
            content: note.content.clone(),
            category: note.category.clone(),
        };
        self.selected = note.category.clone();
        self.editing = Some(draft.clone());
        Some(draft)
    }

    /// Removes the note named by `id`, returning whether anything changed.
    ///
    /// Clears the editing cursor and draft whenever they point at `id`; the
    /// cursor transition keys on the id alone, so it fires even when the
    /// note is already gone. Call only after the user has confirmed.
    pub fn delete_note(&mut self, id: NoteId) -> bool {
        if self.editing.as_ref().is_some_and(|draft| draft.note_id == id) {
            self.editing = None;
        }

        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        if self.notes.len() == before {
            return false;
        }

        self.schedule_save();
        true
    }

    async fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.adapter.get(key).await {
            Ok(raw) => raw?,
            Err(err) => {
                warn!("event=store_load module=store key={key} status=read_error err={err}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("event=store_load module=store key={key} status=parse_error err={err}");
                None
            }
        }
    }

    /// Brings foreign persisted state back to the store invariants.
    fn repair_loaded_state(&mut self) {
        if !self
            .categories
            .iter()
            .any(|category| category == DEFAULT_CATEGORY)
        {
            self.categories.insert(0, DEFAULT_CATEGORY.to_string());
            warn!("event=store_load module=store status=repaired reason=missing_default_category");
        }

        // A crash between the two key writes can strand notes whose category
        // was already cascade-deleted; finish that cascade here.
        let before = self.notes.len();
        let categories = &self.categories;
        self.notes
            .retain(|note| categories.iter().any(|category| category == &note.category));
        let dropped = before - self.notes.len();
        if dropped > 0 {
            warn!(
                "event=store_load module=store status=repaired reason=orphaned_notes dropped={dropped}"
            );
        }
    }

    fn schedule_save(&self) {
        let categories = match serde_json::to_string(&self.categories) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(
                    "event=store_save module=store key={CATEGORIES_KEY} status=encode_error err={err}"
                );
                return;
            }
        };
        let notes = match serde_json::to_string(&self.notes) {
            Ok(payload) => payload,
            Err(err) => {
                warn!("event=store_save module=store key={NOTES_KEY} status=encode_error err={err}");
                return;
            }
        };
        self.persister.schedule(SaveSnapshot { categories, notes });
    }

    fn next_note_id(&mut self) -> NoteId {
        // Creation timestamps are the id space; bump past the newest known
        // id when the clock would repeat or run behind it. The bump
        // saturates: a loaded payload can sit at the very top of the space.
        let id = Utc::now()
            .timestamp_millis()
            .max(self.last_id.saturating_add(1));
        self.last_id = id;
        id
    }
}

fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}
