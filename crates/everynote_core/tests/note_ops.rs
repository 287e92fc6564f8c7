use std::sync::Arc;

use everynote_core::{MemoryKeyValueStore, NoteStore, StoreError, DEFAULT_CATEGORY};

fn fresh_store() -> NoteStore {
    NoteStore::new(Arc::new(MemoryKeyValueStore::new()))
}

#[tokio::test]
async fn blank_content_never_changes_the_collection() {
    let mut store = fresh_store();
    let existing = store
        .save_note("keep me", "General", None)
        .unwrap()
        .unwrap();

    for blank in ["", "   ", " \n\t "] {
        assert!(matches!(
            store.save_note(blank, "General", None),
            Err(StoreError::EmptyContent)
        ));
        assert!(matches!(
            store.save_note(blank, "General", Some(existing.id)),
            Err(StoreError::EmptyContent)
        ));
    }

    assert_eq!(store.notes().len(), 1);
    assert_eq!(store.notes()[0].content, "keep me");
    store.close().await;
}

#[tokio::test]
async fn new_notes_prepend_with_fresh_unique_ids() {
    let mut store = fresh_store();

    let first = store.save_note("first", "General", None).unwrap().unwrap();
    let second = store.save_note("second", "General", None).unwrap().unwrap();
    let third = store.save_note("third", "General", None).unwrap().unwrap();

    let ids: Vec<_> = store.notes().iter().map(|note| note.id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
    assert!(third.id > second.id && second.id > first.id);
    assert!(!third.date.is_empty());
    store.close().await;
}

#[tokio::test]
async fn content_is_stored_exactly_as_entered() {
    let mut store = fresh_store();

    let note = store
        .save_note("  keep my spacing \n", "General", None)
        .unwrap()
        .unwrap();

    assert_eq!(note.content, "  keep my spacing \n");
    assert_eq!(store.notes()[0].content, "  keep my spacing \n");
    store.close().await;
}

#[tokio::test]
async fn saving_into_an_unknown_category_is_rejected() {
    let mut store = fresh_store();

    let err = store.save_note("orphan", "Ghost", None).unwrap_err();

    assert!(matches!(err, StoreError::UnknownCategory(name) if name == "Ghost"));
    assert!(store.notes().is_empty());
    store.close().await;
}

#[tokio::test]
async fn updating_keeps_id_date_and_position() {
    let mut store = fresh_store();
    let first = store.save_note("first", "General", None).unwrap().unwrap();
    let second = store.save_note("second", "General", None).unwrap().unwrap();
    let third = store.save_note("third", "General", None).unwrap().unwrap();

    store.edit_note(second.id).unwrap();
    let updated = store
        .save_note("second, revised", "Meeting", Some(second.id))
        .unwrap()
        .unwrap();

    assert_eq!(updated.id, second.id);
    assert_eq!(updated.date, second.date);
    assert_eq!(updated.content, "second, revised");
    assert_eq!(updated.category, "Meeting");

    let ids: Vec<_> = store.notes().iter().map(|note| note.id).collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
    assert!(store.editing().is_none());
    store.close().await;
}

#[tokio::test]
async fn edit_note_exposes_the_draft_and_moves_selection() {
    let mut store = fresh_store();
    store.add_category("Work").unwrap();
    let note = store.save_note("work item", "Work", None).unwrap().unwrap();
    store.select_category("General");

    let draft = store.edit_note(note.id).unwrap();

    assert_eq!(draft.note_id, note.id);
    assert_eq!(draft.content, "work item");
    assert_eq!(draft.category, "Work");
    assert_eq!(store.selected_category(), "Work");
    assert_eq!(store.editing(), Some(&draft));
    store.close().await;
}

#[tokio::test]
async fn editing_an_absent_note_is_a_noop() {
    let mut store = fresh_store();

    assert!(store.edit_note(424242).is_none());
    assert!(store.editing().is_none());
    store.close().await;
}

#[tokio::test]
async fn edit_then_delete_clears_the_cursor() {
    let mut store = fresh_store();
    let note = store.save_note("short lived", "General", None).unwrap().unwrap();

    store.edit_note(note.id).unwrap();
    assert!(store.delete_note(note.id));

    assert!(store.editing().is_none());
    assert!(store.notes().is_empty());
    store.close().await;
}

#[tokio::test]
async fn deleting_an_unrelated_note_keeps_the_cursor() {
    let mut store = fresh_store();
    let kept = store.save_note("kept", "General", None).unwrap().unwrap();
    let removed = store.save_note("removed", "General", None).unwrap().unwrap();

    store.edit_note(kept.id).unwrap();
    assert!(store.delete_note(removed.id));

    assert_eq!(store.editing().map(|draft| draft.note_id), Some(kept.id));
    store.close().await;
}

#[tokio::test]
async fn deleting_an_absent_note_is_a_noop() {
    let mut store = fresh_store();
    store.save_note("still here", "General", None).unwrap();

    assert!(!store.delete_note(999_999));

    assert_eq!(store.notes().len(), 1);
    store.close().await;
}

#[tokio::test]
async fn deleting_the_edited_id_clears_the_cursor_even_when_the_note_is_gone() {
    let mut store = fresh_store();
    store.add_category("Work").unwrap();
    let doomed = store.save_note("work item", "Work", None).unwrap().unwrap();
    store.edit_note(doomed.id).unwrap();

    // The cascade already removed the note but left the cursor behind.
    store.delete_category("Work").unwrap();
    assert_eq!(store.editing().map(|draft| draft.note_id), Some(doomed.id));

    assert!(!store.delete_note(doomed.id));

    assert!(store.editing().is_none());
    store.close().await;
}

#[tokio::test]
async fn saving_with_a_stale_editing_id_changes_nothing() {
    let mut store = fresh_store();
    store.save_note("only note", "General", None).unwrap();

    let outcome = store.save_note("revived?", "General", Some(424242)).unwrap();

    assert!(outcome.is_none());
    assert_eq!(store.notes().len(), 1);
    assert_eq!(store.notes()[0].content, "only note");
    store.close().await;
}

#[tokio::test]
async fn cascade_leaves_cursor_for_stale_save_to_clear() {
    let mut store = fresh_store();
    store.add_category("Work").unwrap();
    let doomed = store.save_note("work item", "Work", None).unwrap().unwrap();
    store.edit_note(doomed.id).unwrap();

    // The cascade removes the note but deliberately leaves the cursor; the
    // next save against the vanished target resolves it.
    store.delete_category("Work").unwrap();
    assert_eq!(store.editing().map(|draft| draft.note_id), Some(doomed.id));

    let outcome = store
        .save_note("reborn?", "General", Some(doomed.id))
        .unwrap();

    assert!(outcome.is_none());
    assert!(store.editing().is_none());
    assert!(store.notes().is_empty());
    store.close().await;
}

#[tokio::test]
async fn select_category_sets_the_cursor() {
    let mut store = fresh_store();
    assert_eq!(store.selected_category(), DEFAULT_CATEGORY);

    store.select_category("Meeting");

    assert_eq!(store.selected_category(), "Meeting");
    store.close().await;
}
