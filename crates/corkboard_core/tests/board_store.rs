use corkboard_core::{
    BoardGeometry, ColorKey, MemoryKeyValueStore, Note, NoteStore, NoteUpdate, Viewport,
    TITLE_MAX_CHARS,
};
use std::collections::HashSet;

fn geometry() -> BoardGeometry {
    BoardGeometry::new(Viewport::new(800.0, 600.0))
}

fn empty_store() -> NoteStore<MemoryKeyValueStore> {
    NoteStore::with_notes(Vec::new(), MemoryKeyValueStore::new(), geometry())
}

fn store_with(notes: Vec<Note>) -> NoteStore<MemoryKeyValueStore> {
    NoteStore::with_notes(notes, MemoryKeyValueStore::new(), geometry())
}

fn note_at(id: &str, x: f64, y: f64, z: i64) -> Note {
    let mut note = Note::new(ColorKey::Lemon, x, y, z, 0);
    note.id = id.to_string();
    note
}

#[test]
fn add_note_on_empty_board_starts_at_padding_with_first_stacking_key() {
    let mut store = empty_store();

    let note = store.add_note(ColorKey::Mint).clone();
    assert_eq!(note.color_key, ColorKey::Mint);
    assert!(note.title.is_empty());
    assert!(note.body.is_empty());
    assert!(!note.pinned);
    assert!(note.x >= 10.0 && note.y >= 10.0);
    assert_eq!(note.z, 1);
}

#[test]
fn added_notes_stagger_deterministically_and_stack_upward() {
    let mut store = empty_store();
    let first = store.add_note(ColorKey::Lemon).clone();
    let second = store.add_note(ColorKey::Lemon).clone();

    assert!(second.z > first.z);
    assert_ne!((first.x, first.y), (second.x, second.y));
}

#[test]
fn ids_stay_unique_across_add_and_delete_sequences() {
    let mut store = empty_store();
    let mut seen = HashSet::new();

    for round in 0..10 {
        let id = store.add_note(ColorKey::Sky).id.clone();
        assert!(seen.insert(id.clone()), "id reused: {id}");
        if round % 3 == 0 {
            store.delete_note(&id);
        }
    }
}

#[test]
fn move_commits_clamped_offset_and_brings_note_to_front() {
    let mut store = store_with(vec![note_at("n1", 24.0, 24.0, 1)]);

    store.move_note("n1", 50.0, 0.0);

    let note = store.note("n1").unwrap();
    assert_eq!(note.x, 74.0);
    assert_eq!(note.y, 24.0);
    assert_eq!(note.z, 2);
}

#[test]
fn move_clamps_to_the_far_board_edge() {
    let mut store = store_with(vec![note_at("n1", 24.0, 24.0, 1)]);

    store.move_note("n1", 5_000.0, 5_000.0);

    let note = store.note("n1").unwrap();
    assert_eq!(note.x, 800.0 - 260.0 - 10.0);
    assert_eq!(note.y, 600.0 - 220.0 - 10.0);
}

#[test]
fn sub_half_pixel_drags_are_dropped_entirely() {
    let mut store = store_with(vec![note_at("n1", 24.0, 24.0, 1)]);

    store.move_note("n1", 0.4, -0.49);

    let note = store.note("n1").unwrap();
    assert_eq!((note.x, note.y), (24.0, 24.0));
    assert_eq!(note.z, 1);
}

#[test]
fn one_large_axis_is_enough_to_commit_a_drag() {
    let mut store = store_with(vec![note_at("n1", 24.0, 24.0, 1)]);

    store.move_note("n1", 0.25, 30.0);

    let note = store.note("n1").unwrap();
    assert_eq!((note.x, note.y), (24.25, 54.0));
    assert_eq!(note.z, 2);
}

#[test]
fn pinned_notes_do_not_move() {
    let mut pinned = note_at("n1", 24.0, 24.0, 1);
    pinned.pinned = true;
    let mut store = store_with(vec![pinned]);

    store.move_note("n1", 100.0, 100.0);

    let note = store.note("n1").unwrap();
    assert_eq!((note.x, note.y), (24.0, 24.0));
    assert_eq!(note.z, 1);
}

#[test]
fn toggle_pin_twice_restores_state_but_keeps_raising_z() {
    let mut store = store_with(vec![note_at("n1", 24.0, 24.0, 1)]);

    store.toggle_pin("n1");
    let after_first = store.note("n1").unwrap().clone();
    assert!(after_first.pinned);
    assert_eq!(after_first.z, 2);

    store.toggle_pin("n1");
    let after_second = store.note("n1").unwrap().clone();
    assert!(!after_second.pinned);
    assert_eq!(after_second.z, 3);
}

#[test]
fn bring_to_front_only_reassigns_the_stacking_key() {
    let mut store = store_with(vec![note_at("a", 24.0, 24.0, 1), note_at("b", 80.0, 80.0, 2)]);

    store.bring_to_front("a");
    let note = store.note("a").unwrap();
    assert_eq!(note.z, 3);
    assert!(!note.pinned);

    // The counter advances on every call, even back-to-back ones.
    store.bring_to_front("a");
    assert_eq!(store.note("a").unwrap().z, 4);
}

#[test]
fn update_merges_only_provided_fields_and_reapplies_caps() {
    let mut store = store_with(vec![note_at("n1", 24.0, 24.0, 1)]);

    store.update_note(
        "n1",
        NoteUpdate {
            title: Some("t".repeat(TITLE_MAX_CHARS + 30)),
            body: Some("shopping list".to_string()),
            ..NoteUpdate::default()
        },
    );

    let note = store.note("n1").unwrap();
    assert_eq!(note.title.chars().count(), TITLE_MAX_CHARS);
    assert_eq!(note.body, "shopping list");
    assert_eq!(note.color_key, ColorKey::Lemon);
    assert_eq!(note.z, 1);
}

#[test]
fn change_color_swaps_the_palette_tone() {
    let mut store = store_with(vec![note_at("n1", 24.0, 24.0, 1)]);

    store.change_color("n1", ColorKey::Lavender);
    assert_eq!(store.note("n1").unwrap().color_key, ColorKey::Lavender);
}

#[test]
fn delete_removes_the_note() {
    let mut store = store_with(vec![note_at("a", 24.0, 24.0, 1), note_at("b", 80.0, 80.0, 2)]);

    store.delete_note("a");
    assert!(store.note("a").is_none());
    assert_eq!(store.notes().len(), 1);
}

#[test]
fn unknown_ids_are_silent_noops_for_every_operation() {
    let mut store = store_with(vec![note_at("n1", 24.0, 24.0, 1)]);

    store.update_note("ghost", NoteUpdate::default());
    store.move_note("ghost", 50.0, 50.0);
    store.delete_note("ghost");
    store.toggle_pin("ghost");
    store.bring_to_front("ghost");
    store.change_color("ghost", ColorKey::Mint);

    let note = store.note("n1").unwrap();
    assert_eq!(store.notes().len(), 1);
    assert_eq!((note.x, note.y), (24.0, 24.0));
    assert_eq!(note.z, 1);

    // Unknown-id stacking operations never advanced the counter.
    store.bring_to_front("n1");
    assert_eq!(store.note("n1").unwrap().z, 2);
}

#[test]
fn viewport_shrink_pulls_notes_back_on_board_and_is_idempotent() {
    let mut store = store_with(vec![note_at("n1", 500.0, 350.0, 1)]);

    store.set_viewport(Viewport::new(400.0, 300.0));
    let after_resize = store.note("n1").unwrap().clone();
    assert!(after_resize.x <= 400.0 - 10.0);
    assert!(after_resize.y <= 300.0 - 10.0);
    assert!(after_resize.x >= 10.0 && after_resize.y >= 10.0);

    store.set_viewport(Viewport::new(400.0, 300.0));
    let after_repeat = store.note("n1").unwrap();
    assert_eq!((after_repeat.x, after_repeat.y), (after_resize.x, after_resize.y));
}

#[test]
fn stacking_counter_seeds_above_loaded_notes() {
    let mut store = store_with(vec![note_at("a", 24.0, 24.0, 7), note_at("b", 80.0, 80.0, 3)]);

    let note = store.add_note(ColorKey::Blush).clone();
    assert_eq!(note.z, 8);
}

#[test]
fn visible_notes_compose_filter_and_render_order() {
    let mut shopping = note_at("shopping", 24.0, 24.0, 5);
    shopping.set_title("Groceries");
    shopping.set_body("oat milk");

    let mut pinned = note_at("pinned", 80.0, 80.0, 1);
    pinned.set_title("Milk run checklist");
    pinned.pinned = true;

    let mut unrelated = note_at("unrelated", 120.0, 120.0, 2);
    unrelated.set_title("Standup notes");

    let store = store_with(vec![shopping, pinned, unrelated]);

    let visible = store.visible_notes("milk");
    let ids: Vec<&str> = visible.iter().map(|note| note.id.as_str()).collect();
    assert_eq!(ids, vec!["pinned", "shopping"]);

    assert_eq!(store.visible_notes("").len(), 3);
}
