//! Board session store: owns the note collection and every mutation.
//!
//! # Responsibility
//! - Apply note lifecycle operations as complete, synchronous transitions.
//! - Compose geometry clamping and stacking-order allocation on every call.
//! - Trigger a persistence save after each in-memory commit.
//!
//! # Invariants
//! - All session state (collection, counter, geometry, storage) lives on
//!   this one object; two stores never share state.
//! - Unknown-id operations are silent no-ops, never errors.
//! - A failed save neither rolls back nor blocks the in-memory commit; the
//!   in-memory state stays authoritative for the session.

use crate::geometry::{BoardGeometry, Viewport};
use crate::model::note::Note;
use crate::model::palette::ColorKey;
use crate::persist::{KeyValueStore, PersistenceAdapter, StorageError};
use crate::search;
use crate::zorder::ZOrderAllocator;
use chrono::Utc;
use log::{info, warn};

/// Completed drags smaller than this on both axes are jitter, not moves.
pub const DRAG_COMMIT_THRESHOLD: f64 = 0.5;

/// Shallow-merge patch for [`NoteStore::update_note`].
///
/// `None` fields are left untouched; text fields re-apply the character caps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
    pub color_key: Option<ColorKey>,
    pub pinned: Option<bool>,
}

/// One board session: the note collection plus every collaborator it needs.
pub struct NoteStore<S: KeyValueStore> {
    notes: Vec<Note>,
    zorder: ZOrderAllocator,
    geometry: BoardGeometry,
    persistence: PersistenceAdapter<S>,
    save_failures: u64,
    last_save_error: Option<StorageError>,
}

impl<S: KeyValueStore> NoteStore<S> {
    /// Opens a session: loads persisted state (seed on absent/corrupt),
    /// re-clamps every loaded position against the current geometry, and
    /// seeds the stacking counter above every loaded key.
    pub fn open(store: S, geometry: BoardGeometry) -> Self {
        let persistence = PersistenceAdapter::new(store);
        let notes = persistence.load();
        Self::assemble(notes, persistence, geometry)
    }

    /// Opens a session over an explicit starting collection, bypassing load.
    ///
    /// Used by hosts importing state and by tests that need an empty board.
    pub fn with_notes(notes: Vec<Note>, store: S, geometry: BoardGeometry) -> Self {
        Self::assemble(notes, PersistenceAdapter::new(store), geometry)
    }

    fn assemble(
        mut notes: Vec<Note>,
        persistence: PersistenceAdapter<S>,
        geometry: BoardGeometry,
    ) -> Self {
        for note in &mut notes {
            let (x, y) = geometry.clamp(note.x, note.y);
            note.x = x;
            note.y = y;
        }
        let zorder = ZOrderAllocator::seeded_above(&notes);

        info!(
            "event=board_open module=store status=ok count={} next_z={}",
            notes.len(),
            zorder.peek()
        );

        Self {
            notes,
            zorder,
            geometry,
            persistence,
            save_failures: 0,
            last_save_error: None,
        }
    }

    /// Appends a fresh note and returns it.
    ///
    /// # Contract
    /// - Empty title and body; the given palette color.
    /// - Staggered default position derived from the current note count,
    ///   clamped to the board.
    /// - Next stacking key; `created_at` is the current epoch-ms time.
    pub fn add_note(&mut self, color_key: ColorKey) -> &Note {
        let (x, y) = self.geometry.staggered_origin(self.notes.len());
        let z = self.zorder.next();
        let note = Note::new(color_key, x, y, z, Utc::now().timestamp_millis());

        info!(
            "event=note_add module=store status=ok id={} z={z}",
            note.id
        );
        self.notes.push(note);
        self.persist();
        let index = self.notes.len() - 1;
        &self.notes[index]
    }

    /// Shallow-merges `update` into the matching note. Silent no-op when the
    /// id is unknown. Text fields are re-truncated to their caps.
    pub fn update_note(&mut self, id: &str, update: NoteUpdate) {
        let Some(index) = self.index_of(id) else {
            return;
        };

        let note = &mut self.notes[index];
        if let Some(title) = update.title {
            note.set_title(title);
        }
        if let Some(body) = update.body {
            note.set_body(body);
        }
        if let Some(color_key) = update.color_key {
            note.color_key = color_key;
        }
        if let Some(pinned) = update.pinned {
            note.pinned = pinned;
        }

        self.persist();
    }

    /// Commits a completed drag offset.
    ///
    /// # Contract
    /// - No-op when the note is pinned or absent.
    /// - Offsets below [`DRAG_COMMIT_THRESHOLD`] on both axes are dropped to
    ///   suppress jitter-driven writes.
    /// - Otherwise the new position is clamped, committed, and the note is
    ///   brought to the front with a fresh stacking key.
    pub fn move_note(&mut self, id: &str, dx: f64, dy: f64) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        if self.notes[index].pinned {
            return;
        }
        if dx.abs() < DRAG_COMMIT_THRESHOLD && dy.abs() < DRAG_COMMIT_THRESHOLD {
            return;
        }

        let (x, y) = self
            .geometry
            .clamp(self.notes[index].x + dx, self.notes[index].y + dy);
        let z = self.zorder.next();

        let note = &mut self.notes[index];
        note.x = x;
        note.y = y;
        note.z = z;

        self.persist();
    }

    /// Removes the matching note. Silent no-op when the id is unknown. The
    /// id is never handed out again.
    pub fn delete_note(&mut self, id: &str) {
        let Some(index) = self.index_of(id) else {
            return;
        };

        let removed = self.notes.remove(index);
        info!("event=note_delete module=store status=ok id={}", removed.id);
        self.persist();
    }

    /// Flips the pin flag and always reassigns a fresh stacking key, in both
    /// flip directions.
    pub fn toggle_pin(&mut self, id: &str) {
        let Some(index) = self.index_of(id) else {
            return;
        };

        let z = self.zorder.next();
        let note = &mut self.notes[index];
        note.pinned = !note.pinned;
        note.z = z;

        self.persist();
    }

    /// Reassigns a fresh stacking key only. Pin state is untouched; the
    /// counter advances on every call.
    pub fn bring_to_front(&mut self, id: &str) {
        let Some(index) = self.index_of(id) else {
            return;
        };

        let z = self.zorder.next();
        self.notes[index].z = z;
        self.persist();
    }

    /// Changes the note's palette color.
    pub fn change_color(&mut self, id: &str, color_key: ColorKey) {
        self.update_note(
            id,
            NoteUpdate {
                color_key: Some(color_key),
                ..NoteUpdate::default()
            },
        );
    }

    /// Applies a viewport resize: every stored position is re-clamped
    /// against the new bounds, pulling off-screen notes back on-board.
    ///
    /// Clamping is pure in current position and bounds, so running this
    /// repeatedly in quick succession is safe and idempotent.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.geometry.set_viewport(viewport);

        let mut changed = false;
        for note in &mut self.notes {
            let (x, y) = self.geometry.clamp(note.x, note.y);
            if (x, y) != (note.x, note.y) {
                note.x = x;
                note.y = y;
                changed = true;
            }
        }

        if changed {
            self.persist();
        }
    }

    /// Current collection, in insertion order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Looks up one note by id.
    pub fn note(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Current board geometry.
    pub fn geometry(&self) -> &BoardGeometry {
        &self.geometry
    }

    /// Display projection for the rendering collaborator:
    /// `render_order(filter(notes, query))`.
    pub fn visible_notes(&self, query: &str) -> Vec<&Note> {
        let filtered = search::filter(&self.notes, query);
        search::render_order(&filtered)
    }

    /// Number of saves that failed this session.
    ///
    /// Saves are best-effort by design: the in-memory state stays
    /// authoritative and hosts surface degraded persistence off this signal.
    pub fn save_failures(&self) -> u64 {
        self.save_failures
    }

    /// The most recent save failure, cleared by the next successful save.
    pub fn last_save_error(&self) -> Option<&StorageError> {
        self.last_save_error.as_ref()
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.notes.iter().position(|note| note.id == id)
    }

    fn persist(&mut self) {
        match self.persistence.save(&self.notes) {
            Ok(()) => {
                self.last_save_error = None;
            }
            Err(err) => {
                self.save_failures += 1;
                warn!(
                    "event=board_save module=store status=error failures={} error={err}",
                    self.save_failures
                );
                self.last_save_error = Some(err);
            }
        }
    }
}
