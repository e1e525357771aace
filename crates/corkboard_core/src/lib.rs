//! Core state engine for the Corkboard sticky-note board.
//! This crate is the single source of truth for board invariants: note
//! lifecycle, bounds clamping, stacking order, persistence round-trip and
//! display filtering. Gesture capture and rendering live in host layers.

pub mod db;
pub mod geometry;
pub mod logging;
pub mod model;
pub mod persist;
pub mod search;
pub mod store;
pub mod zorder;

pub use geometry::{BoardGeometry, Footprint, Viewport, BOARD_PADDING};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Note, BODY_MAX_CHARS, TITLE_MAX_CHARS};
pub use model::palette::{ColorKey, PaletteTone, PALETTE};
pub use persist::{
    decode_note, fallback_seed, KeyValueStore, MemoryKeyValueStore, NoteDecodeError,
    PersistenceAdapter, SqliteKeyValueStore, StorageError, NOTES_KEY,
};
pub use search::{filter, render_order};
pub use store::{NoteStore, NoteUpdate, DRAG_COMMIT_THRESHOLD};
pub use zorder::ZOrderAllocator;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
