//! Sticky-note domain record.
//!
//! # Responsibility
//! - Define the canonical note shape shared by store, persistence and search.
//! - Enforce title/body character caps at construction and mutation seams.
//!
//! # Invariants
//! - `id` is stable for the note's lifetime and never reused after delete.
//! - `title` holds at most [`TITLE_MAX_CHARS`] characters, `body` at most
//!   [`BODY_MAX_CHARS`].
//! - `z` only ever moves forward; allocation is owned by the store.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::palette::ColorKey;

/// Maximum note title length in characters.
pub const TITLE_MAX_CHARS: usize = 80;

/// Maximum note body length in characters.
pub const BODY_MAX_CHARS: usize = 600;

/// Canonical sticky-note record.
///
/// Field names serialize in `camelCase` to match the persisted JSON shape
/// `{id, title, body, colorKey, pinned, x, y, z, createdAt}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Stable string identifier. Fresh notes use a UUID v4.
    pub id: String,
    /// Display title, capped at [`TITLE_MAX_CHARS`] characters.
    pub title: String,
    /// Free-form body text, capped at [`BODY_MAX_CHARS`] characters.
    pub body: String,
    /// Palette color theme.
    pub color_key: ColorKey,
    /// Pinned notes are excluded from move and render above unpinned ones.
    pub pinned: bool,
    /// Board x coordinate, always inside the current clamped bounds.
    pub x: f64,
    /// Board y coordinate, always inside the current clamped bounds.
    pub y: f64,
    /// Stacking key. Strictly increasing across allocations, not contiguous.
    pub z: i64,
    /// Creation ordinal in epoch milliseconds. Tiebreak default only.
    pub created_at: i64,
}

impl Note {
    /// Creates a fresh, empty note at the given position and stacking key.
    pub fn new(color_key: ColorKey, x: f64, y: f64, z: i64, created_at: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: String::new(),
            body: String::new(),
            color_key,
            pinned: false,
            x,
            y,
            z,
            created_at,
        }
    }

    /// Replaces the title, truncating to the character cap.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = truncate_chars(title.into(), TITLE_MAX_CHARS);
    }

    /// Replaces the body, truncating to the character cap.
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = truncate_chars(body.into(), BODY_MAX_CHARS);
    }

    /// Returns the text searched by the filter: title and body joined.
    pub fn search_text(&self) -> String {
        let mut text = String::with_capacity(self.title.len() + self.body.len() + 1);
        text.push_str(&self.title);
        text.push(' ');
        text.push_str(&self.body);
        text
    }
}

/// Truncates a string to at most `max_chars` characters on a char boundary.
pub fn truncate_chars(value: String, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((byte_index, _)) => {
            let mut truncated = value;
            truncated.truncate(byte_index);
            truncated
        }
        None => value,
    }
}
