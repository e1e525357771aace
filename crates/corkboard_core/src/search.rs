//! Note filtering and render sequencing.
//!
//! # Responsibility
//! - Filter notes by case-insensitive substring match over title and body.
//! - Produce the paint order: pinned first, then ascending stacking key.
//!
//! # Invariants
//! - A blank (empty-after-trim) query matches every note.
//! - Render order is a pure projection; it is never written back or
//!   persisted.
//! - The sort is stable, so equal keys keep their collection order.

use crate::model::note::Note;

/// Returns the notes whose title or body contains the trimmed query,
/// case-insensitively. A blank query returns all notes unchanged.
pub fn filter<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return notes.iter().collect();
    }

    notes
        .iter()
        .filter(|note| note.search_text().to_lowercase().contains(&needle))
        .collect()
}

/// Sorts notes into paint order: pinned before unpinned, ties broken by
/// ascending stacking key.
pub fn render_order<'a>(notes: &[&'a Note]) -> Vec<&'a Note> {
    let mut ordered = notes.to_vec();
    ordered.sort_by(|a, b| {
        b.pinned
            .cmp(&a.pinned)
            .then_with(|| a.z.cmp(&b.z))
    });
    ordered
}
