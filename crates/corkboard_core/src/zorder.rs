//! Monotonic stacking-order allocation.
//!
//! # Responsibility
//! - Hand out strictly increasing stacking keys for the life of one board
//!   session.
//!
//! # Invariants
//! - The counter only moves forward; it is never reset or reused, even after
//!   deletes leave gaps.
//! - Seeding places the counter strictly above every already-loaded key.

use crate::model::note::Note;

/// Monotone stacking-key counter owned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZOrderAllocator {
    next_z: i64,
}

impl ZOrderAllocator {
    /// Seeds the counter to one above the highest loaded key, or 1 when the
    /// collection is empty.
    pub fn seeded_above(notes: &[Note]) -> Self {
        let next_z = notes.iter().map(|note| note.z).max().map_or(1, |max| max + 1);
        Self { next_z }
    }

    /// Returns the next stacking key and advances the counter.
    pub fn next(&mut self) -> i64 {
        let allocated = self.next_z;
        self.next_z += 1;
        allocated
    }

    /// Returns the key the next allocation would produce, without advancing.
    pub fn peek(&self) -> i64 {
        self.next_z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::palette::ColorKey;

    #[test]
    fn empty_collection_seeds_at_one() {
        let mut allocator = ZOrderAllocator::seeded_above(&[]);
        assert_eq!(allocator.next(), 1);
        assert_eq!(allocator.next(), 2);
    }

    #[test]
    fn seeding_clears_every_loaded_key() {
        let notes = vec![
            Note::new(ColorKey::Lemon, 10.0, 10.0, 4, 0),
            Note::new(ColorKey::Mint, 10.0, 10.0, 11, 1),
            Note::new(ColorKey::Sky, 10.0, 10.0, 7, 2),
        ];

        let mut allocator = ZOrderAllocator::seeded_above(&notes);
        assert_eq!(allocator.next(), 12);
    }

    #[test]
    fn counter_is_strictly_increasing() {
        let mut allocator = ZOrderAllocator::seeded_above(&[]);
        let first = allocator.next();
        let second = allocator.next();
        let third = allocator.next();
        assert!(first < second && second < third);
    }
}
