//! Domain model for the note board.
//!
//! # Responsibility
//! - Define the canonical sticky-note record and its content caps.
//! - Define the fixed, ordered color palette notes resolve against.
//!
//! # Invariants
//! - Every note is identified by a stable string `id`, never reused.
//! - `title`/`body` never exceed their character caps.
//! - `color_key` always resolves to a palette member.

pub mod note;
pub mod palette;
