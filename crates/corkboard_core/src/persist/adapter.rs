//! Board persistence adapter: round-trip, normalization and fallback seed.
//!
//! # Responsibility
//! - Serialize the full note collection to one namespaced key-value entry.
//! - Decode persisted state defensively: drop malformed records, coerce
//!   malformed fields to deterministic defaults.
//! - Supply a fresh fallback seed when no usable state exists.
//!
//! # Invariants
//! - `load` never fails; every failure mode degrades to the fallback seed.
//! - Each `load` fallback returns independent instances, so mutating one
//!   loaded result can never corrupt a later load.
//! - Decoding one bad record never aborts the rest of the collection.

use crate::geometry::stagger_offset;
use crate::model::note::{truncate_chars, Note, BODY_MAX_CHARS, TITLE_MAX_CHARS};
use crate::model::palette::ColorKey;
use crate::persist::{KeyValueStore, StorageResult};
use log::{info, warn};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Namespaced storage key holding the serialized note collection.
pub const NOTES_KEY: &str = "corkboard.notes.v1";

/// Per-record decode failure.
///
/// Field-level problems never produce this error; they coerce to defaults.
/// Only a value that is not a structured record at all is rejected.
#[derive(Debug, PartialEq, Eq)]
pub enum NoteDecodeError {
    NotARecord { index: usize },
}

impl Display for NoteDecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotARecord { index } => {
                write!(f, "persisted record at index {index} is not an object")
            }
        }
    }
}

impl Error for NoteDecodeError {}

/// Serializes and restores the board collection through a [`KeyValueStore`].
pub struct PersistenceAdapter<S: KeyValueStore> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> PersistenceAdapter<S> {
    /// Creates an adapter over the default notes key.
    pub fn new(store: S) -> Self {
        Self::with_key(store, NOTES_KEY)
    }

    /// Creates an adapter over a custom namespaced key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Serializes the full collection to the namespaced entry.
    ///
    /// Callers decide the failure policy; the store logs and continues.
    pub fn save(&mut self, notes: &[Note]) -> StorageResult<()> {
        let payload = serde_json::to_string(notes)?;
        self.store.write(&self.key, &payload)
    }

    /// Restores the collection, degrading to the fallback seed.
    ///
    /// Missing entry, unreadable JSON, a non-array payload, or a payload
    /// that normalizes to zero usable records all yield a fresh seed clone.
    pub fn load(&self) -> Vec<Note> {
        let raw = match self.store.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return self.seed("missing"),
            Err(err) => {
                warn!("event=board_load module=persist status=error error={err}");
                return self.seed("read_failed");
            }
        };

        let parsed: Value = match serde_json::from_str(&raw) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!("event=board_load module=persist status=error error={err}");
                return self.seed("unreadable");
            }
        };

        let Some(records) = parsed.as_array() else {
            return self.seed("not_a_list");
        };

        let mut notes: Vec<Note> = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            match decode_note(record, index) {
                Ok(note) => {
                    // Duplicate ids would break every by-id operation, so
                    // later claimants of a taken id are dropped like any
                    // other malformed record.
                    if notes.iter().any(|existing| existing.id == note.id) {
                        warn!(
                            "event=note_decode module=persist status=dropped index={index} reason=duplicate_id"
                        );
                        continue;
                    }
                    notes.push(note);
                }
                Err(err) => {
                    warn!(
                        "event=note_decode module=persist status=dropped index={index} error={err}"
                    );
                }
            }
        }

        if notes.is_empty() {
            return self.seed("empty");
        }

        info!(
            "event=board_load module=persist status=ok count={}",
            notes.len()
        );
        notes
    }

    fn seed(&self, reason: &str) -> Vec<Note> {
        info!("event=board_load module=persist status=fallback reason={reason}");
        fallback_seed()
    }
}

/// Validating constructor for one persisted record.
///
/// # Contract
/// - Non-object values fail with [`NoteDecodeError::NotARecord`].
/// - Every field-level problem coerces: blank/missing `id` becomes the
///   positional placeholder `note-{index}`, text fields stringify and
///   truncate to their caps, unknown color keys fall back to the first
///   palette entry, `pinned` follows truthiness coercion, and non-finite
///   numeric fields take deterministic positional defaults.
pub fn decode_note(raw: &Value, index: usize) -> Result<Note, NoteDecodeError> {
    let record = raw.as_object().ok_or(NoteDecodeError::NotARecord { index })?;

    let id = match record.get("id").and_then(Value::as_str) {
        Some(id) if !id.trim().is_empty() => id.to_string(),
        _ => format!("note-{index}"),
    };

    let title = truncate_chars(coerce_text(record.get("title")), TITLE_MAX_CHARS);
    let body = truncate_chars(coerce_text(record.get("body")), BODY_MAX_CHARS);

    let color_key = record
        .get("colorKey")
        .and_then(Value::as_str)
        .and_then(ColorKey::parse)
        .unwrap_or_default();

    let pinned = coerce_bool(record.get("pinned"));

    let (fallback_x, fallback_y) = stagger_offset(index);
    let x = finite_or(record.get("x"), fallback_x);
    let y = finite_or(record.get("y"), fallback_y);
    let z = finite_or(record.get("z"), (index + 1) as f64).round() as i64;
    let created_at = finite_or(record.get("createdAt"), index as f64).round() as i64;

    Ok(Note {
        id,
        title,
        body,
        color_key,
        pinned,
        x,
        y,
        z,
        created_at,
    })
}

/// Builds a fresh instance of the fixed 3-note welcome seed.
///
/// A new allocation per call keeps independent loads independent: mutating
/// one returned collection cannot leak into the next fallback.
pub fn fallback_seed() -> Vec<Note> {
    let specs: [(&str, &str, &str, ColorKey); 3] = [
        (
            "seed-welcome",
            "Welcome to your board",
            "Drag notes anywhere on the board. Everything you write is saved locally and survives a reload.",
            ColorKey::Lemon,
        ),
        (
            "seed-pinning",
            "Pin what matters",
            "Pinned notes stay put and always render above the rest. Pin this one and try dragging it.",
            ColorKey::Mint,
        ),
        (
            "seed-palette",
            "Pick a color",
            "Each note can take any palette tone. Use the swatches in the footer to recolor a note.",
            ColorKey::Sky,
        ),
    ];

    specs
        .iter()
        .enumerate()
        .map(|(index, (id, title, body, color_key))| {
            let (x, y) = stagger_offset(index);
            Note {
                id: (*id).to_string(),
                title: (*title).to_string(),
                body: (*body).to_string(),
                color_key: *color_key,
                pinned: false,
                x,
                y,
                z: (index + 1) as i64,
                created_at: index as i64,
            }
        })
        .collect()
}

/// Stringifies a scalar JSON value the way lenient board clients did.
///
/// Structured values (arrays/objects) have no meaningful text form here and
/// coerce to empty rather than a debug dump.
fn coerce_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        _ => String::new(),
    }
}

/// JavaScript-style truthiness for the `pinned` flag.
fn coerce_bool(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        Some(Value::Null) | None => false,
    }
}

/// Returns the value as a finite f64, or the deterministic fallback.
fn finite_or(value: Option<&Value>, fallback: f64) -> f64 {
    value
        .and_then(Value::as_f64)
        .filter(|number| number.is_finite())
        .unwrap_or(fallback)
}
