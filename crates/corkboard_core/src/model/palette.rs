//! Fixed, ordered note color palette.
//!
//! # Responsibility
//! - Define the set of selectable color themes and their display tones.
//! - Resolve persisted color keys, falling back to the first palette entry.
//!
//! # Invariants
//! - Palette order is stable; the first entry is the universal fallback.
//! - Every `ColorKey` has exactly one tone entry.

use serde::{Deserialize, Serialize};

/// Selectable color theme for a note.
///
/// Serialized as the lowercase key stored in persisted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorKey {
    Lemon,
    Mint,
    Sky,
    Blush,
    Lavender,
}

impl ColorKey {
    /// Returns the persisted string key for this color.
    pub fn as_key(self) -> &'static str {
        match self {
            Self::Lemon => "lemon",
            Self::Mint => "mint",
            Self::Sky => "sky",
            Self::Blush => "blush",
            Self::Lavender => "lavender",
        }
    }

    /// Resolves a raw key against the palette.
    ///
    /// Returns `None` for unknown keys; callers decide between error and
    /// fallback semantics.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "lemon" => Some(Self::Lemon),
            "mint" => Some(Self::Mint),
            "sky" => Some(Self::Sky),
            "blush" => Some(Self::Blush),
            "lavender" => Some(Self::Lavender),
            _ => None,
        }
    }

    /// Returns the palette fallback used for unresolved keys.
    pub fn fallback() -> Self {
        PALETTE[0].key
    }

    /// Returns the display tone for this color.
    pub fn tone(self) -> &'static PaletteTone {
        // PALETTE covers every variant, so the lookup cannot miss.
        PALETTE
            .iter()
            .find(|tone| tone.key == self)
            .unwrap_or(&PALETTE[0])
    }
}

impl Default for ColorKey {
    fn default() -> Self {
        Self::fallback()
    }
}

/// Display tone metadata consumed by the rendering collaborator.
///
/// Core never interprets these values; they ride along so one palette
/// definition serves both validation and painting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteTone {
    pub key: ColorKey,
    pub label: &'static str,
    pub surface: &'static str,
    pub border: &'static str,
    pub accent: &'static str,
    pub shadow: &'static str,
    pub tape: &'static str,
}

/// The fixed, ordered palette. Index 0 is the fallback tone.
pub const PALETTE: &[PaletteTone] = &[
    PaletteTone {
        key: ColorKey::Lemon,
        label: "Lemon",
        surface: "#fef9c3",
        border: "#fde047",
        accent: "#ca8a04",
        shadow: "rgba(202, 138, 4, 0.25)",
        tape: "#fef08a",
    },
    PaletteTone {
        key: ColorKey::Mint,
        label: "Mint",
        surface: "#dcfce7",
        border: "#86efac",
        accent: "#16a34a",
        shadow: "rgba(22, 163, 74, 0.25)",
        tape: "#bbf7d0",
    },
    PaletteTone {
        key: ColorKey::Sky,
        label: "Sky",
        surface: "#e0f2fe",
        border: "#7dd3fc",
        accent: "#0284c7",
        shadow: "rgba(2, 132, 199, 0.25)",
        tape: "#bae6fd",
    },
    PaletteTone {
        key: ColorKey::Blush,
        label: "Blush",
        surface: "#ffe4e6",
        border: "#fda4af",
        accent: "#e11d48",
        shadow: "rgba(225, 29, 72, 0.22)",
        tape: "#fecdd3",
    },
    PaletteTone {
        key: ColorKey::Lavender,
        label: "Lavender",
        surface: "#ede9fe",
        border: "#c4b5fd",
        accent: "#7c3aed",
        shadow: "rgba(124, 58, 237, 0.22)",
        tape: "#ddd6fe",
    },
];
