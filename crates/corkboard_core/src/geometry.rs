//! Board geometry and position clamping.
//!
//! # Responsibility
//! - Clamp note positions into the visible board for the current viewport.
//! - Derive the deterministic staggered origin for freshly added notes.
//!
//! # Invariants
//! - Clamped coordinates always satisfy
//!   `padding <= coord <= viewport - effective_footprint - padding`.
//! - The allowed range never inverts: on narrow viewports the effective
//!   footprint shrinks so the upper bound stays at or above `padding`.
//! - Clamping is a pure function of position and bounds, so re-running it
//!   (e.g. on repeated viewport-resize events) is idempotent.

/// Nominal note footprint width in board units.
pub const NOTE_FOOTPRINT_WIDTH: f64 = 260.0;

/// Nominal note footprint height in board units.
pub const NOTE_FOOTPRINT_HEIGHT: f64 = 220.0;

/// Default gap kept between notes and the board edge.
pub const BOARD_PADDING: f64 = 10.0;

const STAGGER_STEP_X: f64 = 40.0;
const STAGGER_STEP_Y: f64 = 32.0;
const STAGGER_WRAP: usize = 9;

/// Current board measurement supplied by the gesture/layout collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Nominal space one note occupies on the board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub width: f64,
    pub height: f64,
}

impl Default for Footprint {
    fn default() -> Self {
        Self {
            width: NOTE_FOOTPRINT_WIDTH,
            height: NOTE_FOOTPRINT_HEIGHT,
        }
    }
}

/// Clamping rules for one board session.
///
/// Owned by the store; the viewport is replaced wholesale on resize events
/// and every stored position is re-clamped against the new bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardGeometry {
    viewport: Viewport,
    footprint: Footprint,
    padding: f64,
}

impl BoardGeometry {
    /// Creates geometry with the default footprint and edge padding.
    pub fn new(viewport: Viewport) -> Self {
        Self::with_rules(viewport, Footprint::default(), BOARD_PADDING)
    }

    /// Creates geometry with explicit footprint and padding rules.
    pub fn with_rules(viewport: Viewport, footprint: Footprint, padding: f64) -> Self {
        Self {
            viewport,
            footprint,
            padding,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Replaces the viewport measurement. Callers re-clamp stored positions.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Clamps a position into the allowed range for the current viewport.
    pub fn clamp(&self, x: f64, y: f64) -> (f64, f64) {
        (
            clamp_axis(x, self.viewport.width, self.footprint.width, self.padding),
            clamp_axis(y, self.viewport.height, self.footprint.height, self.padding),
        )
    }

    /// Returns the clamped default origin for the `index`-th added note.
    ///
    /// The cascade is deterministic in the current note count and wraps so
    /// long-lived boards keep placing new notes near the top-left corner.
    pub fn staggered_origin(&self, index: usize) -> (f64, f64) {
        let (x, y) = stagger_offset(index);
        self.clamp(x, y)
    }
}

/// Unclamped staggered cascade position for the `index`-th note.
///
/// Shared by [`BoardGeometry::staggered_origin`] and by persistence decoding,
/// which needs a deterministic positional fallback before any viewport is
/// known. Loaded positions are re-clamped when the store opens.
pub fn stagger_offset(index: usize) -> (f64, f64) {
    let slot = (index % STAGGER_WRAP) as f64;
    (
        BOARD_PADDING + slot * STAGGER_STEP_X,
        BOARD_PADDING + slot * STAGGER_STEP_Y,
    )
}

fn clamp_axis(value: f64, viewport_dim: f64, footprint_dim: f64, padding: f64) -> f64 {
    // Shrink the footprint on narrow viewports so the upper bound never
    // drops below the lower one.
    let effective_footprint = footprint_dim.min(viewport_dim - 2.0 * padding);
    let max = padding.max(viewport_dim - effective_footprint - padding);

    if !value.is_finite() {
        return padding;
    }
    value.clamp(padding, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> BoardGeometry {
        BoardGeometry::new(Viewport::new(800.0, 600.0))
    }

    #[test]
    fn clamp_keeps_interior_positions_unchanged() {
        assert_eq!(board().clamp(120.0, 140.0), (120.0, 140.0));
    }

    #[test]
    fn clamp_pulls_positions_back_inside_bounds() {
        let geometry = board();
        assert_eq!(geometry.clamp(-50.0, 10_000.0), (10.0, 600.0 - 220.0 - 10.0));
        assert_eq!(geometry.clamp(10_000.0, -1.0), (800.0 - 260.0 - 10.0, 10.0));
    }

    #[test]
    fn narrow_viewport_shrinks_footprint_instead_of_inverting_range() {
        let geometry = BoardGeometry::new(Viewport::new(120.0, 90.0));
        let (x, y) = geometry.clamp(500.0, 500.0);
        // Effective footprint is viewport - 2*padding, so the only legal
        // position is the padding corner.
        assert_eq!((x, y), (10.0, 10.0));
    }

    #[test]
    fn non_finite_input_lands_on_padding_edge() {
        let geometry = board();
        assert_eq!(geometry.clamp(f64::NAN, f64::INFINITY), (10.0, 10.0));
    }

    #[test]
    fn staggered_origin_is_deterministic_and_clamped() {
        let geometry = board();
        assert_eq!(geometry.staggered_origin(0), (10.0, 10.0));
        assert_eq!(geometry.staggered_origin(2), geometry.staggered_origin(2));

        let (x, y) = geometry.staggered_origin(8);
        assert!(x >= 10.0 && x <= 800.0 - 260.0 - 10.0);
        assert!(y >= 10.0 && y <= 600.0 - 220.0 - 10.0);

        // The cascade wraps instead of walking off the board.
        assert_eq!(geometry.staggered_origin(9), geometry.staggered_origin(0));
    }
}
