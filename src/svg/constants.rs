//! Shared constants for the SVG backend (all lengths in SVG user units).

// ── Document framing ────────────────────────────────────────────────
pub(super) const XML_DECLARATION: &str =
    r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#;
pub(super) const SVG_NAMESPACES: &str =
    r#" xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink""#;
pub(super) const SVG_PROFILE: &str = r#" version="1.2" baseProfile="tiny""#;
pub(super) const SVG_END: &str = "</svg>";

// ── Units ───────────────────────────────────────────────────────────
pub(super) const DEFAULT_RESOLUTION: u32 = 72; // dpi; font points map 1:1 to user units
pub(super) const POINTS_PER_INCH: f64 = 72.0;

// ── Frozen pane ─────────────────────────────────────────────────────
pub(super) const FROZEN_PANE_WIDTH: f64 = 100.0; // viewport width; staff lines are clamped to it

// ── Rehearsal mark frame ────────────────────────────────────────────
pub(super) const REHEARSAL_FRAME_WIDTH: f64 = 24.0;
pub(super) const REHEARSAL_FRAME_HEIGHT: f64 = 24.0;
pub(super) const REHEARSAL_FRAME_RADIUS: f64 = 4.0;
