//! scoresvg — SVG output backend for engraved scores.
//!
//! A host engraving engine decides what goes where and issues
//! immediate-mode drawing calls; this crate turns them into an SVG
//! document whose elements carry semantic classes (`Note`, `Clef`,
//! `StaffLines`, …) so an external stylesheet controls most of the look.
//! For horizontally scrolling scores a second, narrow "frozen pane"
//! document mirrors the clefs, signatures, tempo and staff lines.
//!
//! # Example
//! ```no_run
//! use scoresvg::*;
//!
//! let mut session = SvgSession::new();
//! session.set_size(SizeF::new(800.0, 400.0));
//! session.set_view_box(RectF::new(0.0, 0.0, 100.0, 50.0));
//! session.set_file_name("page-1.svg");
//! assert!(session.open());
//!
//! let note = ElementRef::new(ElementKind::Note);
//! session.update_state(PaintState::default());
//! session.draw_text(Some(&note), &GlyphRun {
//!     pos: PointF::new(20.0, 30.0),
//!     text: "\u{E0A4}".into(),
//!     font_family: "Bravura".into(),
//!     font_size: 20.0,
//!     private_use: true,
//! });
//! session.close();
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod sink;
pub mod svg;

pub use config::SessionOptions;
pub use error::SvgError;
pub use model::*;
pub use sink::{FileSink, MemorySink, OutputSink};
pub use svg::SvgSession;
