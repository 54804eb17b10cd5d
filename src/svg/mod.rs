//! SVG session — turns a host's drawing calls into an SVG document.
//!
//! The host opens a session, pushes paint-state updates and draw calls,
//! then closes it. Body elements are buffered as they arrive; the root
//! element is only written at close, because its scroll attribute may be
//! settled by a call that comes after most of the drawing. When the score
//! scrolls horizontally a frozen-pane companion document is written next
//! to the main one.

mod classify;
mod constants;
mod frozen;
mod geometry;
mod state;
mod text;
mod writer;

pub use classify::{class_name, is_animated};
pub use state::{encode_fill, encode_state, encode_stroke, is_styled_externally};

use crate::config::SessionOptions;
use crate::error::SvgError;
use crate::model::*;
use crate::sink::{frozen_name, FileSink, OutputSink};
use constants::*;
use frozen::FrozenPane;
use writer::{fmt_num, xml_escape};

// ═══════════════════════════════════════════════════════════════════════
// SvgSession
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub struct SvgSession {
    output: Option<Box<dyn OutputSink>>,
    active: bool,
    size: Option<SizeF>,
    view_box: Option<RectF>,
    resolution: u32,
    title: String,
    description: String,
    scroll: ScrollOrientation,
    cue_id: String,
    staff_count: Option<usize>,
    paint: PaintState,
    /// Root element and metadata, computed at close
    header: String,
    /// One entry per element, in drawing order
    body: Vec<String>,
    frozen: Option<FrozenPane>,
}

impl Default for SvgSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SvgSession {
    pub fn new() -> Self {
        Self {
            output: None,
            active: false,
            size: None,
            view_box: None,
            resolution: DEFAULT_RESOLUTION,
            title: String::new(),
            description: String::new(),
            scroll: ScrollOrientation::default(),
            cue_id: String::new(),
            staff_count: None,
            paint: PaintState::default(),
            header: String::new(),
            body: Vec::new(),
            frozen: None,
        }
    }

    /// A session pre-configured from deserialized options. The output
    /// target still has to be set.
    pub fn from_options(options: &SessionOptions) -> Self {
        let mut session = Self::new();
        if let Some(ref title) = options.title {
            session.set_title(title);
        }
        if let Some(ref description) = options.description {
            session.set_description(description);
        }
        if let Some(size) = options.size {
            session.set_size(size);
        }
        if let Some(view_box) = options.view_box {
            session.set_view_box(view_box);
        }
        if let Some(resolution) = options.resolution {
            session.set_resolution(resolution);
        }
        if let Some(count) = options.staff_count {
            session.set_staff_count(count);
        }
        if let Some(scroll) = options.scroll {
            session.set_scroll_orientation(scroll);
        }
        session
    }

    // ── Metadata (fixed once the session is active) ─────────────────

    fn rejected_while_active(&self, what: &str) -> bool {
        if self.active {
            log::warn!("cannot change the {what} while the session is active");
        }
        self.active
    }

    pub fn set_title(&mut self, title: &str) {
        if !self.rejected_while_active("title") {
            self.title = title.to_string();
        }
    }

    pub fn set_description(&mut self, description: &str) {
        if !self.rejected_while_active("description") {
            self.description = description.to_string();
        }
    }

    pub fn set_size(&mut self, size: SizeF) {
        if !self.rejected_while_active("size") {
            self.size = Some(size);
        }
    }

    pub fn set_view_box(&mut self, view_box: RectF) {
        if !self.rejected_while_active("view box") {
            self.view_box = Some(view_box);
        }
    }

    pub fn set_resolution(&mut self, dpi: u32) {
        if !self.rejected_while_active("resolution") {
            self.resolution = dpi;
        }
    }

    pub fn set_output(&mut self, sink: Box<dyn OutputSink>) {
        if !self.rejected_while_active("output target") {
            self.output = Some(sink);
        }
    }

    /// Write to a file; the frozen pane goes next to it.
    pub fn set_file_name<P: AsRef<std::path::Path>>(&mut self, path: P) {
        if !self.rejected_while_active("output target") {
            self.output = Some(Box::new(FileSink::new(path)));
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn size(&self) -> Option<SizeF> {
        self.size
    }

    pub fn view_box(&self) -> Option<RectF> {
        self.view_box
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    // ── Per-call context ────────────────────────────────────────────

    /// Replace the active paint state.
    pub fn update_state(&mut self, paint: PaintState) {
        self.paint = paint;
    }

    pub fn paint_state(&self) -> &PaintState {
        &self.paint
    }

    /// Cue id for the elements that follow; empty for none.
    pub fn set_cue_id(&mut self, cue_id: &str) {
        self.cue_id.clear();
        self.cue_id.push_str(cue_id);
    }

    pub fn cue_id(&self) -> &str {
        &self.cue_id
    }

    /// Horizontal scrolling starts collecting the frozen pane.
    pub fn set_scroll_orientation(&mut self, scroll: ScrollOrientation) {
        self.scroll = scroll;
        if scroll == ScrollOrientation::Horizontal && self.frozen.is_none() {
            self.frozen = Some(FrozenPane::new(self.staff_count));
        }
    }

    pub fn scroll_orientation(&self) -> ScrollOrientation {
        self.scroll
    }

    /// Number of staves the frozen pane lays out placeholders for.
    pub fn set_staff_count(&mut self, count: usize) {
        self.staff_count = Some(count);
        if let Some(ref mut frozen) = self.frozen {
            frozen.set_staff_count(count);
        }
    }

    // ── Lifecycle ───────────────────────────────────────────────────

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Start a session on the configured output target. Returns false,
    /// without starting, if the target cannot be opened.
    pub fn open(&mut self) -> bool {
        if self.active {
            log::warn!("session is already active");
            return false;
        }
        let Some(output) = self.output.as_mut() else {
            log::error!("{}", SvgError::NoOutput);
            return false;
        };
        if let Err(e) = output.open() {
            log::error!("{e}");
            return false;
        }
        log::debug!("opened SVG session on '{}'", output.name());

        self.header.clear();
        self.body.clear();
        self.frozen = (self.scroll == ScrollOrientation::Horizontal)
            .then(|| FrozenPane::new(self.staff_count));
        self.active = true;
        true
    }

    /// Finish the documents and write them out. Returns false if the
    /// session was not active or writing failed.
    pub fn close(&mut self) -> bool {
        match self.finish() {
            Ok(()) => true,
            Err(SvgError::NotActive) => false,
            Err(e) => {
                log::error!("{e}");
                false
            }
        }
    }

    /// [`close`](Self::close), keeping the error.
    pub fn finish(&mut self) -> Result<(), SvgError> {
        if !self.active {
            return Err(SvgError::NotActive);
        }
        self.active = false;

        self.header = self.build_header();
        let document = self.build();
        let frozen = match (self.scroll, self.frozen.take()) {
            (ScrollOrientation::Horizontal, Some(pane)) => Some(pane.build(self.effective_view_box())),
            _ => None,
        };

        let output = self.output.as_mut().ok_or(SvgError::NoOutput)?;
        output.write_document(&document)?;

        if let Some(frozen) = frozen {
            let mut companion = output.sibling(&frozen_name(output.name()));
            companion.open()?;
            companion.write_document(&frozen)?;
        }
        log::debug!("closed SVG session on '{}' ({} elements)", output.name(), self.body.len());
        Ok(())
    }

    // ── Assembly ────────────────────────────────────────────────────

    fn effective_view_box(&self) -> Option<RectF> {
        self.view_box
            .or_else(|| self.size.map(|s| RectF::new(0.0, 0.0, s.width, s.height)))
    }

    fn build_header(&self) -> String {
        let mut header = String::new();
        header.push_str(XML_DECLARATION);
        header.push('\n');

        header.push_str("<svg");
        if let Some(size) = self.size {
            header.push_str(&format!(
                " width=\"{}px\" height=\"{}px\"",
                fmt_num(size.width),
                fmt_num(size.height)
            ));
        }
        if let Some(vb) = self.effective_view_box() {
            header.push_str(&format!(
                " viewBox=\"{} {} {} {}\"",
                fmt_num(vb.x),
                fmt_num(vb.y),
                fmt_num(vb.width),
                fmt_num(vb.height)
            ));
        }
        header.push_str(SVG_NAMESPACES);
        header.push_str(SVG_PROFILE);
        header.push_str(&format!(" data-scroll=\"{}\">\n", self.scroll.as_attr()));

        if !self.title.is_empty() {
            header.push_str(&format!("<title>{}</title>\n", xml_escape(&self.title)));
        }
        if !self.description.is_empty() {
            header.push_str(&format!("<desc>{}</desc>\n", xml_escape(&self.description)));
        }
        header
    }

    /// Header, body and closing tag, in that order.
    fn build(&self) -> String {
        let body_len: usize = self.body.iter().map(|el| el.len() + 1).sum();
        let mut svg = String::with_capacity(self.header.len() + body_len + SVG_END.len() + 1);
        svg.push_str(&self.header);
        for el in &self.body {
            svg.push_str(el);
            svg.push('\n');
        }
        svg.push_str(SVG_END);
        svg.push('\n');
        svg
    }

    // ── Shared emitter plumbing ─────────────────────────────────────

    fn accepts_draw(&self) -> bool {
        if !self.active {
            log::debug!("draw call outside an active session ignored");
        }
        self.active
    }

    /// `<tag class=".."` plus the cue id for animated elements.
    fn element_start(&self, tag: &str, element: &ElementRef<'_>) -> String {
        let mut start = format!("<{tag} class=\"{}\"", xml_escape(&class_name(element)));
        if !self.cue_id.is_empty() && is_animated(&element.kind) {
            start.push_str(&format!(" data-cue=\"{}\"", xml_escape(&self.cue_id)));
        }
        start
    }

    fn frozen_pane_mut(&mut self) -> Option<&mut FrozenPane> {
        match self.scroll {
            ScrollOrientation::Horizontal => self.frozen.as_mut(),
            ScrollOrientation::Vertical => None,
        }
    }
}
