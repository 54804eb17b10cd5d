//! Text emitter.
//!
//! Notation fonts put their symbols in the Unicode private-use area; those
//! runs are written one numeric character reference per glyph so the
//! stylesheet's per-glyph vertical alignment still applies.

use crate::model::{ElementKind, ElementRef, GlyphRun};

use super::constants::POINTS_PER_INCH;
use super::frozen::FrozenGroup;
use super::state::{encode_fill, is_styled_externally};
use super::writer::{fmt_num, xml_escape};
use super::SvgSession;

impl SvgSession {
    /// Draw a run of text. Calls without an element are ignored; invisible
    /// elements keep their `<text>` element but lose its content.
    pub fn draw_text(&mut self, element: Option<&ElementRef<'_>>, run: &GlyphRun) {
        let Some(element) = element else { return };
        if !self.accepts_draw() {
            return;
        }
        let anchor = run.pos.translated(self.paint.translation);
        let group = FrozenGroup::for_kind(&element.kind);

        let mut head = self.element_start("text", element);
        if group.is_some() {
            head.push_str(&format!(" data-staff=\"{}\"", element.staff_idx()));
        }
        if let ElementKind::TempoText { beats_per_second } = element.kind {
            head.push_str(&format!(" data-bpm=\"{:.3}\"", beats_per_second * 60.0));
        }

        let mut tail = String::new();
        if !is_styled_externally(&element.kind) {
            tail.push_str(&encode_fill(&self.paint.fill));
            let px = run.font_size * f64::from(self.resolution) / POINTS_PER_INCH;
            tail.push_str(&format!(
                " font-family=\"{}\" font-size=\"{}\"",
                xml_escape(&run.font_family),
                fmt_num(px)
            ));
        }
        tail.push('>');
        if element.visible {
            tail.push_str(&glyph_content(run));
        }
        tail.push_str("</text>");

        let render = |x: f64| format!("{head} x=\"{}\" y=\"{}\"{tail}", fmt_num(x), fmt_num(anchor.y));
        let el = render(anchor.x);

        if let Some(group) = group {
            let staff = match group {
                FrozenGroup::Tempo => 0,
                _ => element.staff_idx(),
            };
            let cue = self.cue_id.clone();
            if let Some(frozen) = self.frozen_pane_mut() {
                frozen.add_text(&cue, staff, group, anchor.x, render);
            }
        }
        self.body.push(el);
    }
}

/// Escaped literal text, or one `&#xHHHH;` per character for private-use fonts.
pub(super) fn glyph_content(run: &GlyphRun) -> String {
    if run.private_use {
        run.text.chars().map(|c| format!("&#x{:X};", u32::from(c))).collect()
    } else {
        xml_escape(&run.text)
    }
}
