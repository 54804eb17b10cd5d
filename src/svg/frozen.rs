//! Frozen pane — a companion document for horizontally scrolling scores.
//!
//! While the main canvas scrolls sideways, the frozen pane stays put and
//! shows what a reader needs at the left edge: staff lines, clefs, key and
//! time signatures, and the tempo. Content is grouped into definition
//! blocks keyed by (cue id, staff, group); a viewer swaps the `<use>`
//! placeholders to the block matching the current playback position.
//!
//! The pane is only 100 units wide, so its copies are laid out on the
//! pane's own x axis: each (staff, group) is anchored where its first
//! element was drawn, and a later block for that staff and group is moved
//! so its first element lands on the same anchor. Staff lines are kept
//! once per line, however many measures draw them.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::{ElementKind, PointF, RectF};

use super::constants::*;
use super::writer::{fmt_num, fmt_point};

/// The block a frozen-pane element belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum FrozenGroup {
    Tempo,
    Clef,
    /// Key and time signatures together
    Signatures,
}

impl FrozenGroup {
    const ALL: [FrozenGroup; 3] = [FrozenGroup::Tempo, FrozenGroup::Clef, FrozenGroup::Signatures];

    pub(crate) fn for_kind(kind: &ElementKind) -> Option<Self> {
        match kind {
            ElementKind::TempoText { .. } => Some(FrozenGroup::Tempo),
            ElementKind::Clef => Some(FrozenGroup::Clef),
            ElementKind::KeySig | ElementKind::TimeSig => Some(FrozenGroup::Signatures),
            _ => None,
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            FrozenGroup::Tempo => "Tempo",
            FrozenGroup::Clef => "Clef",
            FrozenGroup::Signatures => "Signatures",
        }
    }

    /// Whether the group name is also the class of its members.
    fn is_class(self) -> bool {
        matches!(self, FrozenGroup::Tempo | FrozenGroup::Clef)
    }
}

#[derive(Debug, Default)]
struct Block {
    /// Horizontal move from main-document to pane coordinates
    shift: f64,
    content: String,
}

#[derive(Debug, Default)]
pub(crate) struct FrozenPane {
    /// Staff and system lines, in drawing order
    lines: Vec<String>,
    /// Formatted y of every staff line already recorded
    staff_line_ys: BTreeSet<String>,
    /// Definition blocks by id; the map order is the output order
    blocks: BTreeMap<String, Block>,
    /// Pane x of the first element per (staff, group)
    anchors: BTreeMap<(usize, FrozenGroup), f64>,
    staff_count: Option<usize>,
    max_staff: Option<usize>,
    cue_zero: Option<String>,
}

impl FrozenPane {
    pub(crate) fn new(staff_count: Option<usize>) -> Self {
        Self { staff_count, ..Self::default() }
    }

    pub(crate) fn set_staff_count(&mut self, count: usize) {
        self.staff_count = Some(count);
    }

    /// Record a staff or system line from a polyline's (translated) points.
    /// Staff lines span from their start to the pane's right edge and are
    /// recorded once per y; a start outside the pane moves to its left edge.
    pub(crate) fn add_line(&mut self, kind: &ElementKind, points: &[PointF]) {
        let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
            return;
        };
        let (start, end) = match kind {
            ElementKind::StaffLines => {
                if !self.staff_line_ys.insert(fmt_num(first.y)) {
                    return;
                }
                let x = if (0.0..FROZEN_PANE_WIDTH).contains(&first.x) { first.x } else { 0.0 };
                (PointF::new(x, first.y), PointF::new(FROZEN_PANE_WIDTH, first.y))
            }
            ElementKind::System => (first, PointF::new(last.x, first.y)),
            _ => return,
        };
        self.lines.push(format!(
            "<polyline class=\"{}\" points=\"{} {}\"/>",
            kind.as_str(),
            fmt_point(start),
            fmt_point(end)
        ));
    }

    /// Append an element to the block for (cue, staff, group), starting the
    /// block if this is its first element. `render` receives the element's
    /// x in pane coordinates for an element drawn at `x`.
    pub(crate) fn add_text<F>(&mut self, cue: &str, staff: usize, group: FrozenGroup, x: f64, render: F)
    where
        F: FnOnce(f64) -> String,
    {
        let cue = if cue.is_empty() { "0" } else { cue };
        if self.cue_zero.is_none() {
            self.cue_zero = Some(cue.to_string());
        }
        self.max_staff = Some(self.max_staff.map_or(staff, |m| m.max(staff)));

        let anchor = *self.anchors.entry((staff, group)).or_insert_with(|| {
            if (0.0..FROZEN_PANE_WIDTH).contains(&x) { x } else { 0.0 }
        });
        let id = format!("{cue}-{staff}-{}", group.as_str());
        let block = self.blocks.entry(id).or_insert_with_key(|id| Block {
            shift: anchor - x,
            content: if group.is_class() {
                format!("<g id=\"{id}\" class=\"{}\">\n", group.as_str())
            } else {
                format!("<g id=\"{id}\">\n")
            },
        });
        block.content.push_str(&render(x + block.shift));
        block.content.push('\n');
    }

    #[cfg(test)]
    pub(crate) fn block_count(&self) -> usize {
        self.blocks.len()
    }

    fn staves(&self) -> usize {
        self.staff_count
            .unwrap_or_else(|| self.max_staff.map_or(0, |m| m + 1))
    }

    /// Assemble the companion document. `view_box` is the main document's;
    /// the pane keeps its vertical extent.
    pub(crate) fn build(&self, view_box: Option<RectF>) -> String {
        let (y, height) = view_box.map_or((0.0, 0.0), |vb| (vb.y, vb.height));
        let width = fmt_num(FROZEN_PANE_WIDTH);

        let mut svg = String::new();
        svg.push_str(XML_DECLARATION);
        svg.push('\n');
        svg.push_str(&format!(
            "<svg width=\"{width}px\" height=\"{}px\" viewBox=\"0 {} {width} {}\"{SVG_NAMESPACES}{SVG_PROFILE}>\n",
            fmt_num(height),
            fmt_num(y),
            fmt_num(height)
        ));

        let cue_zero = self.cue_zero.as_deref().unwrap_or("0");
        for staff in 0..self.staves() {
            for group in FrozenGroup::ALL {
                if group == FrozenGroup::Tempo && staff != 0 {
                    continue;
                }
                let kind = group.as_str();
                svg.push_str(&format!(
                    "<use id=\"{staff}-{kind}\" xlink:href=\"#{cue_zero}-{staff}-{kind}\"/>\n"
                ));
            }
        }

        for line in &self.lines {
            svg.push_str(line);
            svg.push('\n');
        }

        for block in self.blocks.values() {
            svg.push_str(&block.content);
            svg.push_str("</g>\n");
        }

        svg.push_str(SVG_END);
        svg.push('\n');
        svg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn same_key_appends_to_one_block() {
        let mut pane = FrozenPane::new(None);
        pane.add_text("100", 0, FrozenGroup::Clef, 10.0, |_| "<text>a</text>".to_string());
        pane.add_text("100", 0, FrozenGroup::Clef, 10.0, |_| "<text>b</text>".to_string());
        pane.add_text("100", 1, FrozenGroup::Clef, 10.0, |_| "<text>c</text>".to_string());
        assert_eq!(pane.block_count(), 2);

        let doc = pane.build(None);
        assert!(doc.contains("<g id=\"100-0-Clef\" class=\"Clef\">\n<text>a</text>\n<text>b</text>\n</g>\n"));
    }

    #[test]
    fn signatures_block_has_no_class() {
        let mut pane = FrozenPane::new(None);
        pane.add_text("7", 2, FrozenGroup::Signatures, 10.0, |_| "<text/>".to_string());
        let doc = pane.build(None);
        assert!(doc.contains("<g id=\"7-2-Signatures\">\n"));
    }

    #[test]
    fn placeholders_follow_staff_count() {
        let mut pane = FrozenPane::new(Some(2));
        pane.add_text("100", 0, FrozenGroup::Tempo, 10.0, |_| "<text/>".to_string());
        let doc = pane.build(Some(RectF::new(0.0, 0.0, 900.0, 300.0)));
        let uses: Vec<&str> = doc.lines().filter(|l| l.starts_with("<use")).collect();
        assert_eq!(
            uses,
            vec![
                "<use id=\"0-Tempo\" xlink:href=\"#100-0-Tempo\"/>",
                "<use id=\"0-Clef\" xlink:href=\"#100-0-Clef\"/>",
                "<use id=\"0-Signatures\" xlink:href=\"#100-0-Signatures\"/>",
                "<use id=\"1-Clef\" xlink:href=\"#100-1-Clef\"/>",
                "<use id=\"1-Signatures\" xlink:href=\"#100-1-Signatures\"/>",
            ]
        );
        assert!(doc.contains("width=\"100px\" height=\"300px\" viewBox=\"0 0 100 300\""));
    }

    #[test]
    fn blocks_are_sorted_by_id() {
        let mut pane = FrozenPane::new(None);
        pane.add_text("500", 0, FrozenGroup::Clef, 10.0, |_| "<text/>".to_string());
        pane.add_text("100", 0, FrozenGroup::Signatures, 10.0, |_| "<text/>".to_string());
        pane.add_text("100", 0, FrozenGroup::Clef, 10.0, |_| "<text/>".to_string());
        let doc = pane.build(None);
        let ids: Vec<&str> = doc
            .lines()
            .filter_map(|l| l.strip_prefix("<g id=\""))
            .map(|l| &l[..l.find('"').unwrap()])
            .collect();
        assert_eq!(ids, vec!["100-0-Clef", "100-0-Signatures", "500-0-Clef"]);
        // the first recorded cue anchors the placeholders
        assert!(doc.contains("xlink:href=\"#500-0-Clef\""));
    }

    #[test]
    fn staff_lines_are_clamped() {
        let mut pane = FrozenPane::new(None);
        pane.add_line(
            &ElementKind::StaffLines,
            &[PointF::new(15.0, 40.0), PointF::new(2400.0, 40.0)],
        );
        pane.add_line(
            &ElementKind::System,
            &[PointF::new(15.0, 40.0), PointF::new(30.0, 40.5), PointF::new(900.0, 41.0)],
        );
        pane.add_line(&ElementKind::Note, &[PointF::new(0.0, 0.0)]);
        let doc = pane.build(None);
        assert!(doc.contains("<polyline class=\"StaffLines\" points=\"15,40 100,40\"/>"));
        assert!(doc.contains("<polyline class=\"System\" points=\"15,40 900,40\"/>"));
        assert!(!doc.contains("class=\"Note\""));
    }

    #[test]
    fn staff_lines_are_kept_once_per_line() {
        let mut pane = FrozenPane::new(None);
        for (from, to) in [(10.0, 300.0), (300.0, 600.0)] {
            for y in [20.0, 25.0] {
                pane.add_line(&ElementKind::StaffLines, &[PointF::new(from, y), PointF::new(to, y)]);
            }
        }
        let doc = pane.build(None);
        let lines: Vec<&str> = doc.lines().filter(|l| l.starts_with("<polyline")).collect();
        assert_eq!(
            lines,
            vec![
                "<polyline class=\"StaffLines\" points=\"10,20 100,20\"/>",
                "<polyline class=\"StaffLines\" points=\"10,25 100,25\"/>",
            ]
        );
    }

    #[test]
    fn staff_line_starting_past_the_pane_starts_at_its_edge() {
        let mut pane = FrozenPane::new(None);
        pane.add_line(&ElementKind::StaffLines, &[PointF::new(350.0, 20.0), PointF::new(700.0, 20.0)]);
        pane.add_line(&ElementKind::StaffLines, &[PointF::new(-5.0, 30.0), PointF::new(700.0, 30.0)]);
        let doc = pane.build(None);
        assert!(doc.contains("points=\"0,20 100,20\""));
        assert!(doc.contains("points=\"0,30 100,30\""));
    }

    #[test]
    fn later_blocks_move_onto_the_anchor() {
        let mut pane = FrozenPane::new(None);
        let text = |x: f64| format!("<text x=\"{}\"/>", fmt_num(x));
        pane.add_text("0", 0, FrozenGroup::Clef, 12.0, text);
        pane.add_text("900", 0, FrozenGroup::Clef, 2400.0, text);
        pane.add_text("900", 0, FrozenGroup::Clef, 2410.0, text);
        // no anchor inside the pane yet: the signature lands at the left edge
        pane.add_text("900", 1, FrozenGroup::Signatures, 2450.0, text);
        let doc = pane.build(None);
        assert!(doc.contains("<g id=\"0-0-Clef\" class=\"Clef\">\n<text x=\"12\"/>\n</g>"));
        assert!(doc.contains(
            "<g id=\"900-0-Clef\" class=\"Clef\">\n<text x=\"12\"/>\n<text x=\"22\"/>\n</g>"
        ));
        assert!(doc.contains("<g id=\"900-1-Signatures\">\n<text x=\"0\"/>\n</g>"));
    }
}
