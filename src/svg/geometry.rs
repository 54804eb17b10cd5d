//! Path, polygon/polyline and image emitters.

use base64::Engine;

use crate::model::{
    ElementKind, ElementRef, FillRule, Path, PathSegment, PointF, PolygonMode, RasterImage, RectF,
};

use super::constants::*;
use super::state::{encode_state, is_styled_externally};
use super::writer::{fmt_num, fmt_point};
use super::SvgSession;

impl SvgSession {
    /// Draw a path outline. Calls without an element are ignored.
    pub fn draw_path(&mut self, element: Option<&ElementRef<'_>>, path: &Path) {
        let Some(element) = element else { return };
        if !self.accepts_draw() {
            return;
        }
        if element.kind == ElementKind::RehearsalMark {
            // The frame the host hands over is unreliable; draw a fixed one instead.
            self.draw_rehearsal_frame(element);
            return;
        }

        let mut el = self.element_start("path", element);
        el.push_str(&format!(" d=\"{}\"", path_data(&path.segments, self.paint.translation)));
        el.push_str(&encode_state(&element.kind, &self.paint));
        if path.fill_rule == FillRule::OddEven && !is_styled_externally(&element.kind) {
            el.push_str(" fill-rule=\"evenodd\"");
        }
        el.push_str("/>");
        self.body.push(el);
    }

    fn draw_rehearsal_frame(&mut self, element: &ElementRef<'_>) {
        let origin = element.bbox.origin().translated(self.paint.translation);
        let mut el = self.element_start("rect", element);
        el.push_str(&format!(
            " x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" rx=\"{r}\" ry=\"{r}\"/>",
            fmt_num(origin.x),
            fmt_num(origin.y),
            fmt_num(REHEARSAL_FRAME_WIDTH),
            fmt_num(REHEARSAL_FRAME_HEIGHT),
            r = fmt_num(REHEARSAL_FRAME_RADIUS),
        ));
        self.body.push(el);
    }

    /// Draw a point list: an open polyline, or a filled polygon via
    /// [`draw_path`](Self::draw_path).
    pub fn draw_polygon(&mut self, element: Option<&ElementRef<'_>>, points: &[PointF], mode: PolygonMode) {
        let Some(element) = element else { return };
        let fill_rule = match mode {
            PolygonMode::Polyline => {
                self.draw_polyline(element, points);
                return;
            }
            PolygonMode::OddEvenFill => FillRule::OddEven,
            PolygonMode::WindingFill | PolygonMode::ConvexFill => FillRule::Winding,
        };
        self.draw_path(Some(element), &Path::closed_polygon(points, fill_rule));
    }

    fn draw_polyline(&mut self, element: &ElementRef<'_>, points: &[PointF]) {
        if !self.accepts_draw() {
            return;
        }
        let offset = self.paint.translation;
        let translated: Vec<PointF> = points.iter().map(|p| p.translated(offset)).collect();
        let coords: Vec<String> = translated.iter().map(|&p| fmt_point(p)).collect();

        let mut el = self.element_start("polyline", element);
        el.push_str(&format!(" points=\"{}\"", coords.join(" ")));
        el.push_str(&encode_state(&element.kind, &self.paint));
        el.push_str("/>");
        self.body.push(el);

        if matches!(element.kind, ElementKind::StaffLines | ElementKind::System) {
            if let Some(frozen) = self.frozen_pane_mut() {
                frozen.add_line(&element.kind, &translated);
            }
        }
    }

    /// Embed a raster image, stretched to `target`.
    pub fn draw_image(&mut self, element: Option<&ElementRef<'_>>, target: RectF, image: &RasterImage) {
        let Some(element) = element else { return };
        if !self.accepts_draw() {
            return;
        }
        let origin = target.origin().translated(self.paint.translation);
        let payload = base64::engine::general_purpose::STANDARD.encode(&image.data);

        let mut el = self.element_start("image", element);
        el.push_str(&format!(
            " x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"none\" xlink:href=\"data:{};base64,{}\"/>",
            fmt_num(origin.x),
            fmt_num(origin.y),
            fmt_num(target.width),
            fmt_num(target.height),
            image.format.mime(),
            payload
        ));
        self.body.push(el);
    }
}

/// Path data with one command token per segment, translated by `offset`.
pub(super) fn path_data(segments: &[PathSegment], offset: PointF) -> String {
    let tokens: Vec<String> = segments
        .iter()
        .map(|seg| match *seg {
            PathSegment::MoveTo(p) => format!("M{}", fmt_point(p.translated(offset))),
            PathSegment::LineTo(p) => format!("L{}", fmt_point(p.translated(offset))),
            PathSegment::CurveTo { c1, c2, end } => format!(
                "C{} {} {}",
                fmt_point(c1.translated(offset)),
                fmt_point(c2.translated(offset)),
                fmt_point(end.translated(offset)),
            ),
            PathSegment::Close => "Z".to_string(),
        })
        .collect();
    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Color, Fill, ImageFormat, PaintState, SizeF, Stroke, Transform};
    use crate::sink::MemorySink;
    use pretty_assertions::assert_eq;

    fn open_session(sink: &MemorySink) -> SvgSession {
        let mut s = SvgSession::new();
        s.set_size(SizeF::new(200.0, 100.0));
        s.set_output(Box::new(sink.clone()));
        assert!(s.open());
        s
    }

    fn body_lines(doc: &str) -> Vec<&str> {
        doc.lines()
            .skip(2)
            .filter(|l| *l != "</svg>")
            .collect()
    }

    #[test]
    fn path_data_translates_every_point() {
        let segs = [
            PathSegment::MoveTo(PointF::new(0.0, 0.0)),
            PathSegment::CurveTo {
                c1: PointF::new(1.0, 2.0),
                c2: PointF::new(3.0, 4.0),
                end: PointF::new(5.0, 6.0),
            },
            PathSegment::LineTo(PointF::new(-10.0, 0.25)),
            PathSegment::Close,
        ];
        assert_eq!(
            path_data(&segs, PointF::new(10.0, 100.0)),
            "M10,100 C11,102 13,104 15,106 L0,100.25 Z"
        );
    }

    #[test]
    fn even_odd_only_outside_suppression_set() {
        let sink = MemorySink::new("a.svg");
        let mut s = open_session(&sink);
        let mut path = Path::closed_polygon(
            &[PointF::new(0.0, 0.0), PointF::new(4.0, 0.0), PointF::new(4.0, 4.0)],
            FillRule::OddEven,
        );
        s.draw_path(Some(&ElementRef::new(ElementKind::Hairpin)), &path);
        s.draw_path(Some(&ElementRef::new(ElementKind::Note)), &path);
        path.fill_rule = FillRule::Winding;
        s.draw_path(Some(&ElementRef::new(ElementKind::Hairpin)), &path);
        assert!(s.close());

        let doc = sink.contents();
        assert_eq!(
            body_lines(&doc),
            vec![
                "<path class=\"Hairpin\" d=\"M0,0 L4,0 L4,4 Z\" fill-rule=\"evenodd\"/>",
                "<path class=\"Note\" d=\"M0,0 L4,0 L4,4 Z\"/>",
                "<path class=\"Hairpin\" d=\"M0,0 L4,0 L4,4 Z\"/>",
            ]
        );
    }

    #[test]
    fn rehearsal_mark_draws_fixed_frame() {
        let sink = MemorySink::new("a.svg");
        let mut s = open_session(&sink);
        s.update_state(PaintState::new(
            Stroke::solid(Color::BLACK, 2.0),
            Fill::none(),
            &Transform::translate(5.0, 5.0),
        ));
        let mark = ElementRef::new(ElementKind::RehearsalMark).with_bbox(RectF::new(10.0, 20.0, 31.0, 17.0));
        let bogus = Path::new(vec![PathSegment::MoveTo(PointF::new(0.0, 0.0))]);
        s.draw_path(Some(&mark), &bogus);
        assert!(s.close());
        assert_eq!(
            body_lines(&sink.contents()),
            vec!["<rect class=\"RehearsalMark\" x=\"15\" y=\"25\" width=\"24\" height=\"24\" rx=\"4\" ry=\"4\"/>"]
        );
    }

    #[test]
    fn polyline_and_filled_polygon() {
        let sink = MemorySink::new("a.svg");
        let mut s = open_session(&sink);
        s.update_state(PaintState::new(
            Stroke::solid(Color::rgb(255, 0, 0), 1.5),
            Fill::default(),
            &Transform::translate(1.0, 2.0),
        ));
        let pts = [PointF::new(0.0, 0.0), PointF::new(10.0, 0.0), PointF::new(10.0, 5.0)];
        let hairpin = ElementRef::new(ElementKind::Hairpin);
        s.draw_polygon(Some(&hairpin), &pts, PolygonMode::Polyline);
        s.draw_polygon(Some(&hairpin), &pts, PolygonMode::ConvexFill);
        assert!(s.close());
        assert_eq!(
            body_lines(&sink.contents()),
            vec![
                "<polyline class=\"Hairpin\" points=\"1,2 11,2 11,7\" stroke=\"#ff0000\" stroke-width=\"1.5\" stroke-linejoin=\"bevel\"/>",
                "<path class=\"Hairpin\" d=\"M1,2 L11,2 L11,7 Z\" stroke=\"#ff0000\" stroke-width=\"1.5\" stroke-linejoin=\"bevel\"/>",
            ]
        );
    }

    #[test]
    fn image_is_embedded_as_base64() {
        let sink = MemorySink::new("a.svg");
        let mut s = open_session(&sink);
        let img = RasterImage { format: ImageFormat::Png, data: b"abc".to_vec() };
        s.draw_image(
            Some(&ElementRef::new(ElementKind::Image)),
            RectF::new(2.0, 3.0, 40.0, 30.0),
            &img,
        );
        assert!(s.close());
        assert_eq!(
            body_lines(&sink.contents()),
            vec!["<image class=\"Image\" x=\"2\" y=\"3\" width=\"40\" height=\"30\" preserveAspectRatio=\"none\" xlink:href=\"data:image/png;base64,YWJj\"/>"]
        );
    }

    #[test]
    fn draws_without_element_or_session_are_ignored() {
        let sink = MemorySink::new("a.svg");
        let mut idle = SvgSession::new();
        idle.draw_path(Some(&ElementRef::new(ElementKind::Note)), &Path::default());
        assert!(idle.body.is_empty());

        let mut s = open_session(&sink);
        s.draw_path(None, &Path::default());
        s.draw_polygon(None, &[PointF::new(0.0, 0.0)], PolygonMode::Polyline);
        s.draw_image(None, RectF::default(), &RasterImage { format: ImageFormat::Gif, data: vec![] });
        assert!(s.body.is_empty());
        assert!(s.close());
    }
}
