//! Paint state → inline style attributes.
//!
//! Every attribute is written with a leading space so the result can be
//! appended directly after an element's other attributes. Values equal to
//! the SVG defaults are left out.

use crate::model::{
    BarLineType, CapStyle, Color, ElementKind, Fill, FillStyle, JoinStyle, PaintState, Stroke,
    StrokeStyle,
};

use super::writer::fmt_num;

/// Element types whose look comes from the external stylesheet; no inline
/// stroke or fill is written for them. Only normal bar lines qualify.
pub fn is_styled_externally(kind: &ElementKind) -> bool {
    match kind {
        ElementKind::BarLine(subtype) => *subtype == BarLineType::Normal,
        ElementKind::Accidental
        | ElementKind::Articulation
        | ElementKind::Beam
        | ElementKind::Bracket
        | ElementKind::Clef
        | ElementKind::KeySig
        | ElementKind::Lyrics
        | ElementKind::Note
        | ElementKind::NoteDot
        | ElementKind::RehearsalMark
        | ElementKind::Rest
        | ElementKind::SlurSegment
        | ElementKind::StaffLines
        | ElementKind::Stem
        | ElementKind::System
        | ElementKind::Text
        | ElementKind::TimeSig
        | ElementKind::Tremolo
        | ElementKind::Tuplet => true,
        _ => false,
    }
}

/// Fill then stroke attributes for the element, or nothing if it is styled
/// externally.
pub fn encode_state(kind: &ElementKind, paint: &PaintState) -> String {
    if is_styled_externally(kind) {
        return String::new();
    }
    let mut attrs = encode_fill(&paint.fill);
    attrs.push_str(&encode_stroke(&paint.stroke));
    attrs
}

pub fn encode_fill(fill: &Fill) -> String {
    let mut attrs = String::new();
    match fill.style {
        FillStyle::Solid => {
            if fill.color != Color::BLACK {
                attrs.push_str(&format!(" fill=\"{}\"", fill.color.to_hex()));
            }
            if fill.opacity != 1.0 {
                attrs.push_str(&format!(" fill-opacity=\"{}\"", fmt_num(fill.opacity)));
            }
        }
        FillStyle::None => attrs.push_str(" fill=\"none\""),
        FillStyle::Pattern
        | FillStyle::LinearGradient
        | FillStyle::RadialGradient
        | FillStyle::ConicalGradient
        | FillStyle::Texture => {
            log::warn!("unsupported fill style {:?}; fill omitted", fill.style);
        }
        FillStyle::Other => log::warn!("unrecognized fill style; fill omitted"),
    }
    attrs
}

pub fn encode_stroke(stroke: &Stroke) -> String {
    let dashed = match stroke.style {
        StrokeStyle::None => return String::new(),
        StrokeStyle::Other => {
            log::warn!("unrecognized stroke style; stroke omitted");
            return String::new();
        }
        StrokeStyle::Solid => false,
        StrokeStyle::Dashed => true,
    };

    let mut attrs = format!(" stroke=\"{}\"", stroke.color.to_hex());
    if stroke.opacity != 1.0 {
        attrs.push_str(&format!(" stroke-opacity=\"{}\"", fmt_num(stroke.opacity)));
    }
    if stroke.width != 0.0 && stroke.width != 1.0 {
        attrs.push_str(&format!(" stroke-width=\"{}\"", fmt_num(stroke.width)));
    }

    if dashed {
        // Dash lengths are in stroke widths; a hairline counts as width 1.
        let unit = if stroke.width > 0.0 { stroke.width } else { 1.0 };
        if stroke.dash_pattern.is_empty() {
            log::warn!("dashed stroke without a dash pattern; dashes omitted");
        } else {
            let dashes: Vec<String> = stroke.dash_pattern.iter().map(|d| fmt_num(d * unit)).collect();
            attrs.push_str(&format!(" stroke-dasharray=\"{}\"", dashes.join(",")));
            attrs.push_str(&format!(
                " stroke-dashoffset=\"{}\"",
                fmt_num(stroke.dash_offset * unit)
            ));
        }
    }

    match stroke.cap {
        CapStyle::Flat => {}
        CapStyle::Square => attrs.push_str(" stroke-linecap=\"square\""),
        CapStyle::Round => attrs.push_str(" stroke-linecap=\"round\""),
        CapStyle::Other => log::warn!("unrecognized cap style; linecap omitted"),
    }

    match stroke.join {
        JoinStyle::Miter => {
            attrs.push_str(" stroke-linejoin=\"miter\"");
            attrs.push_str(&format!(" stroke-miterlimit=\"{}\"", fmt_num(stroke.miter_limit)));
        }
        JoinStyle::Bevel => attrs.push_str(" stroke-linejoin=\"bevel\""),
        JoinStyle::Round => attrs.push_str(" stroke-linejoin=\"round\""),
        JoinStyle::Other => log::warn!("unrecognized join style; linejoin omitted"),
    }

    if stroke.cosmetic {
        attrs.push_str(" vector-effect=\"non-scaling-stroke\"");
    }
    attrs
}
