//! Semantic classes — the `class` token each element is tagged with, so an
//! external stylesheet can govern most visuals.

use crate::model::{BarLineType, ElementKind, ElementRef};

/// Style class for an element.
///
/// Most elements use their type name. Non-normal bar lines carry their
/// subtype (`BarLineFinal`). Text uses its style name when it has one,
/// otherwise its parent's type (`FingeringText`), otherwise `Text`.
pub fn class_name(element: &ElementRef<'_>) -> String {
    match element.kind {
        ElementKind::BarLine(subtype) if subtype != BarLineType::Normal => {
            format!("BarLine{}", subtype.as_str())
        }
        ElementKind::Text => {
            let name: String = element.name.split_whitespace().collect();
            if !name.is_empty() {
                name
            } else if let Some(parent) = element.parent {
                format!("{}Text", parent.kind.as_str())
            } else {
                "Text".to_string()
            }
        }
        kind => kind.as_str().to_string(),
    }
}

/// Elements that follow playback and therefore carry the active cue id.
pub fn is_animated(kind: &ElementKind) -> bool {
    matches!(
        kind,
        ElementKind::Accidental
            | ElementKind::Articulation
            | ElementKind::Beam
            | ElementKind::Lyrics
            | ElementKind::Note
            | ElementKind::NoteDot
            | ElementKind::Rest
            | ElementKind::SlurSegment
            | ElementKind::Stem
            | ElementKind::Tremolo
    )
}
