//! Data model for the drawing calls a host engraving engine issues.
//!
//! These structures capture what the SVG backend needs to know about
//! each call: the element being drawn, the active paint state, and the
//! geometry or glyph payload itself.

use serde::{Deserialize, Serialize};

/// Number of voices per staff; a track index divided by this is the staff index.
pub const VOICES: usize = 4;

// ─── Geometry ────────────────────────────────────────────────────────

/// A point in host coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

impl PointF {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Shift by a translation offset.
    pub fn translated(self, offset: PointF) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y)
    }
}

/// Width and height, used for the document's pixel size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeF {
    pub width: f64,
    pub height: f64,
}

impl SizeF {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RectF {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RectF {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn origin(&self) -> PointF {
        PointF::new(self.x, self.y)
    }
}

/// One segment of a path outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathSegment {
    MoveTo(PointF),
    LineTo(PointF),
    /// Cubic Bézier: two control points and the end point
    CurveTo { c1: PointF, c2: PointF, end: PointF },
    Close,
}

/// How overlapping sub-paths are filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillRule {
    /// Non-zero winding, the SVG default
    #[default]
    Winding,
    OddEven,
}

/// A path outline as handed over by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub segments: Vec<PathSegment>,
    #[serde(default)]
    pub fill_rule: FillRule,
}

impl Path {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments, fill_rule: FillRule::Winding }
    }

    /// Closed outline through `points`: one move, one line per further point, close.
    pub fn closed_polygon(points: &[PointF], fill_rule: FillRule) -> Self {
        let mut segments = Vec::with_capacity(points.len() + 1);
        for (i, &p) in points.iter().enumerate() {
            segments.push(if i == 0 { PathSegment::MoveTo(p) } else { PathSegment::LineTo(p) });
        }
        if !points.is_empty() {
            segments.push(PathSegment::Close);
        }
        Self { segments, fill_rule }
    }
}

/// Draw mode for a point list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolygonMode {
    OddEvenFill,
    WindingFill,
    ConvexFill,
    /// Open line through the points, never filled
    Polyline,
}

// ─── Paint state ─────────────────────────────────────────────────────

/// An opaque RGB color; opacity is carried separately by the descriptors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeStyle {
    /// Nothing is stroked
    #[default]
    None,
    Solid,
    /// Dash lengths come from `Stroke::dash_pattern`
    Dashed,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapStyle {
    #[default]
    Flat,
    Square,
    Round,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinStyle {
    Miter,
    #[default]
    Bevel,
    Round,
    #[serde(other)]
    Other,
}

/// Stroke (pen) descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stroke {
    pub style: StrokeStyle,
    pub color: Color,
    /// 0.0 ..= 1.0
    pub opacity: f64,
    /// Line width in user units; 0 is a hairline
    pub width: f64,
    /// Dash and gap lengths, in multiples of the stroke width
    pub dash_pattern: Vec<f64>,
    /// Dash offset, in multiples of the stroke width
    pub dash_offset: f64,
    pub cap: CapStyle,
    pub join: JoinStyle,
    pub miter_limit: f64,
    /// Width stays constant regardless of scaling
    pub cosmetic: bool,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            style: StrokeStyle::None,
            color: Color::BLACK,
            opacity: 1.0,
            width: 1.0,
            dash_pattern: Vec::new(),
            dash_offset: 0.0,
            cap: CapStyle::Flat,
            join: JoinStyle::Bevel,
            miter_limit: 2.0,
            cosmetic: false,
        }
    }
}

impl Stroke {
    pub fn solid(color: Color, width: f64) -> Self {
        Self { style: StrokeStyle::Solid, color, width, ..Self::default() }
    }

    pub fn dashed(color: Color, width: f64, pattern: Vec<f64>, offset: f64) -> Self {
        Self {
            style: StrokeStyle::Dashed,
            color,
            width,
            dash_pattern: pattern,
            dash_offset: offset,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillStyle {
    None,
    #[default]
    Solid,
    Pattern,
    LinearGradient,
    RadialGradient,
    ConicalGradient,
    Texture,
    #[serde(other)]
    Other,
}

/// Fill (brush) descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Fill {
    pub style: FillStyle,
    pub color: Color,
    pub opacity: f64,
}

impl Default for Fill {
    fn default() -> Self {
        Self { style: FillStyle::Solid, color: Color::BLACK, opacity: 1.0 }
    }
}

impl Fill {
    pub fn solid(color: Color) -> Self {
        Self { color, ..Self::default() }
    }

    pub fn none() -> Self {
        Self { style: FillStyle::None, ..Self::default() }
    }
}

/// A 2D affine transform in row-vector form, as hosts usually hand it over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub m11: f64,
    pub m12: f64,
    pub m21: f64,
    pub m22: f64,
    pub dx: f64,
    pub dy: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::translate(0.0, 0.0)
    }
}

impl Transform {
    pub const fn translate(dx: f64, dy: f64) -> Self {
        Self { m11: 1.0, m12: 0.0, m21: 0.0, m22: 1.0, dx, dy }
    }

    pub fn is_translation_only(&self) -> bool {
        self.m11 == 1.0 && self.m12 == 0.0 && self.m21 == 0.0 && self.m22 == 1.0
    }
}

/// The paint state active for subsequent draw calls.
///
/// Only the translation part of the host transform is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintState {
    pub stroke: Stroke,
    pub fill: Fill,
    pub translation: PointF,
}

impl PaintState {
    pub fn new(stroke: Stroke, fill: Fill, transform: &Transform) -> Self {
        if !transform.is_translation_only() {
            log::debug!("dropping rotation/scale from transform {transform:?}");
        }
        Self { stroke, fill, translation: PointF::new(transform.dx, transform.dy) }
    }
}

// ─── Elements ────────────────────────────────────────────────────────

/// Bar line subtype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BarLineType {
    #[default]
    Normal,
    Double,
    StartRepeat,
    EndRepeat,
    EndStartRepeat,
    Dashed,
    Dotted,
    Final,
}

impl BarLineType {
    pub fn as_str(self) -> &'static str {
        match self {
            BarLineType::Normal => "Normal",
            BarLineType::Double => "Double",
            BarLineType::StartRepeat => "StartRepeat",
            BarLineType::EndRepeat => "EndRepeat",
            BarLineType::EndStartRepeat => "EndStartRepeat",
            BarLineType::Dashed => "Dashed",
            BarLineType::Dotted => "Dotted",
            BarLineType::Final => "Final",
        }
    }
}

/// The closed set of element types the backend distinguishes, with the
/// few per-type fields it reads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Accidental,
    Articulation,
    BarLine(BarLineType),
    Beam,
    Bracket,
    Clef,
    Dynamic,
    Fingering,
    Glissando,
    Hairpin,
    Harmony,
    Hook,
    Image,
    InstrumentName,
    KeySig,
    LedgerLine,
    Lyrics,
    Note,
    NoteDot,
    RehearsalMark,
    Rest,
    SlurSegment,
    StaffLines,
    Stem,
    System,
    /// Tempo marking; the host keeps tempo in beats per second
    TempoText { beats_per_second: f64 },
    Text,
    TieSegment,
    TimeSig,
    Tremolo,
    Tuplet,
    Other,
}

impl ElementKind {
    /// The element's type name, also its default style class.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Accidental => "Accidental",
            ElementKind::Articulation => "Articulation",
            ElementKind::BarLine(_) => "BarLine",
            ElementKind::Beam => "Beam",
            ElementKind::Bracket => "Bracket",
            ElementKind::Clef => "Clef",
            ElementKind::Dynamic => "Dynamic",
            ElementKind::Fingering => "Fingering",
            ElementKind::Glissando => "Glissando",
            ElementKind::Hairpin => "Hairpin",
            ElementKind::Harmony => "Harmony",
            ElementKind::Hook => "Hook",
            ElementKind::Image => "Image",
            ElementKind::InstrumentName => "InstrumentName",
            ElementKind::KeySig => "KeySig",
            ElementKind::LedgerLine => "LedgerLine",
            ElementKind::Lyrics => "Lyrics",
            ElementKind::Note => "Note",
            ElementKind::NoteDot => "NoteDot",
            ElementKind::RehearsalMark => "RehearsalMark",
            ElementKind::Rest => "Rest",
            ElementKind::SlurSegment => "SlurSegment",
            ElementKind::StaffLines => "StaffLines",
            ElementKind::Stem => "Stem",
            ElementKind::System => "System",
            ElementKind::TempoText { .. } => "TempoText",
            ElementKind::Text => "Text",
            ElementKind::TieSegment => "TieSegment",
            ElementKind::TimeSig => "TimeSig",
            ElementKind::Tremolo => "Tremolo",
            ElementKind::Tuplet => "Tuplet",
            ElementKind::Other => "Other",
        }
    }
}

/// The element currently being drawn. Borrowed from the host for the
/// duration of one call.
#[derive(Debug, Clone, Copy)]
pub struct ElementRef<'a> {
    pub kind: ElementKind,
    /// Display name; for text this is the text style (e.g. "Title")
    pub name: &'a str,
    pub parent: Option<&'a ElementRef<'a>>,
    /// Track index: staff index × `VOICES` + voice
    pub track: usize,
    pub visible: bool,
    /// Bounding box in page coordinates
    pub bbox: RectF,
}

impl<'a> ElementRef<'a> {
    pub fn new(kind: ElementKind) -> Self {
        Self { kind, name: "", parent: None, track: 0, visible: true, bbox: RectF::default() }
    }

    pub fn with_name(mut self, name: &'a str) -> Self {
        self.name = name;
        self
    }

    pub fn with_parent(mut self, parent: &'a ElementRef<'a>) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_track(mut self, track: usize) -> Self {
        self.track = track;
        self
    }

    pub fn with_bbox(mut self, bbox: RectF) -> Self {
        self.bbox = bbox;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn staff_idx(&self) -> usize {
        self.track / VOICES
    }
}

// ─── Payloads ────────────────────────────────────────────────────────

/// Encoding of an embedded raster image. The bytes are produced by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
}

impl ImageFormat {
    pub fn mime(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RasterImage {
    pub format: ImageFormat,
    pub data: Vec<u8>,
}

/// A run of glyphs set in one font.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlyphRun {
    /// Baseline anchor, before translation
    pub pos: PointF,
    pub text: String,
    pub font_family: String,
    /// Point size
    pub font_size: f64,
    /// The font maps notation symbols into the Unicode private-use area
    #[serde(default)]
    pub private_use: bool,
}

/// The axis along which the produced document scrolls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollOrientation {
    Horizontal,
    #[default]
    Vertical,
}

impl ScrollOrientation {
    /// Value of the root element's scroll attribute.
    pub fn as_attr(self) -> &'static str {
        match self {
            ScrollOrientation::Horizontal => "x",
            ScrollOrientation::Vertical => "y",
        }
    }
}
