//! Session options, loadable from JSON.
//!
//! Hosts that drive the backend from a separate process (or store export
//! presets) can describe a session's metadata as a small JSON object:
//!
//! ```json
//! { "title": "Asa branca", "size": { "width": 800, "height": 400 },
//!   "scroll": "horizontal", "staff_count": 2 }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::SvgError;
use crate::model::{RectF, ScrollOrientation, SizeF};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Pixel size of the document
    pub size: Option<SizeF>,
    /// Logical coordinate system
    pub view_box: Option<RectF>,
    /// Dots per inch; font point sizes are converted with it
    pub resolution: Option<u32>,
    pub scroll: Option<ScrollOrientation>,
    /// Number of staves the frozen pane lays out placeholders for
    pub staff_count: Option<usize>,
}

impl SessionOptions {
    pub fn from_json(json: &str) -> Result<Self, SvgError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SvgError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_partial_options() {
        let opts = SessionOptions::from_json(
            r#"{ "title": "Asa branca", "size": { "width": 800, "height": 400 }, "scroll": "horizontal" }"#,
        )
        .unwrap();
        assert_eq!(opts.title.as_deref(), Some("Asa branca"));
        assert_eq!(opts.size, Some(SizeF::new(800.0, 400.0)));
        assert_eq!(opts.scroll, Some(ScrollOrientation::Horizontal));
        assert_eq!(opts.view_box, None);
        assert_eq!(opts.resolution, None);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = SessionOptions::from_json("{ \"size\": 3 }").unwrap_err();
        assert!(matches!(err, SvgError::InvalidOptions(_)));
    }
}
