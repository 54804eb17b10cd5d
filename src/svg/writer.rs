//! Low-level text helpers shared by the emitters.

use crate::model::PointF;

/// Format a coordinate or length: at most two decimals, trailing zeros
/// trimmed, never `-0`.
pub(crate) fn fmt_num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut s = format!("{v:.2}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s.remove(0);
    }
    s
}

/// `x,y`
pub(crate) fn fmt_point(p: PointF) -> String {
    format!("{},{}", fmt_num(p.x), fmt_num(p.y))
}

/// Escape the XML special characters for text content and attribute values.
pub(crate) fn xml_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_compact() {
        assert_eq!(fmt_num(2.0), "2");
        assert_eq!(fmt_num(0.5), "0.5");
        assert_eq!(fmt_num(12.346), "12.35");
        assert_eq!(fmt_num(-0.001), "0");
        assert_eq!(fmt_num(-3.10), "-3.1");
        assert_eq!(fmt_num(f64::NAN), "0");
        assert_eq!(fmt_num(100.0), "100");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(xml_escape("a < b & \"c\""), "a &lt; b &amp; &quot;c&quot;");
        assert_eq!(fmt_point(PointF::new(1.5, -2.0)), "1.5,-2");
    }
}
