//! Minimal SVG writer for generator diagrams.
//!
//! Output is opaque to the engine; it only has to be well-formed markup that
//! inherits the page's text colour through `currentColor`.

use crate::model::Diagram;

pub(crate) struct Svg {
    body: String,
    width: f64,
    height: f64,
    max_width: u32,
    stroke_width: f64,
}

impl Svg {
    pub(crate) fn new(width: f64, height: f64, max_width: u32) -> Self {
        Self {
            body: String::new(),
            width,
            height,
            max_width,
            stroke_width: 1.5,
        }
    }

    pub(crate) fn with_stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    pub(crate) fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> &mut Self {
        self.body.push_str(&format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="currentColor"/>"#,
            n(x1),
            n(y1),
            n(x2),
            n(y2)
        ));
        self
    }

    pub(crate) fn dashed_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> &mut Self {
        self.body.push_str(&format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="currentColor" stroke-dasharray="3,3"/>"#,
            n(x1),
            n(y1),
            n(x2),
            n(y2)
        ));
        self
    }

    pub(crate) fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str) -> &mut Self {
        self.body.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}" stroke="currentColor"/>"#,
            n(x),
            n(y),
            n(w),
            n(h)
        ));
        self
    }

    pub(crate) fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str) -> &mut Self {
        self.body.push_str(&format!(
            r#"<circle cx="{}" cy="{}" r="{}" fill="{fill}" stroke="currentColor"/>"#,
            n(cx),
            n(cy),
            n(r)
        ));
        self
    }

    pub(crate) fn dot(&mut self, cx: f64, cy: f64, r: f64) -> &mut Self {
        self.body.push_str(&format!(
            r#"<circle cx="{}" cy="{}" r="{}" fill="currentColor" stroke="none"/>"#,
            n(cx),
            n(cy),
            n(r)
        ));
        self
    }

    pub(crate) fn path(&mut self, d: &str, fill: &str) -> &mut Self {
        self.body.push_str(&format!(
            r#"<path d="{d}" fill="{fill}" stroke="currentColor"/>"#
        ));
        self
    }

    pub(crate) fn polygon(&mut self, points: &[(f64, f64)], fill: &str) -> &mut Self {
        let points = points
            .iter()
            .map(|(x, y)| format!("{},{}", n(*x), n(*y)))
            .collect::<Vec<_>>()
            .join(" ");
        self.body.push_str(&format!(
            r#"<polygon points="{points}" fill="{fill}" stroke="currentColor"/>"#
        ));
        self
    }

    /// Small square marking a right angle with its corner at `(x, y)`.
    pub(crate) fn right_angle_marker(&mut self, x: f64, y: f64) -> &mut Self {
        let d = format!(
            "M {} {} L {} {} L {} {}",
            n(x + 5.0),
            n(y),
            n(x + 5.0),
            n(y - 5.0),
            n(x),
            n(y - 5.0)
        );
        self.path(&d, "none")
    }

    pub(crate) fn text(&mut self, x: f64, y: f64, anchor: Anchor, label: &str) -> &mut Self {
        self.body.push_str(&format!(
            r#"<text x="{}" y="{}" font-size="10" text-anchor="{}" dominant-baseline="middle" fill="currentColor" stroke="none">{label}</text>"#,
            n(x),
            n(y),
            anchor.as_str()
        ));
        self
    }

    pub(crate) fn finish(&self) -> Diagram {
        Diagram::new(format!(
            r#"<svg viewBox="0 0 {} {}" xmlns="http://www.w3.org/2000/svg" style="stroke-width:{};max-width:{}px;height:auto;">{}</svg>"#,
            n(self.width),
            n(self.height),
            n(self.stroke_width),
            self.max_width,
            self.body
        ))
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        }
    }
}

/// Coordinates are written with at most two decimals.
fn n(value: f64) -> String {
    super::decimal_text(value, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_wraps_body_in_svg_root() {
        let mut svg = Svg::new(100.0, 50.0, 150);
        svg.line(0.0, 0.0, 10.5, 20.0)
            .text(5.0, 5.0, Anchor::Middle, "x°");
        let markup = svg.finish();
        let markup = markup.markup();
        assert!(markup.starts_with(r#"<svg viewBox="0 0 100 50""#));
        assert!(markup.contains(r#"x2="10.5""#));
        assert!(markup.contains(">x°</text>"));
        assert!(markup.ends_with("</svg>"));
    }
}
