//! SVG document output.

use std::fmt::Write;

use fv_core::{CanvasSize, Real, Vec2, format_coord};

use crate::encode::Color;
use crate::geometry::EdgePath;
use crate::surface::{Stroke, Surface, TextAnchor, TextStyle};

/// Height of the band above the canvas that holds the title.
const TITLE_BAND: Real = 32.0;

/// Escape text for XML content and attribute values.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn stroke_attrs(stroke: Option<&Stroke>) -> String {
    match stroke {
        None => String::from(r#" stroke="none""#),
        Some(s) => {
            let mut attrs = format!(
                r#" stroke="{}" stroke-width="{}""#,
                s.color,
                format_coord(s.width)
            );
            if let Some((dash, gap)) = s.dash {
                let _ = write!(
                    attrs,
                    r#" stroke-dasharray="{},{}""#,
                    format_coord(dash),
                    format_coord(gap)
                );
            }
            attrs
        }
    }
}

fn fill_attr(fill: Option<Color>) -> String {
    match fill {
        Some(c) => format!(r#" fill="{c}""#),
        None => String::from(r#" fill="none""#),
    }
}

/// Collects draw calls into an SVG document.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    canvas: CanvasSize,
    background: Option<Color>,
    title: Option<(String, Color)>,
    body: String,
}

impl SvgSurface {
    pub fn new(canvas: CanvasSize) -> Self {
        Self {
            canvas,
            background: None,
            title: None,
            body: String::new(),
        }
    }

    /// The complete document.
    pub fn finish(&self) -> String {
        let band = if self.title.is_some() { TITLE_BAND } else { 0.0 };
        let width = format_coord(self.canvas.width);
        let height = format_coord(self.canvas.height + band);
        let mut doc = String::new();
        let _ = writeln!(
            doc,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="sans-serif">"#
        );
        if let Some((text, color)) = &self.title {
            let _ = writeln!(
                doc,
                r#"<text x="4" y="22" font-size="18" font-weight="600" fill="{color}">{}</text>"#,
                escape_xml(text)
            );
        }
        let _ = writeln!(doc, r#"<g transform="translate(0,{})">"#, format_coord(band));
        if let Some(bg) = self.background {
            let _ = writeln!(
                doc,
                r#"<rect width="{}" height="{}" fill="{bg}"/>"#,
                format_coord(self.canvas.width),
                format_coord(self.canvas.height)
            );
        }
        doc.push_str(&self.body);
        doc.push_str("</g>\n</svg>\n");
        doc
    }

    fn points(points: &[Vec2]) -> String {
        points
            .iter()
            .map(|p| format!("{},{}", format_coord(p.x), format_coord(p.y)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Surface for SvgSurface {
    fn clear(&mut self, background: Color) {
        self.body.clear();
        self.title = None;
        self.background = Some(background);
    }

    fn title(&mut self, text: &str, color: Color) {
        self.title = Some((text.to_string(), color));
    }

    fn edge(&mut self, path: &EdgePath, stroke: &Stroke) {
        let _ = writeln!(
            self.body,
            r#"<path d="{}" fill="none"{}/>"#,
            path.svg_d(),
            stroke_attrs(Some(stroke))
        );
    }

    fn polygon(&mut self, points: &[Vec2], fill: Option<Color>, stroke: Option<&Stroke>) {
        let _ = writeln!(
            self.body,
            r#"<polygon points="{}"{}{}/>"#,
            Self::points(points),
            fill_attr(fill),
            stroke_attrs(stroke)
        );
    }

    fn circle(&mut self, center: Vec2, radius: Real, fill: Option<Color>, stroke: Option<&Stroke>) {
        let _ = writeln!(
            self.body,
            r#"<circle cx="{}" cy="{}" r="{}"{}{}/>"#,
            format_coord(center.x),
            format_coord(center.y),
            format_coord(radius),
            fill_attr(fill),
            stroke_attrs(stroke)
        );
    }

    fn line(&mut self, from: Vec2, to: Vec2, stroke: &Stroke) {
        let _ = writeln!(
            self.body,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
            format_coord(from.x),
            format_coord(from.y),
            format_coord(to.x),
            format_coord(to.y),
            stroke_attrs(Some(stroke))
        );
    }

    fn text(&mut self, at: Vec2, text: &str, style: &TextStyle) {
        let anchor = match style.anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
        };
        let weight = if style.bold { r#" font-weight="600""# } else { "" };
        let halo = match &style.halo {
            Some(h) => format!(
                r#" stroke="{}" stroke-width="{}" paint-order="stroke" stroke-linejoin="round""#,
                h.color,
                format_coord(h.width)
            ),
            None => String::new(),
        };
        let _ = writeln!(
            self.body,
            r#"<text x="{}" y="{}" font-size="{}" text-anchor="{anchor}" fill="{}"{weight}{halo}>{}</text>"#,
            format_coord(at.x),
            format_coord(at.y),
            format_coord(style.size),
            style.color,
            escape_xml(text)
        );
    }

    fn tooltip(&mut self, center: Vec2, radius: Real, text: &str) {
        let _ = writeln!(
            self.body,
            r#"<circle cx="{}" cy="{}" r="{}" fill="transparent"><title>{}</title></circle>"#,
            format_coord(center.x),
            format_coord(center.y),
            format_coord(radius),
            escape_xml(text)
        );
    }
}
