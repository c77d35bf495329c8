//! Ordered draw commands and their SVG serialization.
//!
//! A renderer pushes commands in painting order; the SVG document keeps that
//! order, so later commands cover earlier ones exactly as on a canvas.

use std::str::FromStr;

use fonts::FontAsset;

use crate::geometry::PixelRect;

/// Fill used when a stored color is not a hex code or a known color name.
pub const FALLBACK_COLOR: &str = "#808080";

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Fill {
        rect: PixelRect,
        color: String,
    },
    /// Border drawn inward from the rectangle's edges.
    Outline {
        rect: PixelRect,
        color: String,
        width: i32,
    },
    /// Single-line text anchored at its top-left corner.
    Text {
        x: f64,
        y: f64,
        size: f64,
        color: String,
        text: String,
    },
}

#[derive(Clone, Debug)]
pub struct Scene {
    width: u32,
    height: u32,
    background: String,
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new(width: u32, height: u32, background: impl Into<String>) -> Self {
        Self {
            width,
            height,
            background: background.into(),
            commands: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn fill(&mut self, rect: PixelRect, color: impl Into<String>) {
        self.commands.push(DrawCommand::Fill {
            rect,
            color: color.into(),
        });
    }

    pub fn outline(&mut self, rect: PixelRect, color: impl Into<String>, width: i32) {
        self.commands.push(DrawCommand::Outline {
            rect,
            color: color.into(),
            width,
        });
    }

    pub fn text(&mut self, (x, y): (f64, f64), size: f64, color: impl Into<String>, text: &str) {
        if text.is_empty() {
            return;
        }
        self.commands.push(DrawCommand::Text {
            x,
            y,
            size,
            color: color.into(),
            text: text.to_string(),
        });
    }

    /// SVG document for the scene. Rectangles are pixel-snapped; text uses
    /// the generic `sans-serif` family, which the rasterizer maps onto
    /// `font`, and is moved down by the font's ascent so `y` is its top.
    pub fn to_svg(&self, font: &FontAsset) -> String {
        let (w, h) = (self.width, self.height);
        let mut s = String::new();
        s.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        s.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" shape-rendering=\"crispEdges\" font-family=\"sans-serif\">\n"
        ));
        s.push_str(&format!(
            "<rect x=\"0\" y=\"0\" width=\"{w}\" height=\"{h}\" fill=\"{}\"/>\n",
            paint(&self.background)
        ));
        for cmd in &self.commands {
            match cmd {
                DrawCommand::Fill { rect, color } => push_rect(&mut s, rect, color),
                DrawCommand::Outline { rect, color, width } => {
                    for edge in outline_edges(rect, *width) {
                        push_rect(&mut s, &edge, color);
                    }
                }
                DrawCommand::Text {
                    x,
                    y,
                    size,
                    color,
                    text,
                } => {
                    let baseline = y + font.ascent(*size);
                    s.push_str(&format!(
                        "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{}\" fill=\"{}\" xml:space=\"preserve\">{}</text>\n",
                        x,
                        baseline,
                        size,
                        paint(color),
                        svg_escape(text)
                    ));
                }
            }
        }
        s.push_str("</svg>\n");
        s
    }
}

fn push_rect(s: &mut String, r: &PixelRect, color: &str) {
    let (w, h) = (r.x2 - r.x1 + 1, r.y2 - r.y1 + 1);
    if w <= 0 || h <= 0 {
        return;
    }
    s.push_str(&format!(
        "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>\n",
        r.x1,
        r.y1,
        w,
        h,
        paint(color)
    ));
}

// top, bottom, left, right
fn outline_edges(r: &PixelRect, width: i32) -> [PixelRect; 4] {
    let t = width.max(1) - 1;
    [
        PixelRect::new(r.x1, r.y1, r.x2, r.y1 + t),
        PixelRect::new(r.x1, r.y2 - t, r.x2, r.y2),
        PixelRect::new(r.x1, r.y1, r.x1 + t, r.y2),
        PixelRect::new(r.x2 - t, r.y1, r.x2, r.y2),
    ]
}

/// Colors come from user-editable data; anything beyond `#rgb`, `#rrggbb`
/// or a CSS color name falls back to gray.
fn paint(color: &str) -> &str {
    let ok = match color.strip_prefix('#') {
        Some(hex) => matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => {
            !color.is_empty()
                && color.len() <= 32
                && color.chars().all(|c| c.is_ascii_alphabetic())
                && svgtypes::Color::from_str(color).is_ok()
        }
    };
    if ok { color } else { FALLBACK_COLOR }
}

/// Drops characters XML 1.0 cannot carry, even as references.
pub(crate) fn xml_chars(s: &str) -> String {
    s.chars()
        .filter(|&c| {
            matches!(c, '\t' | '\n' | '\r')
                || (c >= ' ' && c != '\u{FFFE}' && c != '\u{FFFF}')
        })
        .collect()
}

fn svg_escape(s: &str) -> String {
    xml_chars(s)
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn font() -> FontAsset {
        FontAsset::load(
            Path::new(env!("CARGO_MANIFEST_DIR")).join("../assets/fonts/DejaVuSansMono.ttf"),
        )
        .unwrap()
    }

    #[test]
    fn rects_are_inclusive() {
        let mut sc = Scene::new(20, 10, "#ffffff");
        sc.fill(PixelRect::new(2, 3, 4, 3), "#A090A0");
        let svg = sc.to_svg(&font());
        assert!(svg.contains("<rect x=\"2\" y=\"3\" width=\"3\" height=\"1\" fill=\"#A090A0\"/>"));
    }

    #[test]
    fn outline_becomes_four_edges() {
        let r = PixelRect::new(0, 0, 9, 19);
        let e = outline_edges(&r, 2);
        assert_eq!(e[0], PixelRect::new(0, 0, 9, 1));
        assert_eq!(e[1], PixelRect::new(0, 18, 9, 19));
        assert_eq!(e[2], PixelRect::new(0, 0, 1, 19));
        assert_eq!(e[3], PixelRect::new(8, 0, 9, 19));

        let mut sc = Scene::new(10, 20, "#000");
        sc.outline(r, "#ffffff", 2);
        assert_eq!(sc.to_svg(&font()).matches("fill=\"#ffffff\"").count(), 4);
    }

    #[test]
    fn text_is_escaped_and_moved_to_baseline() {
        let f = font();
        let mut sc = Scene::new(100, 40, "#fff");
        sc.text((5.0, 10.0), 13.0, "#000000", "Tom & <Jerry>");
        sc.text((5.0, 10.0), 13.0, "#000000", "");
        let svg = sc.to_svg(&f);
        assert_eq!(sc.commands().len(), 1);
        assert!(svg.contains("Tom &amp; &lt;Jerry&gt;"));
        assert!(svg.contains(&format!("y=\"{:.2}\"", 10.0 + f.ascent(13.0))));
    }

    #[test]
    fn hostile_colors_fall_back() {
        assert_eq!(paint("#CE1616"), "#CE1616");
        assert_eq!(paint("orange"), "orange");
        assert_eq!(paint("#abc"), "#abc");
        assert_eq!(paint("red\" onload=\"x"), FALLBACK_COLOR);
        assert_eq!(paint(""), FALLBACK_COLOR);
        assert_eq!(paint("#ZZZZZZ"), FALLBACK_COLOR);
        assert_eq!(paint("#12345"), FALLBACK_COLOR);
        assert_eq!(paint("notacolor"), FALLBACK_COLOR);
    }

    #[test]
    fn control_characters_are_dropped_from_text() {
        assert_eq!(xml_chars("Ski\u{1}trip\u{b}\u{FFFF}"), "Skitrip");
        assert_eq!(xml_chars("a\tb\nc"), "a\tb\nc");

        let f = font();
        let mut sc = Scene::new(100, 40, "#fff");
        sc.text((0.0, 0.0), 13.0, "#000000", "A\u{0}\u{1f}&B");
        let svg = sc.to_svg(&f);
        assert!(svg.contains(">A&amp;B</text>"));
        assert!(!svg.contains('\u{1f}'));
    }
}
