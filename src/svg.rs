use std::fmt::Write;

use crate::canvas::CutCanvas;
use crate::color::Rgba8;
use crate::path::{fmt_f32, EdgePath};

/// Collects cut strokes as `<path>` elements of a standalone SVG document.
pub struct SvgCanvas {
    width: u32,
    height: u32,
    color: Rgba8,
    stroke_width: f32,
    body: String,
    paths: usize,
}

impl SvgCanvas {
    pub fn new(width: u32, height: u32, color: Rgba8, stroke_width: f32) -> Self {
        Self {
            width,
            height,
            color,
            stroke_width,
            body: String::new(),
            paths: 0,
        }
    }

    pub fn path_count(&self) -> usize {
        self.paths
    }

    pub fn finish(self) -> String {
        let mut doc = String::with_capacity(self.body.len() + 256);
        doc.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        let _ = writeln!(
            doc,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height,
        );
        let _ = write!(
            doc,
            r#"<g fill="none" stroke="{}" stroke-width="{}" stroke-linecap="round" stroke-linejoin="round""#,
            self.color.rgb_hex(),
            fmt_f32(self.stroke_width),
        );
        if self.color.alpha() < 255 {
            let _ = write!(doc, r#" stroke-opacity="{}""#, fmt_f32(self.color.opacity()));
        }
        doc.push_str(">\n");
        doc.push_str(&self.body);
        doc.push_str("</g>\n</svg>\n");
        doc
    }
}

impl CutCanvas for SvgCanvas {
    fn size(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }

    fn stroke_path(&mut self, path: &EdgePath) {
        if path.is_empty() {
            return;
        }
        let _ = writeln!(self.body, r#"<path d="{}"/>"#, path.to_svg_data());
        self.paths += 1;
    }
}
