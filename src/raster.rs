use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::canvas::CutCanvas;
use crate::color::Rgba8;
use crate::error::RenderError;
use crate::path::EdgePath;

/// Straight pieces per quadratic segment when flattening for pixels.
pub const CURVE_STEPS: usize = 16;

/// Anti-aliased stroking onto an RGBA image. Pixel `(x, y)` is centred on
/// the integer coordinate, so a line at `x = 0` covers the first column.
pub struct RasterCanvas {
    image: RgbaImage,
    color: Rgba8,
    stroke_width: f32,
}

impl RasterCanvas {
    pub fn blank(
        width: u32,
        height: u32,
        background: Rgba8,
        color: Rgba8,
        stroke_width: f32,
    ) -> Self {
        Self::from_image(
            RgbaImage::from_pixel(width, height, background.into()),
            color,
            stroke_width,
        )
    }

    pub fn from_image(image: RgbaImage, color: Rgba8, stroke_width: f32) -> Self {
        Self {
            image,
            color,
            stroke_width,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        self.image.save(path)?;
        Ok(())
    }

    fn coverage_for(&self, points: &[(f32, f32)]) -> Option<Coverage> {
        let (img_w, img_h) = self.image.dimensions();
        if img_w == 0 || img_h == 0 || points.is_empty() {
            return None;
        }
        let radius = self.stroke_width * 0.5;
        let reach = radius + 1.0;
        let (mut min_x, mut min_y) = (f32::INFINITY, f32::INFINITY);
        let (mut max_x, mut max_y) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
        for &(x, y) in points {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        let x0 = (min_x - reach).floor().max(0.0) as i64;
        let y0 = (min_y - reach).floor().max(0.0) as i64;
        let x1 = ((max_x + reach).ceil() as i64).min(img_w as i64 - 1);
        let y1 = ((max_y + reach).ceil() as i64).min(img_h as i64 - 1);
        if x1 < x0 || y1 < y0 {
            return None;
        }

        let mut coverage = Coverage {
            x0: x0 as u32,
            y0: y0 as u32,
            width: (x1 - x0 + 1) as usize,
            values: vec![0.0; ((x1 - x0 + 1) * (y1 - y0 + 1)) as usize],
        };
        let pairs: Vec<((f32, f32), (f32, f32))> = if points.len() == 1 {
            vec![(points[0], points[0])]
        } else {
            points.windows(2).map(|pair| (pair[0], pair[1])).collect()
        };
        for (a, b) in pairs {
            let sx0 = ((a.0.min(b.0) - reach).floor() as i64).max(x0);
            let sy0 = ((a.1.min(b.1) - reach).floor() as i64).max(y0);
            let sx1 = ((a.0.max(b.0) + reach).ceil() as i64).min(x1);
            let sy1 = ((a.1.max(b.1) + reach).ceil() as i64).min(y1);
            for py in sy0..=sy1 {
                for px in sx0..=sx1 {
                    let dist = segment_distance((px as f32, py as f32), a, b);
                    let value = (radius + 0.5 - dist).clamp(0.0, 1.0);
                    if value > 0.0 {
                        let idx = (py - y0) as usize * coverage.width + (px - x0) as usize;
                        if value > coverage.values[idx] {
                            coverage.values[idx] = value;
                        }
                    }
                }
            }
        }
        Some(coverage)
    }

    fn blend(&mut self, x: u32, y: u32, amount: f32) {
        let src_a = self.color.opacity() * amount;
        if src_a <= 0.0 {
            return;
        }
        let dst = self.image.get_pixel(x, y).0;
        let dst_a = dst[3] as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        let mut out = [0u8; 4];
        for channel in 0..3 {
            let src = self.color.0[channel] as f32;
            let value = if out_a > 0.0 {
                (src * src_a + dst[channel] as f32 * dst_a * (1.0 - src_a)) / out_a
            } else {
                0.0
            };
            out[channel] = value.round().clamp(0.0, 255.0) as u8;
        }
        out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
        self.image.put_pixel(x, y, Rgba(out));
    }
}

struct Coverage {
    x0: u32,
    y0: u32,
    width: usize,
    values: Vec<f32>,
}

fn segment_distance(p: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    let (abx, aby) = (b.0 - a.0, b.1 - a.1);
    let len_sq = abx * abx + aby * aby;
    let t = if len_sq > 0.0 {
        (((p.0 - a.0) * abx + (p.1 - a.1) * aby) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let (cx, cy) = (a.0 + abx * t, a.1 + aby * t);
    ((p.0 - cx).powi(2) + (p.1 - cy).powi(2)).sqrt()
}

impl CutCanvas for RasterCanvas {
    fn size(&self) -> (f32, f32) {
        let (w, h) = self.image.dimensions();
        (w as f32, h as f32)
    }

    fn outline_inset(&self) -> f32 {
        1.0
    }

    fn stroke_path(&mut self, path: &EdgePath) {
        if path.is_empty() {
            return;
        }
        let points = path.flatten(CURVE_STEPS);
        let Some(coverage) = self.coverage_for(&points) else {
            return;
        };
        for (idx, value) in coverage.values.iter().enumerate() {
            if *value <= 0.0 {
                continue;
            }
            let x = coverage.x0 + (idx % coverage.width) as u32;
            let y = coverage.y0 + (idx / coverage.width) as u32;
            self.blend(x, y, *value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::draw_outline;

    const RED: Rgba8 = Rgba8([255, 0, 0, 255]);

    #[test]
    fn horizontal_line_covers_its_row() {
        let mut canvas = RasterCanvas::blank(10, 10, Rgba8::BLACK, RED, 1.0);
        canvas.stroke_path(&EdgePath::line((1.0, 4.0), (8.0, 4.0)));
        let image = canvas.image();
        for x in 1..=8 {
            assert_eq!(image.get_pixel(x, 4).0, [255, 0, 0, 255]);
        }
        assert_eq!(image.get_pixel(4, 2).0, [0, 0, 0, 255]);
        assert_eq!(image.get_pixel(4, 6).0, [0, 0, 0, 255]);
    }

    #[test]
    fn outline_stays_inside_the_pixels() {
        let mut canvas = RasterCanvas::blank(8, 6, Rgba8::BLACK, Rgba8::WHITE, 1.0);
        draw_outline(&mut canvas);
        let image = canvas.into_image();
        assert_eq!(image.get_pixel(0, 3).0, [255, 255, 255, 255]);
        assert_eq!(image.get_pixel(7, 3).0, [255, 255, 255, 255]);
        assert_eq!(image.get_pixel(4, 0).0, [255, 255, 255, 255]);
        assert_eq!(image.get_pixel(4, 5).0, [255, 255, 255, 255]);
        assert_eq!(image.get_pixel(4, 3).0, [0, 0, 0, 255]);
    }

    #[test]
    fn translucent_strokes_blend() {
        let mut canvas = RasterCanvas::blank(4, 4, Rgba8::BLACK, Rgba8([255, 255, 255, 128]), 1.0);
        canvas.stroke_path(&EdgePath::line((0.0, 1.0), (3.0, 1.0)));
        let pixel = canvas.image().get_pixel(1, 1).0;
        assert_eq!(pixel[3], 255);
        assert!(pixel[0] > 120 && pixel[0] < 136);
    }

    #[test]
    fn strokes_outside_the_image_are_ignored() {
        let mut canvas = RasterCanvas::blank(4, 4, Rgba8::BLACK, RED, 1.0);
        canvas.stroke_path(&EdgePath::line((-50.0, -50.0), (-20.0, -40.0)));
        assert!(canvas.image().pixels().all(|p| p.0 == [0, 0, 0, 255]));
    }
}
