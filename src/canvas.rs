use crate::path::EdgePath;

/// Drawing surface for cut lines.
pub trait CutCanvas {
    /// Width and height in output units.
    fn size(&self) -> (f32, f32);

    /// How far the outer rectangle is pulled in from the bounds. Pixel
    /// targets use one unit so the far edges stay inside the image.
    fn outline_inset(&self) -> f32 {
        0.0
    }

    fn stroke_path(&mut self, path: &EdgePath);
}

/// Strokes the outer rectangle of the puzzle.
pub fn draw_outline<C: CutCanvas + ?Sized>(canvas: &mut C) {
    let (width, height) = canvas.size();
    let inset = canvas.outline_inset();
    let right = (width - inset).max(0.0);
    let bottom = (height - inset).max(0.0);
    canvas.stroke_path(&EdgePath::line((0.0, 0.0), (0.0, bottom)));
    canvas.stroke_path(&EdgePath::line((0.0, 0.0), (right, 0.0)));
    canvas.stroke_path(&EdgePath::line((0.0, bottom), (right, bottom)));
    canvas.stroke_path(&EdgePath::line((right, 0.0), (right, bottom)));
}
