use std::fmt::Write;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Segment {
    LineTo { x: f32, y: f32 },
    QuadTo { cx: f32, cy: f32, x: f32, y: f32 },
}

impl Segment {
    pub fn end(&self) -> (f32, f32) {
        match *self {
            Segment::LineTo { x, y } => (x, y),
            Segment::QuadTo { x, y, .. } => (x, y),
        }
    }
}

/// An open stroke: a start point followed by line and quadratic segments.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgePath {
    pub start: (f32, f32),
    pub segments: Vec<Segment>,
}

impl EdgePath {
    pub fn new(start: (f32, f32)) -> Self {
        Self {
            start,
            segments: Vec::new(),
        }
    }

    pub fn line(from: (f32, f32), to: (f32, f32)) -> Self {
        let mut path = Self::new(from);
        path.line_to(to);
        path
    }

    pub fn polyline(points: &[(f32, f32)]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut path = Self::new(*first);
        for &point in rest {
            path.line_to(point);
        }
        Some(path)
    }

    pub fn line_to(&mut self, (x, y): (f32, f32)) {
        self.segments.push(Segment::LineTo { x, y });
    }

    pub fn quad_to(&mut self, (cx, cy): (f32, f32), (x, y): (f32, f32)) {
        self.segments.push(Segment::QuadTo { cx, cy, x, y });
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn end(&self) -> (f32, f32) {
        self.segments
            .last()
            .map(Segment::end)
            .unwrap_or(self.start)
    }

    /// SVG path data (`d` attribute).
    pub fn to_svg_data(&self) -> String {
        let mut data = String::new();
        let _ = write!(data, "M {} {}", fmt_f32(self.start.0), fmt_f32(self.start.1));
        for segment in &self.segments {
            match *segment {
                Segment::LineTo { x, y } => {
                    let _ = write!(data, " L {} {}", fmt_f32(x), fmt_f32(y));
                }
                Segment::QuadTo { cx, cy, x, y } => {
                    let _ = write!(
                        data,
                        " Q {} {} {} {}",
                        fmt_f32(cx),
                        fmt_f32(cy),
                        fmt_f32(x),
                        fmt_f32(y)
                    );
                }
            }
        }
        data
    }

    /// Polyline approximation; each quadratic becomes `steps` straight pieces.
    pub fn flatten(&self, steps: usize) -> Vec<(f32, f32)> {
        let steps = steps.max(1);
        let mut points = Vec::with_capacity(1 + self.segments.len() * steps);
        points.push(self.start);
        let mut current = self.start;
        for segment in &self.segments {
            match *segment {
                Segment::LineTo { x, y } => points.push((x, y)),
                Segment::QuadTo { cx, cy, x, y } => {
                    for step in 1..=steps {
                        let t = step as f32 / steps as f32;
                        points.push(quad_point(current, (cx, cy), (x, y), t));
                    }
                }
            }
            current = segment.end();
        }
        points
    }
}

pub fn quad_point(p0: (f32, f32), p1: (f32, f32), p2: (f32, f32), t: f32) -> (f32, f32) {
    let u = 1.0 - t;
    (
        u * u * p0.0 + 2.0 * u * t * p1.0 + t * t * p2.0,
        u * u * p0.1 + 2.0 * u * t * p1.1 + t * t * p2.1,
    )
}

pub fn distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

pub(crate) fn fmt_f32(value: f32) -> String {
    format!("{:.3}", value)
}
