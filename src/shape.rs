use std::fmt;
use std::str::FromStr;

use jigsaw_cutter_core::Side;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::path::EdgePath;
use crate::smooth::smoothed_path;

// Fractions of the edge length (span) and of the cell extent across the edge (depth).
const SHOULDER_START_SPAN: (f32, f32) = (0.30, 0.45);
const SHOULDER_END_SPAN: (f32, f32) = (0.55, 0.70);
const APEX_SPAN: (f32, f32) = (0.40, 0.60);
const TAB_DEPTH: (f32, f32) = (0.15, 0.25);
const SHOULDER_JITTER: (f32, f32) = (-0.05, 0.05);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BorderStyle {
    Flat,
    Triangle,
    TriangleRounded,
    Square,
    SquareRounded,
}

impl BorderStyle {
    pub const ALL: [BorderStyle; 5] = [
        BorderStyle::Flat,
        BorderStyle::Triangle,
        BorderStyle::TriangleRounded,
        BorderStyle::Square,
        BorderStyle::SquareRounded,
    ];

    pub fn is_rounded(self) -> bool {
        matches!(self, BorderStyle::TriangleRounded | BorderStyle::SquareRounded)
    }

    pub fn name(self) -> &'static str {
        match self {
            BorderStyle::Flat => "flat",
            BorderStyle::Triangle => "triangle",
            BorderStyle::TriangleRounded => "triangle-rounded",
            BorderStyle::Square => "square",
            BorderStyle::SquareRounded => "square-rounded",
        }
    }
}

impl fmt::Display for BorderStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BorderStyle {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        BorderStyle::ALL
            .into_iter()
            .find(|style| style.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| {
                let names: Vec<&str> = BorderStyle::ALL.iter().map(|s| s.name()).collect();
                format!("unknown border style '{trimmed}', expected one of {}", names.join(", "))
            })
    }
}

/// Bounds of one cell in output coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl CellRect {
    pub fn for_cell(row: usize, col: usize, cell_width: f32, cell_height: f32) -> Self {
        Self {
            x: col as f32 * cell_width,
            y: row as f32 * cell_height,
            width: cell_width,
            height: cell_height,
        }
    }

    /// Start corner of `side`, the vector running along it and the vector
    /// pointing out of the cell across it, scaled to the cell extent.
    fn edge_frame(&self, side: Side) -> ((f32, f32), (f32, f32), (f32, f32)) {
        let (x, y, w, h) = (self.x, self.y, self.width, self.height);
        match side {
            Side::Up => ((x, y), (w, 0.0), (0.0, -h)),
            Side::Down => ((x, y + h), (w, 0.0), (0.0, h)),
            Side::Left => ((x, y), (0.0, h), (-w, 0.0)),
            Side::Right => ((x + w, y), (0.0, h), (w, 0.0)),
        }
    }

    /// Maps a fractional `span` along `side` and a fractional `depth` out of
    /// the cell to output coordinates.
    pub fn edge_point(&self, side: Side, span: f32, depth: f32) -> (f32, f32) {
        let (origin, along, outward) = self.edge_frame(side);
        (
            origin.0 + along.0 * span + outward.0 * depth,
            origin.1 + along.1 * span + outward.1 * depth,
        )
    }
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, (min, max): (f32, f32)) -> f32 {
    rng.random_range(min..max)
}

/// Stroke for a `Tab` side of the cell at `rect`, in a style picked
/// uniformly from `styles`.
pub fn tab_outline<R: Rng + ?Sized>(
    rng: &mut R,
    rect: CellRect,
    side: Side,
    styles: &[BorderStyle],
    smooth_factor: f32,
) -> Result<EdgePath, RenderError> {
    let style = *styles.choose(rng).ok_or(RenderError::NoStyleSelected)?;
    Ok(style_outline(rng, rect, side, style, smooth_factor))
}

pub fn style_outline<R: Rng + ?Sized>(
    rng: &mut R,
    rect: CellRect,
    side: Side,
    style: BorderStyle,
    smooth_factor: f32,
) -> EdgePath {
    let points = control_points(rng, rect, side, style);
    if style.is_rounded() {
        smoothed_path(smooth_factor, &points)
    } else {
        EdgePath::polyline(&points)
            .unwrap_or_else(|| EdgePath::new(rect.edge_point(side, 0.0, 0.0)))
    }
}

/// Corner points of the tab silhouette, from the start of the edge to its end.
///
/// Triangle: `A B C D E` with apex `C`. Square: `A B C D E F` with the
/// protruding corners `C` and `D`.
pub fn control_points<R: Rng + ?Sized>(
    rng: &mut R,
    rect: CellRect,
    side: Side,
    style: BorderStyle,
) -> Vec<(f32, f32)> {
    let start = rect.edge_point(side, 0.0, 0.0);
    let end = rect.edge_point(side, 1.0, 0.0);
    match style {
        BorderStyle::Flat => vec![start, end],
        BorderStyle::Triangle | BorderStyle::TriangleRounded => {
            let b = (uniform(rng, SHOULDER_START_SPAN), uniform(rng, SHOULDER_JITTER));
            let c = (uniform(rng, APEX_SPAN), uniform(rng, TAB_DEPTH));
            let d = (uniform(rng, SHOULDER_END_SPAN), uniform(rng, SHOULDER_JITTER));
            vec![
                start,
                rect.edge_point(side, b.0, b.1),
                rect.edge_point(side, c.0, c.1),
                rect.edge_point(side, d.0, d.1),
                end,
            ]
        }
        BorderStyle::Square | BorderStyle::SquareRounded => {
            let b = (uniform(rng, SHOULDER_START_SPAN), uniform(rng, SHOULDER_JITTER));
            let c = (uniform(rng, SHOULDER_START_SPAN), uniform(rng, TAB_DEPTH));
            let d = (uniform(rng, SHOULDER_END_SPAN), uniform(rng, TAB_DEPTH));
            let e = (uniform(rng, SHOULDER_END_SPAN), uniform(rng, SHOULDER_JITTER));
            vec![
                start,
                rect.edge_point(side, b.0, b.1),
                rect.edge_point(side, c.0, c.1),
                rect.edge_point(side, d.0, d.1),
                rect.edge_point(side, e.0, e.1),
                end,
            ]
        }
    }
}
