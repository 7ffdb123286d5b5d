//! Randomized jigsaw cut patterns drawn onto raster images or SVG documents.
//!
//! Topology generation lives in `jigsaw_cutter_core`; this crate turns a
//! [`CutGrid`] into stroked tab outlines on a [`CutCanvas`].

pub mod canvas;
pub mod color;
pub mod error;
pub mod path;
pub mod raster;
pub mod render;
pub mod settings;
pub mod shape;
pub mod smooth;
pub mod svg;

pub use canvas::{draw_outline, CutCanvas};
pub use color::Rgba8;
pub use error::RenderError;
pub use jigsaw_cutter_core::{
    suggest_grid, BorderType, Cell, CutGrid, EdgeViolation, GridChoice, Side, TopologyError,
};
pub use path::{EdgePath, Segment};
pub use raster::RasterCanvas;
pub use render::{render_cuts, render_puzzle, RenderOutcome, RenderStats};
pub use settings::RenderSettings;
pub use shape::{tab_outline, BorderStyle, CellRect};
pub use smooth::smoothed_path;
pub use svg::SvgCanvas;
