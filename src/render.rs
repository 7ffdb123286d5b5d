use jigsaw_cutter_core::{BorderType, CutGrid, Side};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::canvas::{draw_outline, CutCanvas};
use crate::error::RenderError;
use crate::settings::RenderSettings;
use crate::shape::{tab_outline, BorderStyle, CellRect};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub cells: usize,
    pub tabs: usize,
}

/// Draws the outer rectangle and then every `Tab` side of `grid`.
///
/// Only the cell owning the tab draws the shared edge; the neighbour's
/// `Blank` side is left alone, as are `Flat` sides. With an empty `styles`
/// set the rectangle is still drawn before `NoStyleSelected` is returned.
pub fn render_cuts<C, R>(
    canvas: &mut C,
    grid: &CutGrid,
    styles: &[BorderStyle],
    smooth_factor: f32,
    rng: &mut R,
) -> Result<RenderStats, RenderError>
where
    C: CutCanvas + ?Sized,
    R: Rng + ?Sized,
{
    draw_outline(canvas);
    if styles.is_empty() {
        warn!("select at least one border style; only the outline was drawn");
        return Err(RenderError::NoStyleSelected);
    }

    let (width, height) = canvas.size();
    let cell_width = width / grid.cols() as f32;
    let cell_height = height / grid.rows() as f32;
    let mut stats = RenderStats {
        cells: grid.rows() * grid.cols(),
        tabs: 0,
    };
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let cell = *grid.cell(row, col)?;
            let rect = CellRect::for_cell(row, col, cell_width, cell_height);
            for side in Side::ALL {
                if cell.border(side) != BorderType::Tab {
                    continue;
                }
                let path = tab_outline(rng, rect, side, styles, smooth_factor)?;
                canvas.stroke_path(&path);
                stats.tabs += 1;
            }
        }
    }
    debug!(
        "rendered {}x{} grid on {}x{} canvas, {} tabs",
        grid.rows(),
        grid.cols(),
        width,
        height,
        stats.tabs
    );
    Ok(stats)
}

/// Result of [`render_puzzle`]. `tabs_skipped` is set when no border style
/// was enabled and only the outline made it onto the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOutcome {
    pub grid: CutGrid,
    pub stats: RenderStats,
    pub tabs_skipped: bool,
}

/// Generates a topology for `settings` and renders it onto `canvas`.
///
/// A fixed `settings.seed` drives both the topology and the tab shapes, so
/// the same settings reproduce the same drawing.
pub fn render_puzzle<C>(
    canvas: &mut C,
    settings: &RenderSettings,
) -> Result<RenderOutcome, RenderError>
where
    C: CutCanvas + ?Sized,
{
    let mut grid = CutGrid::new(settings.rows, settings.cols)?;
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    grid.generate_random(&mut rng);
    let (stats, tabs_skipped) = match render_cuts(
        canvas,
        &grid,
        &settings.styles,
        settings.smooth_factor,
        &mut rng,
    ) {
        Ok(stats) => (stats, false),
        Err(RenderError::NoStyleSelected) => (
            RenderStats {
                cells: grid.rows() * grid.cols(),
                tabs: 0,
            },
            true,
        ),
        Err(err) => return Err(err),
    };
    Ok(RenderOutcome {
        grid,
        stats,
        tabs_skipped,
    })
}
