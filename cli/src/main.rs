use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use env_logger::{Builder, Env};
use image::imageops::FilterType;
use image::RgbaImage;
use jigsaw_cutter::{
    render_puzzle, suggest_grid, BorderStyle, CutGrid, RasterCanvas, RenderOutcome,
    RenderSettings, Rgba8, SvgCanvas,
};
use log::{info, warn};

const DEFAULT_WIDTH: u32 = 800;
const DEFAULT_HEIGHT: u32 = 600;

#[derive(Parser)]
#[command(name = "jigsaw-cutter", version, about = "Draw randomized jigsaw cut lines")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render cut lines onto an image or into an SVG document.
    Render {
        /// JSON settings file; flags below override its values.
        #[arg(long, env = "JIGSAW_CUTTER_CONFIG")]
        config: Option<PathBuf>,
        /// Base image to draw on. Without one a blank canvas is used.
        #[arg(long)]
        image: Option<PathBuf>,
        #[arg(long, default_value_t = DEFAULT_WIDTH)]
        width: u32,
        #[arg(long, default_value_t = DEFAULT_HEIGHT)]
        height: u32,
        #[arg(long)]
        rows: Option<usize>,
        #[arg(long)]
        cols: Option<usize>,
        /// Pick rows and columns for roughly this many pieces.
        #[arg(long, conflicts_with_all = ["rows", "cols"])]
        pieces: Option<u32>,
        /// Enabled border style; repeat to enable several.
        #[arg(long = "style")]
        styles: Vec<BorderStyle>,
        #[arg(long)]
        smooth: Option<f32>,
        #[arg(long)]
        color: Option<Rgba8>,
        #[arg(long)]
        stroke_width: Option<f32>,
        #[arg(long)]
        seed: Option<String>,
        /// Downscale the base image so its longest side fits.
        #[arg(long)]
        max_dim: Option<u32>,
        #[arg(long)]
        out: PathBuf,
        /// Also write the generated grid as JSON.
        #[arg(long)]
        topology: Option<PathBuf>,
    },
    /// Print a random grid topology as JSON.
    Topology {
        #[arg(long, default_value_t = 4)]
        rows: usize,
        #[arg(long, default_value_t = 4)]
        cols: usize,
        #[arg(long)]
        seed: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            config,
            image,
            width,
            height,
            rows,
            cols,
            pieces,
            styles,
            smooth,
            color,
            stroke_width,
            seed,
            max_dim,
            out,
            topology,
        } => {
            let mut settings = match config {
                Some(path) => RenderSettings::load(path)?,
                None => RenderSettings::default(),
            };
            let base = match image {
                Some(path) => Some(load_base_image(&path, max_dim)?),
                None => None,
            };
            let (width, height) = base
                .as_ref()
                .map(|img| img.dimensions())
                .unwrap_or((width, height));

            if let Some(target) = pieces {
                let Some(choice) = suggest_grid(width, height, target) else {
                    return Err(format!("no grid fits {target} pieces on {width}x{height}").into());
                };
                info!("using {}", choice.label());
                settings.rows = choice.rows as usize;
                settings.cols = choice.cols as usize;
            }
            if let Some(rows) = rows {
                settings.rows = rows;
            }
            if let Some(cols) = cols {
                settings.cols = cols;
            }
            if !styles.is_empty() {
                settings.styles = styles;
            }
            if let Some(smooth) = smooth {
                settings.smooth_factor = smooth;
            }
            if let Some(color) = color {
                settings.color = color;
            }
            if let Some(stroke_width) = stroke_width {
                settings.stroke_width = stroke_width;
            }
            if let Some(raw) = seed.as_deref() {
                settings.seed = Some(parse_seed_arg(raw)?);
            }
            let settings = settings.clamped();

            let outcome = if is_svg_path(&out) {
                let mut canvas =
                    SvgCanvas::new(width, height, settings.color, settings.stroke_width);
                let outcome = render_puzzle(&mut canvas, &settings)?;
                std::fs::write(&out, canvas.finish())?;
                outcome
            } else {
                let mut canvas = match base {
                    Some(img) => {
                        RasterCanvas::from_image(img, settings.color, settings.stroke_width)
                    }
                    None => RasterCanvas::blank(
                        width,
                        height,
                        settings.background,
                        settings.color,
                        settings.stroke_width,
                    ),
                };
                let outcome = render_puzzle(&mut canvas, &settings)?;
                canvas.save(&out)?;
                outcome
            };
            report(&outcome, &out);

            if let Some(path) = topology {
                std::fs::write(path, serde_json::to_string_pretty(&outcome.grid)?)?;
            }
        }
        Commands::Topology { rows, cols, seed } => {
            let mut grid = CutGrid::new(rows, cols)?;
            match seed.as_deref() {
                Some(raw) => grid.generate_seeded(parse_seed_arg(raw)?),
                None => grid.generate_random(&mut rand::rng()),
            }
            println!("{}", serde_json::to_string_pretty(&grid)?);
        }
    }

    Ok(())
}

fn report(outcome: &RenderOutcome, out: &Path) {
    if outcome.tabs_skipped {
        warn!("no border style enabled; {} holds only the outline", out.display());
    }
    println!(
        "{}x{} grid, {} tabs -> {}",
        outcome.grid.rows(),
        outcome.grid.cols(),
        outcome.stats.tabs,
        out.display()
    );
}

fn load_base_image(path: &Path, max_dim: Option<u32>) -> Result<RgbaImage, image::ImageError> {
    let rgba = image::open(path)?.to_rgba8();
    Ok(fit_to_max_dim(rgba, max_dim))
}

fn fit_to_max_dim(rgba: RgbaImage, max_dim: Option<u32>) -> RgbaImage {
    let Some(max_dim) = max_dim else {
        return rgba;
    };
    if max_dim == 0 {
        return rgba;
    }
    let (width, height) = rgba.dimensions();
    let max_axis = width.max(height);
    if max_axis <= max_dim {
        return rgba;
    }
    let scale = max_dim as f32 / max_axis as f32;
    let next_width = ((width as f32) * scale).round().max(1.0) as u32;
    let next_height = ((height as f32) * scale).round().max(1.0) as u32;
    image::imageops::resize(&rgba, next_width, next_height, FilterType::Lanczos3)
}

fn is_svg_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

fn parse_seed_arg(raw: &str) -> Result<u64, Box<dyn std::error::Error>> {
    let trimmed = raw.trim();
    let value = if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X"))
    {
        u64::from_str_radix(hex, 16)?
    } else {
        trimmed.parse::<u64>()?
    };
    Ok(value)
}
