use jigsaw_cutter_core::TopologyError;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("no border style selected, tab cuts skipped")]
    NoStyleSelected,
    #[error(transparent)]
    Topology(#[from] TopologyError),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings error: {0}")]
    Settings(#[from] serde_json::Error),
    #[error("invalid color: {0}")]
    InvalidColor(String),
}
