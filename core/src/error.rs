#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    #[error("grid must be at least 1x1, got {rows}x{cols}")]
    InvalidDimension { rows: usize, cols: usize },
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("grid holds {found} cells, expected {expected}")]
    CellCount { expected: usize, found: usize },
}
