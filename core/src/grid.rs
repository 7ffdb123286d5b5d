use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::border::{BorderType, Side};
use crate::error::TopologyError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub up: BorderType,
    pub down: BorderType,
    pub left: BorderType,
    pub right: BorderType,
}

impl Cell {
    pub fn border(&self, side: Side) -> BorderType {
        match side {
            Side::Up => self.up,
            Side::Down => self.down,
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn set_border(&mut self, side: Side, border: BorderType) {
        match side {
            Side::Up => self.up = border,
            Side::Down => self.down = border,
            Side::Left => self.left = border,
            Side::Right => self.right = border,
        }
    }

    pub fn sides(&self) -> [(Side, BorderType); 4] {
        Side::ALL.map(|side| (side, self.border(side)))
    }
}

/// A broken invariant found by [`CutGrid::violations`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeViolation {
    Undecided {
        row: usize,
        col: usize,
        side: Side,
    },
    BoundaryNotFlat {
        row: usize,
        col: usize,
        side: Side,
        found: BorderType,
    },
    Mismatch {
        row: usize,
        col: usize,
        side: Side,
        found: BorderType,
        neighbor: BorderType,
    },
}

/// Row-major grid of cells holding the tab/blank topology of a puzzle.
///
/// Rows run along the y axis and columns along the x axis. The cell at
/// `(row, col)` lives at index `row * cols + col`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct CutGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl CutGrid {
    pub fn new(rows: usize, cols: usize) -> Result<Self, TopologyError> {
        validate_shape(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::default(); rows * cols],
        })
    }

    /// Reallocates the grid with every side `Invalid`. A rejected shape
    /// leaves the current grid as it was.
    pub fn set_shape(&mut self, rows: usize, cols: usize) -> Result<(), TopologyError> {
        validate_shape(rows, cols)?;
        self.rows = rows;
        self.cols = cols;
        self.cells = vec![Cell::default(); rows * cols];
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<&Cell, TopologyError> {
        if row >= self.rows || col >= self.cols {
            return Err(TopologyError::OutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(&self.cells[self.index(row, col)])
    }

    /// Horizontal plus vertical edges shared by two cells.
    pub fn internal_edge_count(&self) -> usize {
        (self.rows - 1) * self.cols + self.rows * (self.cols - 1)
    }

    pub fn make_boundaries(&mut self) {
        let (rows, cols) = (self.rows, self.cols);
        for col in 0..cols {
            let top = self.index(0, col);
            self.cells[top].up = BorderType::Flat;
            let bottom = self.index(rows - 1, col);
            self.cells[bottom].down = BorderType::Flat;
        }
        for row in 0..rows {
            let first = self.index(row, 0);
            self.cells[first].left = BorderType::Flat;
            let last = self.index(row, cols - 1);
            self.cells[last].right = BorderType::Flat;
        }
    }

    /// Replaces the whole topology with a fresh random one.
    ///
    /// Each internal edge gets exactly one coin flip, taken from whichever
    /// of its two cells is visited first; the other cell receives the inverse.
    pub fn generate_random<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cells.fill(Cell::default());
        self.make_boundaries();

        let mut decided = 0usize;
        for row in 0..self.rows {
            for col in 0..self.cols {
                let id = self.index(row, col);
                for side in Side::ALL {
                    if self.cells[id].border(side).is_decided() {
                        continue;
                    }
                    // outward sides are already Flat from make_boundaries
                    let Some((n_row, n_col)) = self.neighbor(row, col, side) else {
                        continue;
                    };
                    let border = if rng.random_bool(0.5) {
                        BorderType::Tab
                    } else {
                        BorderType::Blank
                    };
                    self.cells[id].set_border(side, border);
                    let neighbor = self.index(n_row, n_col);
                    self.cells[neighbor].set_border(side.opposite(), border.inverse());
                    decided += 1;
                }
            }
        }
        debug!(
            "generated {}x{} topology, {} internal edges decided",
            self.rows, self.cols, decided
        );
    }

    pub fn generate_seeded(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate_random(&mut rng);
    }

    pub fn violations(&self) -> Vec<EdgeViolation> {
        let mut found = Vec::new();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let cell = &self.cells[self.index(row, col)];
                for (side, border) in cell.sides() {
                    if !border.is_decided() {
                        found.push(EdgeViolation::Undecided { row, col, side });
                        continue;
                    }
                    match self.neighbor(row, col, side) {
                        None if border != BorderType::Flat => {
                            found.push(EdgeViolation::BoundaryNotFlat {
                                row,
                                col,
                                side,
                                found: border,
                            });
                        }
                        None => {}
                        // each shared edge is checked once, from its upper/left cell
                        Some(_) if matches!(side, Side::Up | Side::Left) => {}
                        Some((n_row, n_col)) => {
                            let neighbor =
                                self.cells[self.index(n_row, n_col)].border(side.opposite());
                            let complementary = matches!(
                                (border, neighbor),
                                (BorderType::Tab, BorderType::Blank)
                                    | (BorderType::Blank, BorderType::Tab)
                            );
                            if !complementary && neighbor.is_decided() {
                                found.push(EdgeViolation::Mismatch {
                                    row,
                                    col,
                                    side,
                                    found: border,
                                    neighbor,
                                });
                            }
                        }
                    }
                }
            }
        }
        found
    }

    pub fn is_consistent(&self) -> bool {
        self.violations().is_empty()
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn neighbor(&self, row: usize, col: usize, side: Side) -> Option<(usize, usize)> {
        let (dr, dc) = side.offset();
        let n_row = row.checked_add_signed(dr)?;
        let n_col = col.checked_add_signed(dc)?;
        if n_row < self.rows && n_col < self.cols {
            Some((n_row, n_col))
        } else {
            None
        }
    }
}

#[derive(Deserialize)]
struct RawGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl TryFrom<RawGrid> for CutGrid {
    type Error = TopologyError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        validate_shape(raw.rows, raw.cols)?;
        let expected = raw
            .rows
            .checked_mul(raw.cols)
            .ok_or(TopologyError::InvalidDimension {
                rows: raw.rows,
                cols: raw.cols,
            })?;
        if raw.cells.len() != expected {
            return Err(TopologyError::CellCount {
                expected,
                found: raw.cells.len(),
            });
        }
        Ok(Self {
            rows: raw.rows,
            cols: raw.cols,
            cells: raw.cells,
        })
    }
}

fn validate_shape(rows: usize, cols: usize) -> Result<(), TopologyError> {
    if rows == 0 || cols == 0 {
        return Err(TopologyError::InvalidDimension { rows, cols });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_undecided() {
        let grid = CutGrid::new(2, 3).expect("grid");
        assert_eq!(grid.cells().len(), 6);
        assert!(grid
            .cells()
            .iter()
            .all(|cell| cell.sides().iter().all(|(_, b)| *b == BorderType::Invalid)));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            CutGrid::new(0, 3),
            Err(TopologyError::InvalidDimension { rows: 0, cols: 3 })
        );
        let mut grid = CutGrid::new(2, 2).expect("grid");
        grid.generate_seeded(1);
        let before = grid.clone();
        assert!(grid.set_shape(4, 0).is_err());
        assert_eq!(grid, before);
    }

    #[test]
    fn boundaries_only_touch_outer_ring() {
        let mut grid = CutGrid::new(3, 3).expect("grid");
        grid.make_boundaries();
        grid.make_boundaries();
        let center = grid.cell(1, 1).expect("center");
        assert_eq!(*center, Cell::default());
        let corner = grid.cell(0, 2).expect("corner");
        assert_eq!(corner.up, BorderType::Flat);
        assert_eq!(corner.right, BorderType::Flat);
        assert_eq!(corner.left, BorderType::Invalid);
        assert_eq!(corner.down, BorderType::Invalid);
    }

    #[test]
    fn single_cell_is_flat_all_round() {
        let mut grid = CutGrid::new(1, 1).expect("grid");
        grid.make_boundaries();
        let cell = grid.cell(0, 0).expect("cell");
        assert!(cell.sides().iter().all(|(_, b)| *b == BorderType::Flat));
    }

    #[test]
    fn generation_replaces_previous_state() {
        let mut grid = CutGrid::new(3, 4).expect("grid");
        grid.generate_seeded(7);
        let first = grid.clone();
        grid.generate_seeded(7);
        assert_eq!(grid, first);
        assert!(grid.is_consistent());
    }

    #[test]
    fn violations_report_mismatched_edges() {
        let mut grid = CutGrid::new(1, 2).expect("grid");
        grid.generate_seeded(3);
        let mut cells = grid.cells.clone();
        let tab = cells[0].right;
        cells[1].left = tab;
        grid.cells = cells;
        let violations = grid.violations();
        assert_eq!(violations.len(), 1);
        assert!(matches!(
            violations[0],
            EdgeViolation::Mismatch {
                row: 0,
                col: 0,
                side: Side::Right,
                ..
            }
        ));
    }

    #[test]
    fn out_of_range_lookup_fails() {
        let grid = CutGrid::new(2, 3).expect("grid");
        assert!(grid.cell(1, 2).is_ok());
        assert_eq!(
            grid.cell(2, 0),
            Err(TopologyError::OutOfRange {
                row: 2,
                col: 0,
                rows: 2,
                cols: 3
            })
        );
        assert!(grid.cell(0, 3).is_err());
    }
}
