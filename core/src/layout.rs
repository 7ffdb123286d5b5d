use serde::{Deserialize, Serialize};

/// Relative error allowed between the requested and the produced piece count.
pub const PIECE_COUNT_TOLERANCE: f32 = 0.05;
/// Widest width/height ratio a single piece may have (and its reciprocal).
pub const PIECE_ASPECT_MAX: f32 = 1.42;
/// How many column counts around the ideal one are tried for each row count.
pub const COLUMN_SEARCH_RADIUS: i64 = 3;

const WEIGHT_COUNT: f32 = 1.0;
const WEIGHT_GRID_ASPECT: f32 = 1.0;
const WEIGHT_PIECE_ASPECT: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridChoice {
    pub target_pieces: u32,
    pub rows: u32,
    pub cols: u32,
    pub actual_pieces: u32,
}

impl GridChoice {
    pub fn label(&self) -> String {
        if self.actual_pieces == self.target_pieces {
            format!("{} pieces ({}x{})", self.actual_pieces, self.rows, self.cols)
        } else {
            format!(
                "{} pieces ({}x{}, asked for {})",
                self.actual_pieces, self.rows, self.cols, self.target_pieces
            )
        }
    }
}

/// Picks the `rows x cols` split of a `width x height` image that best
/// approaches `target` pieces while keeping pieces close to square.
///
/// Returns `None` when nothing within [`PIECE_COUNT_TOLERANCE`] and
/// [`PIECE_ASPECT_MAX`] exists, or when any input is zero.
pub fn suggest_grid(width: u32, height: u32, target: u32) -> Option<GridChoice> {
    if width == 0 || height == 0 || target == 0 {
        return None;
    }
    let image_aspect = width as f32 / height as f32;
    let target_f = target as f32;
    let max_rows = ((target_f.sqrt().ceil()) * 1.5).ceil().max(1.0) as i64;

    let mut best: Option<(GridChoice, f32)> = None;
    for rows in 1..=max_rows {
        let ideal_cols = (target_f / rows as f32).round() as i64;
        for cols in (ideal_cols - COLUMN_SEARCH_RADIUS)..=(ideal_cols + COLUMN_SEARCH_RADIUS) {
            if cols < 1 {
                continue;
            }
            let actual = (rows * cols) as f32;
            let count_err = (actual - target_f).abs() / target_f;
            if count_err > PIECE_COUNT_TOLERANCE {
                continue;
            }
            let grid_aspect = cols as f32 / rows as f32;
            let piece_aspect = image_aspect / grid_aspect;
            if piece_aspect > PIECE_ASPECT_MAX || piece_aspect < 1.0 / PIECE_ASPECT_MAX {
                continue;
            }
            let score = WEIGHT_COUNT * count_err.powi(2)
                + WEIGHT_GRID_ASPECT * (grid_aspect / image_aspect).ln().powi(2)
                + WEIGHT_PIECE_ASPECT * piece_aspect.ln().powi(2);
            if best.as_ref().is_some_and(|(_, best_score)| score >= *best_score) {
                continue;
            }
            best = Some((
                GridChoice {
                    target_pieces: target,
                    rows: rows as u32,
                    cols: cols as u32,
                    actual_pieces: (rows * cols) as u32,
                },
                score,
            ));
        }
    }
    best.map(|(choice, _)| choice)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_image_gets_square_grid() {
        let choice = suggest_grid(1000, 1000, 100).expect("choice");
        assert_eq!((choice.rows, choice.cols), (10, 10));
        assert_eq!(choice.actual_pieces, 100);
        assert_eq!(choice.label(), "100 pieces (10x10)");
    }

    #[test]
    fn wide_image_gets_more_columns() {
        let choice = suggest_grid(1600, 800, 50).expect("choice");
        assert!(choice.cols > choice.rows);
        let err = (choice.actual_pieces as f32 - 50.0).abs() / 50.0;
        assert!(err <= PIECE_COUNT_TOLERANCE);
    }

    #[test]
    fn degenerate_inputs_have_no_choice() {
        assert!(suggest_grid(0, 100, 10).is_none());
        assert!(suggest_grid(100, 100, 0).is_none());
    }

    #[test]
    fn single_piece_is_one_by_one() {
        let choice = suggest_grid(640, 480, 1).expect("choice");
        assert_eq!((choice.rows, choice.cols), (1, 1));
    }
}
