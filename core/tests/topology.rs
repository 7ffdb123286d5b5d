use jigsaw_cutter_core::{BorderType, CutGrid, Side, TopologyError};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn generated(rows: usize, cols: usize, seed: u64) -> CutGrid {
    let mut grid = CutGrid::new(rows, cols).expect("grid");
    let mut rng = StdRng::seed_from_u64(seed);
    grid.generate_random(&mut rng);
    grid
}

#[test]
fn no_side_is_left_invalid() {
    for rows in 1..=6 {
        for cols in 1..=6 {
            let grid = generated(rows, cols, (rows * 31 + cols) as u64);
            for cell in grid.cells() {
                for (_, border) in cell.sides() {
                    assert_ne!(border, BorderType::Invalid, "{rows}x{cols}");
                }
            }
        }
    }
}

#[test]
fn internal_edges_are_exact_inverses() {
    for seed in 0..20 {
        let grid = generated(5, 7, seed);
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let cell = grid.cell(row, col).expect("cell");
                if col + 1 < grid.cols() {
                    let right = grid.cell(row, col + 1).expect("right");
                    assert!(matches!(cell.right, BorderType::Tab | BorderType::Blank));
                    assert_eq!(cell.right, right.left.inverse());
                }
                if row + 1 < grid.rows() {
                    let below = grid.cell(row + 1, col).expect("below");
                    assert!(matches!(cell.down, BorderType::Tab | BorderType::Blank));
                    assert_eq!(cell.down, below.up.inverse());
                }
            }
        }
        assert!(grid.is_consistent());
    }
}

#[test]
fn outer_ring_is_always_flat() {
    for seed in 0..10 {
        let grid = generated(4, 6, seed);
        let (rows, cols) = (grid.rows(), grid.cols());
        for col in 0..cols {
            assert_eq!(grid.cell(0, col).expect("top").up, BorderType::Flat);
            assert_eq!(grid.cell(rows - 1, col).expect("bottom").down, BorderType::Flat);
        }
        for row in 0..rows {
            assert_eq!(grid.cell(row, 0).expect("left").left, BorderType::Flat);
            assert_eq!(grid.cell(row, cols - 1).expect("right").right, BorderType::Flat);
        }
    }
}

#[test]
fn same_seed_same_grid() {
    assert_eq!(generated(6, 4, 0x5EED), generated(6, 4, 0x5EED));
    let mut a = CutGrid::new(6, 4).expect("grid");
    let mut b = CutGrid::new(6, 4).expect("grid");
    a.generate_seeded(99);
    b.generate_seeded(99);
    assert_eq!(a, b);
}

#[test]
fn different_seeds_vary_the_cut() {
    let first = generated(8, 8, 1);
    let differs = (2..10).any(|seed| generated(8, 8, seed) != first);
    assert!(differs);
}

#[test]
fn one_by_one_is_all_flat() {
    let grid = generated(1, 1, 5);
    let cell = grid.cell(0, 0).expect("cell");
    for side in Side::ALL {
        assert_eq!(cell.border(side), BorderType::Flat);
    }
    assert_eq!(grid.internal_edge_count(), 0);
}

#[test]
fn two_cells_share_one_decided_edge() {
    let grid = generated(1, 2, 11);
    let left = grid.cell(0, 0).expect("left");
    let right = grid.cell(0, 1).expect("right");
    assert_eq!(grid.internal_edge_count(), 1);
    assert!(matches!(left.right, BorderType::Tab | BorderType::Blank));
    assert_eq!(left.right.inverse(), right.left);
    for border in [left.up, left.down, left.left, right.up, right.down, right.right] {
        assert_eq!(border, BorderType::Flat);
    }
}

#[test]
fn three_by_three_has_twelve_internal_edges() {
    let grid = generated(3, 3, 42);
    assert_eq!(grid.internal_edge_count(), 12);
    let mut tabs = 0;
    let mut blanks = 0;
    for cell in grid.cells() {
        for (_, border) in cell.sides() {
            match border {
                BorderType::Tab => tabs += 1,
                BorderType::Blank => blanks += 1,
                _ => {}
            }
        }
    }
    assert_eq!(tabs, 12);
    assert_eq!(blanks, 12);
}

#[test]
fn lookups_outside_the_grid_fail() {
    let grid = generated(3, 2, 0);
    assert!(matches!(
        grid.cell(3, 0),
        Err(TopologyError::OutOfRange { row: 3, col: 0, .. })
    ));
    assert!(matches!(
        grid.cell(0, 2),
        Err(TopologyError::OutOfRange { .. })
    ));
    assert!(matches!(
        grid.cell(usize::MAX, usize::MAX),
        Err(TopologyError::OutOfRange { .. })
    ));
}

#[test]
fn reshaping_discards_previous_topology() {
    let mut grid = generated(2, 2, 8);
    grid.set_shape(3, 5).expect("shape");
    assert_eq!((grid.rows(), grid.cols()), (3, 5));
    assert!(grid
        .cells()
        .iter()
        .all(|cell| cell.sides().iter().all(|(_, b)| !b.is_decided())));
}

#[test]
fn topology_round_trips_through_json() {
    let grid = generated(2, 3, 4);
    let raw = serde_json::to_string(&grid).expect("json");
    assert!(raw.contains("\"flat\""));
    let back: CutGrid = serde_json::from_str(&raw).expect("parse");
    assert_eq!(back, grid);
}

#[test]
fn loading_checks_shape_and_cell_count() {
    let missing = serde_json::from_str::<CutGrid>(r#"{"rows":2,"cols":2,"cells":[]}"#)
        .expect_err("missing cells");
    assert!(missing.to_string().contains("grid holds 0 cells, expected 4"), "{missing}");

    let empty = serde_json::from_str::<CutGrid>(r#"{"rows":0,"cols":0,"cells":[]}"#)
        .expect_err("empty grid");
    assert!(empty.to_string().contains("at least 1x1"), "{empty}");

    let huge = format!(r#"{{"rows":{},"cols":2,"cells":[]}}"#, usize::MAX);
    assert!(serde_json::from_str::<CutGrid>(&huge).is_err());
}
