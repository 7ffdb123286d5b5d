//! Topology of a jigsaw cut: which side of every shared edge carries the tab.

pub mod border;
pub mod error;
pub mod grid;
pub mod layout;

pub use border::{BorderType, Side};
pub use error::TopologyError;
pub use grid::{Cell, CutGrid, EdgeViolation};
pub use layout::{suggest_grid, GridChoice};
