use serde::{Deserialize, Serialize};

/// Classification of one side of a cell.
///
/// `Tab` sides protrude into the neighbouring cell, `Blank` sides receive the
/// neighbour's tab. `Flat` only ever appears on the outer ring of the grid.
/// `Invalid` marks a slot the generator has not decided yet.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderType {
    #[default]
    Invalid,
    Flat,
    Tab,
    Blank,
}

impl BorderType {
    /// The border the neighbour across this side must carry.
    pub fn inverse(self) -> Self {
        match self {
            BorderType::Tab => BorderType::Blank,
            BorderType::Blank => BorderType::Tab,
            other => other,
        }
    }

    pub fn is_decided(self) -> bool {
        self != BorderType::Invalid
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Up,
    Down,
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Up, Side::Down, Side::Left, Side::Right];

    pub fn opposite(self) -> Self {
        match self {
            Side::Up => Side::Down,
            Side::Down => Side::Up,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Row and column delta pointing at the neighbour across this side.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Side::Up => (-1, 0),
            Side::Down => (1, 0),
            Side::Left => (0, -1),
            Side::Right => (0, 1),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Side::Up | Side::Down)
    }
}
