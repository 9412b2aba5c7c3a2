use std::fmt;
use std::ops::{Add, AddAssign};

/// Zero-based (row, column) coordinate of one maze square.
///
/// Values are expected to be non-negative; out-of-grid positions are caught
/// by the maze's bounds checks, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    pub const fn new(row: i32, col: i32) -> Self {
        Pos { row, col }
    }
}

impl Add for Pos {
    type Output = Pos;

    fn add(self, other: Pos) -> Pos {
        Pos::new(self.row + other.row, self.col + other.col)
    }
}

impl AddAssign for Pos {
    fn add_assign(&mut self, other: Pos) {
        self.row += other.row;
        self.col += other.col;
    }
}

impl From<(i32, i32)> for Pos {
    fn from((row, col): (i32, i32)) -> Self {
        Pos::new(row, col)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}
