use std::fmt;

/// State of a single maze square.
///
/// Only `Wall`, `Corridor` and `WayOut` may appear in input grids. The rest
/// are produced during exploration: a corridor becomes `Start` or `Visited`,
/// a way-out becomes `Exit`, and no other transition exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Square {
    Wall,
    Corridor,
    Visited,
    Start,
    WayOut,
    Exit,
}

impl Square {
    /// Parses one input-grid character. Returns `None` for anything other
    /// than the three input kinds.
    pub fn from_char(c: char) -> Option<Square> {
        match c {
            'x' => Some(Square::Wall),
            ' ' => Some(Square::Corridor),
            'o' => Some(Square::WayOut),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Square::Wall => 'x',
            Square::Corridor => ' ',
            Square::Visited => '.',
            Square::Start => 'S',
            Square::WayOut => 'o',
            Square::Exit => 'E',
        }
    }

    /// Whether this square is an untouched corridor that can still be
    /// claimed as a start or visited square.
    pub fn can_be_set(self) -> bool {
        matches!(self, Square::Corridor)
    }

    pub fn is_wall(self) -> bool {
        matches!(self, Square::Wall)
    }

    /// Whether this square is eligible for promotion to `Exit`.
    pub fn is_way_out(self) -> bool {
        matches!(self, Square::WayOut)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
