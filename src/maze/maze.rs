use std::fmt;

use rand::{seq::SliceRandom, Rng, SeedableRng};
use thiserror::Error;

use crate::{pos::Pos, Random};

use super::square::Square;

/// Why an input grid was rejected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvalidMazeError {
    #[error("maze must be at least 3x3, got {height}x{width}")]
    TooSmall { height: usize, width: usize },
    #[error("row {row} is {len} squares long, expected {expected}")]
    NotRectangular {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("unrecognized square {c:?} at ({row},{col})")]
    UnknownSquare { c: char, row: usize, col: usize },
    #[error("way-out at ({row},{col}) is not on the outer boundary")]
    WayOutInsideMaze { row: usize, col: usize },
}

/// A validated rectangular maze.
///
/// The grid is fixed at construction and mutated in place through the narrow
/// transitions [`Square`] allows. Every random decision draws from the
/// maze's own generator, so [`Maze::reseed`] makes a whole run reproducible.
#[derive(Debug, Clone)]
pub struct Maze {
    squares: Vec<Vec<Square>>,
    width: usize,
    height: usize,
    start: Option<Pos>,
    rand: Random,
}

impl Maze {
    /// Builds a maze from a character grid.
    ///
    /// The grid must be rectangular and at least 3x3, contain only `'x'`
    /// (wall), `' '` (corridor) and `'o'` (way-out) squares, and keep every
    /// way-out on the outer boundary.
    pub fn new(grid: Vec<Vec<char>>) -> Result<Maze, InvalidMazeError> {
        let height = grid.len();
        let width = grid.first().map_or(0, Vec::len);
        if height < 3 || width < 3 {
            return Err(InvalidMazeError::TooSmall { height, width });
        }
        for (row, line) in grid.iter().enumerate() {
            if line.len() != width {
                return Err(InvalidMazeError::NotRectangular {
                    row,
                    len: line.len(),
                    expected: width,
                });
            }
        }

        let mut squares = Vec::with_capacity(height);
        for (row, line) in grid.iter().enumerate() {
            let mut converted = Vec::with_capacity(width);
            for (col, &c) in line.iter().enumerate() {
                let square =
                    Square::from_char(c).ok_or(InvalidMazeError::UnknownSquare { c, row, col })?;
                let on_boundary = row == 0 || col == 0 || row == height - 1 || col == width - 1;
                if square.is_way_out() && !on_boundary {
                    return Err(InvalidMazeError::WayOutInsideMaze { row, col });
                }
                converted.push(square);
            }
            squares.push(converted);
        }

        Ok(Maze {
            squares,
            width,
            height,
            start: None,
            rand: Random::from_entropy(),
        })
    }

    /// Convenience constructor for in-memory string grids.
    pub fn from_rows(rows: &[&str]) -> Result<Maze, InvalidMazeError> {
        Maze::new(rows.iter().map(|row| row.chars().collect()).collect())
    }

    /// Replaces the maze's generator with a seeded one, pinning the order of
    /// every later random decision.
    pub fn reseed(&mut self, seed: u64) {
        self.rand = Random::seed_from_u64(seed);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The start position, once one has been picked.
    pub fn start(&self) -> Option<Pos> {
        self.start
    }

    /// Square at `pos`, or `None` outside the grid. Probing past the edges
    /// is an ordinary part of neighbor checks, not an error.
    pub fn get_square(&self, pos: Pos) -> Option<Square> {
        if pos.row >= 0
            && (pos.row as usize) < self.height
            && pos.col >= 0
            && (pos.col as usize) < self.width
        {
            Some(self.squares[pos.row as usize][pos.col as usize])
        } else {
            None
        }
    }

    /// Picks a start square uniformly at random among the corridors, marks
    /// it and returns it.
    ///
    /// Sampling retries until it hits a corridor, so a maze without a single
    /// corridor square never returns. Callers own that degenerate case.
    pub fn generate_start(&mut self) -> Pos {
        loop {
            let pos = Pos::new(
                self.rand.gen_range(0..self.height as i32),
                self.rand.gen_range(0..self.width as i32),
            );
            if self.get_square(pos).map_or(false, Square::can_be_set) {
                self.start = Some(pos);
                self.mark_start();
                return pos;
            }
        }
    }

    /// Deterministic start selection. Returns `None` without touching the
    /// maze unless `pos` is an untouched corridor.
    pub fn set_start(&mut self, pos: Pos) -> Option<Pos> {
        if !self.get_square(pos).map_or(false, Square::can_be_set) {
            return None;
        }
        self.start = Some(pos);
        self.mark_start();
        Some(pos)
    }

    fn mark_start(&mut self) {
        if let Some(start) = self.start {
            self.squares[start.row as usize][start.col as usize] = Square::Start;
        }
    }

    /// Marks a corridor square as visited. Any other target, including an
    /// out-of-range position, is left untouched.
    pub fn set_visited(&mut self, pos: Pos) {
        if self.get_square(pos).map_or(false, Square::can_be_set) {
            self.squares[pos.row as usize][pos.col as usize] = Square::Visited;
        }
    }

    /// Promotes a way-out square to the exit. Any other target is left
    /// untouched.
    pub fn set_exit(&mut self, pos: Pos) {
        if self.get_square(pos).map_or(false, Square::is_way_out) {
            self.squares[pos.row as usize][pos.col as usize] = Square::Exit;
        }
    }

    /// In-bounds, non-wall neighbors of `pos`, in a fresh uniformly random
    /// order on every call. An out-of-range `pos` has no neighbors.
    pub fn get_neighbors(&mut self, pos: Pos) -> Vec<Pos> {
        let offsets = [
            Pos::new(-1, 0),
            Pos::new(0, 1),
            Pos::new(1, 0),
            Pos::new(0, -1),
        ];

        let mut neighbors = Vec::with_capacity(offsets.len());
        if self.get_square(pos).is_none() {
            return neighbors;
        }
        for off in offsets {
            let next = pos + off;
            if self
                .get_square(next)
                .map_or(false, |square| !square.is_wall())
            {
                neighbors.push(next);
            }
        }
        neighbors.shuffle(&mut self.rand);
        neighbors
    }

    /// Current state of the maze, one string per row.
    pub fn render(&self) -> Vec<String> {
        self.squares
            .iter()
            .map(|row| row.iter().map(|square| square.to_char()).collect())
            .collect()
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.render() {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{InvalidMazeError, Maze};
    use crate::{maze::Square, pos::Pos};

    const OPEN_CROSS: [&str; 5] = ["xxxxx", "x   x", "x   x", "x   x", "xxxxx"];

    #[test]
    fn accepts_boundary_way_out() {
        let maze = Maze::from_rows(&["xxoxx", "x   x", "x x x", "x   x", "xxxxx"]).unwrap();
        assert_eq!(maze.height(), 5);
        assert_eq!(maze.width(), 5);
        assert_eq!(maze.get_square(Pos::new(0, 2)), Some(Square::WayOut));
        assert_eq!(maze.get_square(Pos::new(2, 2)), Some(Square::Wall));
        assert_eq!(maze.start(), None);
    }

    #[test]
    fn rejects_small_grids() {
        assert_eq!(
            Maze::from_rows(&["xx", "xx"]).unwrap_err(),
            InvalidMazeError::TooSmall {
                height: 2,
                width: 2
            }
        );
        assert_eq!(
            Maze::from_rows(&["xxx", "xxx"]).unwrap_err(),
            InvalidMazeError::TooSmall {
                height: 2,
                width: 3
            }
        );
        assert_eq!(
            Maze::from_rows(&[]).unwrap_err(),
            InvalidMazeError::TooSmall {
                height: 0,
                width: 0
            }
        );
    }

    #[test]
    fn rejects_ragged_rows() {
        assert_eq!(
            Maze::from_rows(&["xxxx", "xxx", "xxxx"]).unwrap_err(),
            InvalidMazeError::NotRectangular {
                row: 1,
                len: 3,
                expected: 4
            }
        );
    }

    #[test]
    fn rejects_unknown_squares() {
        assert_eq!(
            Maze::from_rows(&["xxx", "x#x", "xxx"]).unwrap_err(),
            InvalidMazeError::UnknownSquare {
                c: '#',
                row: 1,
                col: 1
            }
        );
    }

    #[test]
    fn rejects_way_outs_off_the_boundary() {
        assert_eq!(
            Maze::from_rows(&["xxxxx", "xo  x", "x x x", "x   x", "xxxxx"]).unwrap_err(),
            InvalidMazeError::WayOutInsideMaze { row: 1, col: 1 }
        );
        assert_eq!(
            Maze::from_rows(&["xxxxx", "x   x", "x o x", "x   x", "xxxxx"]).unwrap_err(),
            InvalidMazeError::WayOutInsideMaze { row: 2, col: 2 }
        );
    }

    #[test]
    fn out_of_range_probes_return_none() {
        let maze = Maze::from_rows(&OPEN_CROSS).unwrap();
        assert_eq!(maze.get_square(Pos::new(-1, 2)), None);
        assert_eq!(maze.get_square(Pos::new(5, 2)), None);
        assert_eq!(maze.get_square(Pos::new(2, -1)), None);
        assert_eq!(maze.get_square(Pos::new(2, 5)), None);
        assert_eq!(maze.get_square(Pos::new(0, 0)), Some(Square::Wall));
    }

    #[test]
    fn neighbors_skip_walls_and_edges() {
        let mut maze = Maze::from_rows(&["xxoxx", "x   x", "x x x", "x   x", "xxxxx"]).unwrap();
        maze.reseed(1);

        let mut beside_two_walls = maze.get_neighbors(Pos::new(1, 1));
        beside_two_walls.sort_by_key(|pos| (pos.row, pos.col));
        assert_eq!(beside_two_walls, vec![Pos::new(1, 2), Pos::new(2, 1)]);

        // The way-out above (1,2) is a legal neighbor; walls never are.
        let mut next_to_way_out = maze.get_neighbors(Pos::new(1, 2));
        next_to_way_out.sort_by_key(|pos| (pos.row, pos.col));
        assert_eq!(
            next_to_way_out,
            vec![Pos::new(0, 2), Pos::new(1, 1), Pos::new(1, 3)]
        );

        assert_eq!(maze.get_neighbors(Pos::new(0, 0)), vec![]);
        assert_eq!(maze.get_neighbors(Pos::new(-3, 9)), vec![]);
    }

    #[test]
    fn neighbor_order_covers_every_permutation() {
        let mut maze = Maze::from_rows(&OPEN_CROSS).unwrap();
        maze.reseed(7);

        let mut counts: HashMap<Vec<Pos>, u32> = HashMap::new();
        for _ in 0..2400 {
            let order = maze.get_neighbors(Pos::new(2, 2));
            assert_eq!(order.len(), 4);
            *counts.entry(order).or_default() += 1;
        }

        assert_eq!(counts.len(), 24);
        for count in counts.values() {
            assert!(*count >= 40, "skewed ordering count: {}", count);
        }
    }

    #[test]
    fn set_visited_only_claims_corridors() {
        let mut maze = Maze::from_rows(&["xxoxx", "x   x", "x x x", "x   x", "xxxxx"]).unwrap();

        maze.set_visited(Pos::new(1, 1));
        assert_eq!(maze.get_square(Pos::new(1, 1)), Some(Square::Visited));

        // Repeats, walls, way-outs and out-of-range targets change nothing.
        maze.set_visited(Pos::new(1, 1));
        assert_eq!(maze.get_square(Pos::new(1, 1)), Some(Square::Visited));
        maze.set_visited(Pos::new(0, 0));
        assert_eq!(maze.get_square(Pos::new(0, 0)), Some(Square::Wall));
        maze.set_visited(Pos::new(0, 2));
        assert_eq!(maze.get_square(Pos::new(0, 2)), Some(Square::WayOut));
        maze.set_visited(Pos::new(9, 9));
    }

    #[test]
    fn set_exit_only_promotes_way_outs() {
        let mut maze = Maze::from_rows(&["xxoxx", "x   x", "x x x", "x   x", "xxxxx"]).unwrap();

        maze.set_exit(Pos::new(1, 1));
        assert_eq!(maze.get_square(Pos::new(1, 1)), Some(Square::Corridor));
        maze.set_exit(Pos::new(-1, 0));

        maze.set_exit(Pos::new(0, 2));
        assert_eq!(maze.get_square(Pos::new(0, 2)), Some(Square::Exit));

        // A second promotion finds an exit, not a way-out, and changes nothing.
        maze.set_exit(Pos::new(0, 2));
        assert_eq!(maze.get_square(Pos::new(0, 2)), Some(Square::Exit));
    }

    #[test]
    fn set_start_validates_its_target() {
        let mut maze = Maze::from_rows(&OPEN_CROSS).unwrap();

        assert_eq!(maze.set_start(Pos::new(0, 0)), None);
        assert_eq!(maze.start(), None);

        assert_eq!(maze.set_start(Pos::new(2, 2)), Some(Pos::new(2, 2)));
        assert_eq!(maze.start(), Some(Pos::new(2, 2)));
        assert_eq!(maze.get_square(Pos::new(2, 2)), Some(Square::Start));

        // The claimed square is no longer an untouched corridor.
        assert_eq!(maze.set_start(Pos::new(2, 2)), None);
    }

    #[test]
    fn generate_start_lands_on_a_corridor() {
        let mut maze = Maze::from_rows(&["xxx", "x x", "xxx"]).unwrap();
        maze.reseed(3);

        let start = maze.generate_start();
        assert_eq!(start, Pos::new(1, 1));
        assert_eq!(maze.start(), Some(start));
        assert_eq!(maze.get_square(start), Some(Square::Start));
    }

    #[test]
    fn rendering_reflects_mutated_state() {
        let mut maze = Maze::from_rows(&["xxoxx", "x   x", "xxxxx"]).unwrap();
        maze.set_start(Pos::new(1, 1));
        maze.set_visited(Pos::new(1, 2));
        maze.set_exit(Pos::new(0, 2));

        assert_eq!(maze.render(), vec!["xxExx", "xS. x", "xxxxx"]);
        assert_eq!(maze.to_string(), "xxExx\nxS. x\nxxxxx\n");
    }
}
