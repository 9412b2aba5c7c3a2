pub mod maze;
pub use maze::{InvalidMazeError, Maze};
pub mod square;
pub use square::Square;
