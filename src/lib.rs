//! Core model of a rectangular labyrinth and the frontier collections that
//! drive its exploration. One exploration loop walks the maze; swapping the
//! frontier it pulls from switches the walk between depth-first and
//! breadth-first.

pub mod explore;
pub mod frontier;
pub mod maze;
pub mod pos;

pub use explore::{explore, ExitPolicy, Exploration};
pub use frontier::{Frontier, QueueFrontier, StackFrontier};
pub use maze::{InvalidMazeError, Maze, Square};
pub use pos::Pos;

/// Generator behind every random decision in the crate. Seed it through
/// [`Maze::reseed`] when a run has to be reproducible.
pub type Random = rand_xoshiro::Xoshiro256StarStar;
