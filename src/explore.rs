use crate::{
    frontier::Frontier,
    maze::{Maze, Square},
    pos::Pos,
};

/// What the walk does once an exit has been promoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitPolicy {
    /// End the walk at the first exit reached.
    StopAtFirstExit,
    /// Keep walking until the frontier drains.
    ExploreAll,
}

/// Outcome of one exploration run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exploration {
    /// Way-outs promoted to exits, in the order they were reached.
    pub exits: Vec<Pos>,
    /// Corridor squares marked visited.
    pub visited: usize,
}

/// Walks the maze from its designated start, pulling from the frontier until
/// it drains or the policy says stop.
///
/// The frontier decides the shape of the walk: a stack makes it depth-first,
/// a queue breadth-first, with no other change. Neighbor order is randomized
/// by the maze, so two runs with the same frontier can trace different paths.
pub fn explore(maze: &mut Maze, frontier: &mut dyn Frontier, policy: ExitPolicy) -> Exploration {
    let mut outcome = Exploration::default();
    let Some(start) = maze.start() else {
        log::warn!("exploration requested on a maze with no start position");
        return outcome;
    };

    frontier.add(start);
    while let Some(pos) = frontier.remove() {
        match maze.get_square(pos) {
            Some(Square::WayOut) => {
                maze.set_exit(pos);
                outcome.exits.push(pos);
                if policy == ExitPolicy::StopAtFirstExit {
                    break;
                }
                continue;
            }
            // A way-out reached along two paths gets dequeued again after
            // its promotion; exits stay terminal.
            Some(Square::Exit) => continue,
            Some(Square::Corridor) => {
                maze.set_visited(pos);
                outcome.visited += 1;
            }
            // The start square was consumed when it was claimed and stays
            // as it is; its neighbors are still expanded below.
            _ => {}
        }

        for neighbor in maze.get_neighbors(pos) {
            match maze.get_square(neighbor) {
                Some(Square::Corridor) | Some(Square::WayOut) => frontier.add(neighbor),
                _ => {}
            }
        }
    }

    log::debug!(
        "exploration done: {} visited, {} exit(s)",
        outcome.visited,
        outcome.exits.len()
    );
    outcome
}
