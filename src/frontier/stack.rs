use std::fmt;

use crate::pos::Pos;

use super::{fmt_removal_order, Frontier};

/// LIFO frontier over a chain of owned nodes. Each node owns its successor
/// and the frontier owns the head. Driving the exploration loop with it
/// yields a depth-first walk.
#[derive(Debug, Default)]
pub struct StackFrontier {
    head: Option<Box<Node>>,
}

#[derive(Debug)]
struct Node {
    pos: Pos,
    next: Option<Box<Node>>,
}

impl StackFrontier {
    pub fn new() -> Self {
        StackFrontier { head: None }
    }

    fn iter(&self) -> impl Iterator<Item = Pos> + '_ {
        let mut next = self.head.as_deref();
        std::iter::from_fn(move || {
            let node = next?;
            next = node.next.as_deref();
            Some(node.pos)
        })
    }
}

impl Frontier for StackFrontier {
    fn add(&mut self, pos: Pos) {
        self.head = Some(Box::new(Node {
            pos,
            next: self.head.take(),
        }));
    }

    fn remove(&mut self) -> Option<Pos> {
        self.head.take().map(|node| {
            self.head = node.next;
            node.pos
        })
    }

    fn is_empty(&self) -> bool {
        self.head.is_none()
    }
}

impl fmt::Display for StackFrontier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_removal_order(f, self.iter())
    }
}
