use super::direction::Direction;
use super::geometry::{Cell, Grid};
use super::rules::Walls;
use crate::consts;

/// Snake state.  Snate.
///
/// The body is stored head first; every segment after the head trails the one
/// before it.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    body: Vec<Cell>,
}

impl Snake {
    /// Create a snake occupying [`START_BODY`][consts::START_BODY]
    pub(crate) fn new() -> Snake {
        Snake {
            body: consts::START_BODY.to_vec(),
        }
    }

    /// Return the snake to [`START_BODY`][consts::START_BODY]
    pub(crate) fn reset(&mut self) {
        self.body.clear();
        self.body.extend_from_slice(&consts::START_BODY);
    }

    pub(crate) fn head(&self) -> Cell {
        self.body[0]
    }

    /// Return the snake's cells, head first
    pub(crate) fn cells(&self) -> &[Cell] {
        &self.body
    }

    pub(crate) fn len(&self) -> usize {
        self.body.len()
    }

    /// Move the snake one cell in `direction`: each segment takes the place
    /// of the one in front of it, and the head moves on from where it was.
    /// Returns `false`, leaving the snake untouched, if the head hit a wall
    /// under [`Walls::Die`].
    pub(crate) fn step(&mut self, direction: Direction, grid: Grid, walls: Walls) -> bool {
        let Some(head) = direction.advance(self.head(), grid, walls) else {
            return false;
        };
        let tail_start = self.body.len() - 1;
        self.body.copy_within(..tail_start, 1);
        self.body[0] = head;
        true
    }

    /// Add a segment on top of the current tail.  It separates from the tail
    /// on the next step.
    pub(crate) fn grow(&mut self) {
        let tail = self.body[self.body.len() - 1];
        self.body.push(tail);
    }

    /// Returns true if the head shares a cell with any other segment
    pub(crate) fn bites_itself(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&c| c == head)
    }
}

impl Default for Snake {
    fn default() -> Snake {
        Snake::new()
    }
}
