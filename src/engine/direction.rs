use super::geometry::{Cell, Grid};
use super::rules::Walls;
use crate::consts::CELL_SIZE;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    /// Compute the cell one step from `cell` in this direction on `grid`.
    /// The wall policy applies on both axes, so a cell already outside the
    /// grid is brought back in.  Returns `None` if the result would lie
    /// outside the grid and `walls` is [`Walls::Die`].
    pub(crate) fn advance(self, cell: Cell, grid: Grid, walls: Walls) -> Option<Cell> {
        let (dx, dy) = match self {
            Direction::Up => (0, -CELL_SIZE),
            Direction::Down => (0, CELL_SIZE),
            Direction::Left => (-CELL_SIZE, 0),
            Direction::Right => (CELL_SIZE, 0),
        };
        Some(Cell {
            x: step_on_axis(cell.x, dx, grid.width(), walls)?,
            y: step_on_axis(cell.y, dy, grid.height(), walls)?,
        })
    }

    pub(crate) fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

/// Move the coordinate `v` by `delta` within `[0, limit)`, applying the wall
/// policy if the result falls outside
fn step_on_axis(v: i32, delta: i32, limit: i32, walls: Walls) -> Option<i32> {
    let v2 = v.saturating_add(delta);
    if (0..limit).contains(&v2) {
        return Some(v2);
    }
    match walls {
        Walls::Wrap if v2 < 0 => Some(limit - CELL_SIZE),
        Walls::Wrap => Some(0),
        Walls::Clamp => Some(v2.clamp(0, limit - CELL_SIZE)),
        Walls::Die => None,
    }
}
